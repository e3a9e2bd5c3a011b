use std::fmt;
use std::path::PathBuf;

/// Stages of a conversion, in the order the workflow runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ReadStream,
    LoadForceField,
    DeriveTopology,
    ReadStructure,
    Render,
    WriteOutputs,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::ReadStream => "Reading stream",
            Self::LoadForceField => "Loading force field",
            Self::DeriveTopology => "Deriving topology",
            Self::ReadStructure => "Reading structure",
            Self::Render => "Rendering",
            Self::WriteOutputs => "Writing outputs",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    StageStarted(Stage),
    StageFinished(Stage),
    /// An output file landed on disk.
    FileWritten(PathBuf),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `body` as `stage`; `StageFinished` is only reported when it succeeds.
    pub fn stage<T, E>(&self, stage: Stage, body: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.report(Progress::StageStarted(stage));
        let value = body()?;
        self.report(Progress::StageFinished(stage));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::FileWritten(PathBuf::from("lig.itp")));
        assert_eq!(reporter.stage::<_, ()>(Stage::Render, || Ok(7)), Ok(7));
    }

    #[test]
    fn failed_stage_reports_no_finish() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let _ = reporter.stage::<(), &str>(Stage::ReadStream, || Ok(()));
        let _ = reporter.stage::<(), _>(Stage::WriteOutputs, || Err("disk full"));
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::StageStarted(Stage::ReadStream),
                Progress::StageFinished(Stage::ReadStream),
                Progress::StageStarted(Stage::WriteOutputs),
            ]
        );
    }

    #[test]
    fn stage_labels_read_as_spinner_messages() {
        assert_eq!(Stage::LoadForceField.to_string(), "Loading force field");
        assert_eq!(Stage::WriteOutputs.label(), "Writing outputs");
    }
}
