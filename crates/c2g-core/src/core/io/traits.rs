use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading a text input format.
///
/// Implementors parse one kind of file into a typed value; the path-based
/// variant is provided on top of the reader-based one.
pub trait InputFile {
    /// The value produced by parsing.
    type Output;

    /// The error type for parsing and I/O.
    type Error: Error + From<io::Error>;

    /// Parses the format from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Parses the format from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for writing a text output format.
pub trait OutputFile {
    /// The value being serialized.
    type Input: ?Sized;

    /// The error type for rendering and I/O.
    type Error: Error + From<io::Error>;

    /// Writes `input` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be represented in the format or
    /// the writer fails.
    fn write_to(input: &Self::Input, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Renders `input` into an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be represented in the format.
    fn render(input: &Self::Input) -> Result<Vec<u8>, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(input, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes `input` to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(input: &Self::Input, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(input, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
