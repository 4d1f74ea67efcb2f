use crate::core::models::structure::StructureModel;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing structure file formats.
///
/// Implementors handle format-specific parsing and serialization of a
/// [`StructureModel`] together with the format's own metadata (header text, remarks).
pub trait StructureFile {
    /// The type of metadata associated with the file format.
    type Metadata: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure model from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead)
    -> Result<(StructureModel, Self::Metadata), Self::Error>;

    /// Writes a structure model and metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        model: &StructureModel,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a structure model from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(StructureModel, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a structure model from in-memory text.
    fn read_from_str(text: &str) -> Result<(StructureModel, Self::Metadata), Self::Error> {
        let mut reader = text.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Writes a structure model and metadata to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        model: &StructureModel,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(model, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes a structure model and metadata to a `String`.
    fn write_to_string(
        model: &StructureModel,
        metadata: &Self::Metadata,
    ) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(model, metadata, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
