//! CSV archiving
//!
//! An [`Archiver`] writes one CSV file inside the session's archive folder.
//! Records must be flat structs (no nested structs or vectors), as the
//! header line is generated from the field names of the first record.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::Path;
use std::fs::{File, OpenOptions};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot open the archive file: {0}")]
    FileError(std::io::Error),

    #[error("Cannot write the record: {0}")]
    CsvError(csv::Error),

    #[error("The archiver has not been opened")]
    NotOpen
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        let mut session_path = session.arch_root.clone();
        session_path.push(path);

        Self::open(session_path)
    }

    /// Create a new archiver writing to the given path on the host.
    ///
    /// An existing file at the path is truncated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(ArchiveError::FileError)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .map_err(ArchiveError::FileError)?;

        let w = WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        Ok(Self {
            writer: Some(w)
        })
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(
        &mut self, record: T
    ) -> Result<(), ArchiveError> {
        match self.writer {
            Some(ref mut w) => {
                w.serialize(record).map_err(ArchiveError::CsvError)?;
                w.flush().map_err(|e| ArchiveError::CsvError(e.into()))?;
            },
            None => return Err(ArchiveError::NotOpen)
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Record {
        time_s: f64,
        x_m: f64,
        label: &'static str
    }

    #[test]
    fn test_write_records() {
        let path = std::env::temp_dir()
            .join(format!("archive_test_{}", std::process::id()))
            .join("records.csv");

        let mut arch = Archiver::open(&path).unwrap();
        arch.serialise(Record { time_s: 0.0, x_m: 1.5, label: "a" }).unwrap();
        arch.serialise(Record { time_s: 0.1, x_m: 2.0, label: "b" }).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines, vec!["time_s,x_m,label", "0.0,1.5,a", "0.1,2.0,b"]);
    }

    #[test]
    fn test_unopened_archiver() {
        let mut arch = Archiver::default();

        assert!(matches!(
            arch.serialise(Record { time_s: 0.0, x_m: 0.0, label: "" }),
            Err(ArchiveError::NotOpen)
        ));
    }
}
