//! Reading and writing datasets.
//!
//! FITS encoding lives outside this crate; a codec plugs in by implementing
//! [`DatasetReader`] and [`DatasetWriter`]. [`JsonFormat`] stores the data
//! model as JSON and backs [`read_dataset`] and [`write_dataset`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{OiError, Result};
use crate::model::Dataset;

/// Decodes a dataset from a byte stream.
pub trait DatasetReader {
    fn read(&self, reader: &mut dyn Read) -> Result<Dataset>;
}

/// Encodes a dataset to a byte stream.
pub trait DatasetWriter {
    fn write(&self, dataset: &Dataset, writer: &mut dyn Write) -> Result<()>;
}

/// JSON encoding of the data model.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl DatasetReader for JsonFormat {
    fn read(&self, reader: &mut dyn Read) -> Result<Dataset> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl DatasetWriter for JsonFormat {
    fn write(&self, dataset: &Dataset, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, dataset)?;
        } else {
            serde_json::to_writer(&mut *writer, dataset)?;
        }
        writer.flush().map_err(|e| OiError::Persistence(format!("Failed to flush: {e}")))
    }
}

/// Load a dataset from `path` with the given format.
///
/// The lookup index is rebuilt and unresolved references are logged.
pub fn read_with(format: &dyn DatasetReader, path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| OiError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let dataset = format.read(&mut reader).map_err(|e| {
        OiError::Persistence(format!("Failed to read dataset '{}': {}", path.display(), e))
    })?;
    debug!("read {} from '{}'", dataset.summary(), path.display());
    Ok(dataset)
}

/// Save a dataset to `path` with the given format, creating parent
/// directories as needed.
pub fn write_with(
    format: &dyn DatasetWriter,
    dataset: &Dataset,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                OiError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|source| OiError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    format.write(dataset, &mut writer).map_err(|e| {
        OiError::Persistence(format!("Failed to write dataset '{}': {}", path.display(), e))
    })
}

/// Load a JSON dataset.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    read_with(&JsonFormat::default(), path)
}

/// Save a dataset as pretty-printed JSON.
pub fn write_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    write_with(&JsonFormat::default(), dataset, path)
}
