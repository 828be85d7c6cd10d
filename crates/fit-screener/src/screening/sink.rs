use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::record::CandidateRecord;

/// Destination for finished candidate records (file drop, queue, ATS adapter, ...).
pub trait RecordSink: Send + Sync {
    /// Persist the record and return a locator describing where it went.
    fn store(&self, record: &CandidateRecord) -> Result<String, SinkError>;
}

/// Record sink failure.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write candidate record to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode candidate record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("record sink unavailable: {0}")]
    Unavailable(String),
}

/// Writes each record as pretty-printed JSON into a directory, named after the candidate.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
    prefix: String,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }
}

impl RecordSink for JsonFileSink {
    fn store(&self, record: &CandidateRecord) -> Result<String, SinkError> {
        fs::create_dir_all(&self.directory).map_err(|source| SinkError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.directory.join(record.export_file_name(&self.prefix));
        let payload = record.to_pretty_json()?;
        fs::write(&path, payload).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "wrote candidate record");
        Ok(path.display().to_string())
    }
}
