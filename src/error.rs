use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("MIDI file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read MIDI file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse MIDI: {0}")]
    Decode(#[from] midly::Error),

    #[error("First tempo event (track {track}) is zero microseconds per beat")]
    ZeroTempo { track: usize },

    #[error("Failed to serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write chart {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;
