use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("malformed input on line {line}: {source}")]
    Row { line: u64, source: csv::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
