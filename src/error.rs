use std::{num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type IgvxResult<T> = std::result::Result<T, IgvxError>;

#[derive(Debug, Error)]
pub enum IgvxError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(
        "Alignment index file not found: {}. Create it using 'samtools index {}'",
        bai_path.display(),
        aln_path.display()
    )]
    MissingAlignmentIndex {
        bai_path: PathBuf,
        aln_path: PathBuf,
    },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl IgvxError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! igvx_error {
    ($($arg:tt)*) => {
        $crate::error::IgvxError::message(format!($($arg)*))
    };
}
