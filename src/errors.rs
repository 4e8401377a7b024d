// wblogtool/src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the symmetric encryption layer.
///
/// Decryption never returns corrupted plaintext silently: anything that is
/// not a well-formed, authentic ciphertext for the given key maps to one of
/// these variants.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("malformed ciphertext or key: {0}")]
    MalformedInput(String),

    #[error("ciphertext failed authentication (wrong key or tampered data)")]
    AuthenticationFailure,
}

/// Failures talking to the remote object store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("network failure talking to object store: {0}")]
    NetworkFailure(String),

    #[error("object store rejected the upload credential: {0}")]
    AuthRejected(String),

    #[error("object store quota exceeded: {0}")]
    QuotaExceeded(String),
}

/// Failures of a single backup run.
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("data file {0} does not exist, nothing to back up")]
    SourceMissing(PathBuf),

    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures of a single restore run.
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("artifact name cannot be empty")]
    InvalidArgument,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("artifact could not be decrypted: {0}")]
    DecryptionFailed(#[source] CryptoError),

    #[error("failed to write restored data file: {0}")]
    WriteFailure(#[source] std::io::Error),
}
