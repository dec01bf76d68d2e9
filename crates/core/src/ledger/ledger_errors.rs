use thiserror::Error;

/// Errors raised while canonicalizing provider transfers.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A provider record is unusable: missing hash, timestamp or value,
    /// a non-numeric or negative value, or a transfer the wallet is not
    /// on exactly one side of.
    #[error("Malformed transfer: {0}")]
    MalformedTransfer(String),
}
