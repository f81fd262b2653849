use thiserror::Error;

/// Returned when a late-initialised [`ValueCell`](`crate::ValueCell`)
/// is read before its first write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value cell read before initialisation")]
pub struct Uninitialised;
