use alloc::string::String;

/// An entropy source failed to produce random data.
///
/// Random failures are never papered over with zeroes: the factory returns
/// this error from `generate()` and leaves its state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("random source failed: {reason}")]
pub struct RandomError {
    reason: String,
}

impl RandomError {
    /// Creates an error carrying a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason reported by the entropy source.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
