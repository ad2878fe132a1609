use alloc::string::String;

/// A factory configuration that was rejected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The node width is larger than [`MAX_NODE_BITS`].
    ///
    /// [`MAX_NODE_BITS`]: crate::MAX_NODE_BITS
    #[error("node bits out of range: {node_bits} (valid range is 0..={max})")]
    NodeBitsOutOfRange { node_bits: u32, max: u32 },

    /// The node does not fit in the configured node width.
    #[error("node out of range: {node} (valid range is 0..={max})")]
    NodeOutOfRange { node: u32, max: u32 },

    /// An environment variable holds a value that is not a decimal integer of
    /// the expected type.
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}
