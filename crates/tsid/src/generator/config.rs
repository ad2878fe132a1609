use crate::ConfigError;
use alloc::string::String;

/// Environment variable holding the node id.
pub const ENV_NODE: &str = "TSID_NODE";
/// Environment variable holding the node width in bits.
pub const ENV_NODE_BITS: &str = "TSID_NODE_BITS";
/// Environment variable holding the custom epoch in Unix milliseconds.
pub const ENV_EPOCH: &str = "TSID_EPOCH";

/// Declarative factory settings.
///
/// Every field is optional; unset fields keep the builder's current value.
/// Under the `serde` feature the struct can be read from any serde format.
///
/// ```
/// use tsid::{FactoryConfig, TsidFactoryBuilder};
///
/// let config = FactoryConfig {
///     node: Some(7),
///     node_bits: Some(8),
///     ..FactoryConfig::default()
/// };
/// let factory = TsidFactoryBuilder::new().with_config(config).build().unwrap();
/// assert_eq!(factory.node(), 7);
/// assert_eq!(factory.counter_bits(), 14);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactoryConfig {
    pub node: Option<u32>,
    pub node_bits: Option<u32>,
    pub custom_epoch: Option<i64>,
}

impl FactoryConfig {
    /// Reads `TSID_NODE`, `TSID_NODE_BITS` and `TSID_EPOCH` from the process
    /// environment. Missing variables leave the field unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable is set but is not a
    /// decimal integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`FactoryConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a value is not a decimal
    /// integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            node: parse_var(&lookup, ENV_NODE)?,
            node_bits: parse_var(&lookup, ENV_NODE_BITS)?,
            custom_epoch: parse_var(&lookup, ENV_EPOCH)?,
        })
    }
}

fn parse_var<F, V>(lookup: &F, key: &'static str) -> Result<Option<V>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    V: core::str::FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
