//! The process-wide default factory.
//!
//! It is created on first use, lives for the rest of the process and is
//! never torn down. Initialization is serialized so at most one factory is
//! ever built, even when many threads race on first use.

use crate::{Error, FactoryConfig, Tsid, TsidFactory, TsidFactoryBuilder};
use std::sync::{Mutex, OnceLock, PoisonError};

#[cfg(feature = "tracing")]
use tracing::debug;

static GLOBAL: OnceLock<TsidFactory> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Returns the process-wide default factory, building it on first use from
/// [`FactoryConfig::from_env`].
///
/// # Errors
///
/// Returns [`Error::Config`] if the environment holds an invalid
/// configuration and the factory has not been initialized yet.
pub fn global() -> Result<&'static TsidFactory, Error> {
    if let Some(factory) = GLOBAL.get() {
        return Ok(factory);
    }
    let config = FactoryConfig::from_env()?;
    install(TsidFactoryBuilder::new().with_config(config))
}

/// Generates an id from the process-wide default factory.
///
/// # Errors
///
/// See [`global`] and [`TsidFactory::generate`].
///
/// ```
/// let a = tsid::next_tsid().unwrap();
/// let b = tsid::next_tsid().unwrap();
/// assert!(a < b);
/// ```
pub fn next_tsid() -> Result<Tsid, Error> {
    global()?.generate()
}

pub(crate) fn install(builder: TsidFactoryBuilder) -> Result<&'static TsidFactory, Error> {
    // The guard protects no data, so a poisoned lock is still usable.
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(factory) = GLOBAL.get() {
        return Ok(factory);
    }

    let factory = builder.build()?;
    #[cfg(feature = "tracing")]
    debug!(
        node = factory.node(),
        node_bits = factory.node_bits(),
        "initialized global tsid factory"
    );
    Ok(GLOBAL.get_or_init(|| factory))
}
