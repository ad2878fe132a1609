use crate::{ConfigError, DecodeError, RandomError};
use core::fmt;

/// All error variants that `tsid` can emit.
///
/// When the `parking-lot` feature is enabled mutexes do not poison, so the
/// `LockPoisoned` variant is not available.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The factory configuration was rejected. No factory was created.
    Config(ConfigError),

    /// The random source failed while drawing a counter. No id was produced
    /// and the factory state is unchanged.
    Random(RandomError),

    /// A string or byte slice could not be decoded into a [`Tsid`].
    ///
    /// [`Tsid`]: crate::Tsid
    Decode(DecodeError),

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the factory lock, for
    /// instance inside a user-supplied random source.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => fmt::Display::fmt(e, f),
            Self::Random(e) => fmt::Display::fmt(e, f),
            Self::Decode(e) => fmt::Display::fmt(e, f),
            #[cfg(not(feature = "parking-lot"))]
            Self::LockPoisoned => f.write_str("factory lock poisoned"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Random(e) => Some(e),
            Self::Decode(e) => Some(e),
            #[cfg(not(feature = "parking-lot"))]
            Self::LockPoisoned => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RandomError> for Error {
    fn from(e: RandomError) -> Self {
        Self::Random(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
