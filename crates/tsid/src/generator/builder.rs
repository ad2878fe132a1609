use crate::{
    ConfigError, Error, FactoryConfig, FastRandom, MAX_NODE_BITS, RandomSource, SystemClock,
    TSID_EPOCH, TimeSource, TsidFactory, generator::State, node_mask,
};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Validates configuration and assembles a [`TsidFactory`].
///
/// Defaults: `node_bits = 0`, `node = 0`, epoch [`TSID_EPOCH`], the
/// [`SystemClock`] and a [`FastRandom`] seeded from the current time.
///
/// The clock and random source are type parameters, so replacing one changes
/// the builder's type:
///
/// ```
/// use tsid::{CryptoRandom, TsidFactoryBuilder, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1_700_000_000_000
///     }
/// }
///
/// let factory = TsidFactoryBuilder::new()
///     .with_clock(FixedTime)
///     .with_random(CryptoRandom)
///     .build()
///     .unwrap();
/// let id = factory.generate().unwrap();
/// assert_eq!(id.unix_millis(), 1_700_000_000_000);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct TsidFactoryBuilder<T = SystemClock, R = FastRandom> {
    node: u32,
    node_bits: u32,
    custom_epoch: i64,
    clock: T,
    random: R,
}

impl Default for TsidFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TsidFactoryBuilder {
    pub fn new() -> Self {
        Self {
            node: 0,
            node_bits: 0,
            custom_epoch: TSID_EPOCH,
            clock: SystemClock,
            random: FastRandom::new(),
        }
    }

    /// Builds the process-wide default factory from this configuration, or
    /// returns the existing one if it was already initialized.
    ///
    /// Only the first successful initialization applies its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if this configuration is invalid and no
    /// default factory exists yet.
    pub fn build_global(self) -> Result<&'static TsidFactory, Error> {
        crate::generator::global::install(self)
    }
}

impl<T, R> TsidFactoryBuilder<T, R> {
    /// Sets the node id. Must fit in `node_bits` bits.
    pub fn with_node(mut self, node: u32) -> Self {
        self.node = node;
        self
    }

    /// Sets the node width (`0..=20`). The counter gets the remaining bits.
    pub fn with_node_bits(mut self, node_bits: u32) -> Self {
        self.node_bits = node_bits;
        self
    }

    /// Sets the epoch, in Unix milliseconds, that time is measured from.
    pub fn with_custom_epoch(mut self, custom_epoch: i64) -> Self {
        self.custom_epoch = custom_epoch;
        self
    }

    /// Applies every field that is set in `config`.
    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        if let Some(node) = config.node {
            self.node = node;
        }
        if let Some(node_bits) = config.node_bits {
            self.node_bits = node_bits;
        }
        if let Some(custom_epoch) = config.custom_epoch {
            self.custom_epoch = custom_epoch;
        }
        self
    }

    /// Replaces the clock.
    pub fn with_clock<T2: TimeSource>(self, clock: T2) -> TsidFactoryBuilder<T2, R> {
        TsidFactoryBuilder {
            node: self.node,
            node_bits: self.node_bits,
            custom_epoch: self.custom_epoch,
            clock,
            random: self.random,
        }
    }

    /// Replaces the random source.
    pub fn with_random<R2: RandomSource>(self, random: R2) -> TsidFactoryBuilder<T, R2> {
        TsidFactoryBuilder {
            node: self.node,
            node_bits: self.node_bits,
            custom_epoch: self.custom_epoch,
            clock: self.clock,
            random,
        }
    }
}

impl<T, R> TsidFactoryBuilder<T, R>
where
    T: TimeSource,
    R: RandomSource,
{
    /// Validates the configuration and creates the factory.
    ///
    /// The clock is read once to initialize the last emitted time, and the
    /// counter is seeded from the random source.
    ///
    /// # Errors
    /// - [`Error::Config`] if `node_bits` exceeds 20 or `node` does not fit
    ///   in `node_bits`.
    /// - [`Error::Random`] if seeding the counter fails.
    pub fn build(self) -> Result<TsidFactory<T, R>, Error> {
        self.validate()?;

        let Self {
            node,
            node_bits,
            custom_epoch,
            clock,
            mut random,
        } = self;

        let counter = random.next_bits(crate::counter_bits(node_bits))?;
        let last_time = clock.current_millis();

        #[cfg(feature = "tracing")]
        debug!(node, node_bits, custom_epoch, "built tsid factory");

        let state = State {
            last_time,
            counter,
            random,
        };
        Ok(TsidFactory::from_state(
            state,
            clock,
            node,
            node_bits,
            custom_epoch,
        ))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.node_bits > MAX_NODE_BITS {
            return Err(ConfigError::NodeBitsOutOfRange {
                node_bits: self.node_bits,
                max: MAX_NODE_BITS,
            });
        }
        let max = node_mask(self.node_bits);
        if self.node > max {
            return Err(ConfigError::NodeOutOfRange {
                node: self.node,
                max,
            });
        }
        Ok(())
    }
}
