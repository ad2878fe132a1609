use crate::{
    Error, FastRandom, RANDOM_BITS, RandomSource, SystemClock, TIME_MASK, TimeSource, Tsid,
    TsidFactoryBuilder, generator::Mutex,
};
use alloc::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{instrument, trace};

pub(crate) struct State<R> {
    pub(crate) last_time: i64,
    pub(crate) counter: u32,
    pub(crate) random: R,
}

/// A thread-safe TSID factory.
///
/// The factory keeps the last emitted time and counter behind an
/// [`Arc<Mutex<_>>`]. Clones share that state, so clones of one factory
/// never emit the same id.
///
/// Every call to [`TsidFactory::generate`] reads the clock and then, under
/// the lock:
///
/// - if the clock has not moved past the last emitted time (a burst within
///   one millisecond, or the clock went backwards), increments the counter
///   and keeps the last time. A counter overflow carries into the time
///   field, pushing it one millisecond ahead of the clock.
/// - otherwise draws a fresh random counter and adopts the clock's time.
///
/// The emitted time field therefore never decreases, and the ids of a single
/// factory are strictly increasing.
///
/// Build one with [`TsidFactoryBuilder`].
///
/// # Example
/// ```
/// use tsid::TsidFactoryBuilder;
///
/// let factory = TsidFactoryBuilder::new()
///     .with_node_bits(10)
///     .with_node(500)
///     .build()
///     .unwrap();
///
/// let a = factory.generate().unwrap();
/// let b = factory.generate().unwrap();
/// assert!(a < b);
/// assert_eq!(a.node(10), 500);
/// ```
pub struct TsidFactory<T = SystemClock, R = FastRandom> {
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<State<R>>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<State<R>>>,
    pub(crate) clock: T,
    pub(crate) node: u32,
    pub(crate) node_bits: u32,
    pub(crate) counter_bits: u32,
    pub(crate) counter_mask: u32,
    pub(crate) custom_epoch: i64,
}

impl TsidFactory {
    /// Returns a builder with the default clock and random source.
    #[must_use]
    pub fn builder() -> TsidFactoryBuilder {
        TsidFactoryBuilder::new()
    }
}

impl<T, R> TsidFactory<T, R>
where
    T: TimeSource,
    R: RandomSource,
{
    pub(crate) fn from_state(
        state: State<R>,
        clock: T,
        node: u32,
        node_bits: u32,
        custom_epoch: i64,
    ) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            clock,
            node,
            node_bits,
            counter_bits: crate::counter_bits(node_bits),
            counter_mask: crate::counter_mask(node_bits),
            custom_epoch,
        }
    }

    /// Generates the next id.
    ///
    /// # Errors
    /// - [`Error::Random`] if the random source fails. Nothing is emitted and
    ///   the state is left as it was, so the call can be retried.
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Tsid, Error> {
        let now = self.clock.current_millis();

        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let (time, counter) = if now <= state.last_time {
            self.same_or_earlier_millis(now, state.last_time, state.counter)
        } else {
            (now, state.random.next_bits(self.counter_bits)?)
        };

        state.last_time = time;
        state.counter = counter;
        Ok(self.pack(time, counter))
    }

    /// Increment path. The counter is at most 22 bits wide so the increment
    /// cannot overflow `u32`.
    #[inline]
    fn same_or_earlier_millis(&self, now: i64, last_time: i64, counter: u32) -> (i64, u32) {
        let next = counter + 1;
        let carry = next >> self.counter_bits;

        #[cfg(feature = "tracing")]
        {
            if now < last_time {
                trace!(now, last_time, "clock behind last emitted time");
            }
            if carry != 0 {
                trace!(last_time, "counter overflow, advancing time");
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = now;

        (last_time + i64::from(carry), next & self.counter_mask)
    }

    fn pack(&self, time: i64, counter: u32) -> Tsid {
        let elapsed = (time.wrapping_sub(self.custom_epoch) as u64) & TIME_MASK;
        let random = (u64::from(self.node) << self.counter_bits) | u64::from(counter);
        Tsid::from_number(((elapsed << RANDOM_BITS) | random) as i64)
    }

    /// The node id encoded in every id.
    pub const fn node(&self) -> u32 {
        self.node
    }

    /// Width of the node field.
    pub const fn node_bits(&self) -> u32 {
        self.node_bits
    }

    /// Width of the counter field, `22 - node_bits`.
    pub const fn counter_bits(&self) -> u32 {
        self.counter_bits
    }

    /// Epoch, in Unix milliseconds, that the time field is measured from.
    pub const fn custom_epoch(&self) -> i64 {
        self.custom_epoch
    }

    /// The clock this factory reads.
    pub const fn clock(&self) -> &T {
        &self.clock
    }
}

impl<T: Clone, R> Clone for TsidFactory<T, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: self.clock.clone(),
            node: self.node,
            node_bits: self.node_bits,
            counter_bits: self.counter_bits,
            counter_mask: self.counter_mask,
            custom_epoch: self.custom_epoch,
        }
    }
}

impl<T: core::fmt::Debug, R> core::fmt::Debug for TsidFactory<T, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TsidFactory")
            .field("clock", &self.clock)
            .field("node", &self.node)
            .field("node_bits", &self.node_bits)
            .field("counter_bits", &self.counter_bits)
            .field("custom_epoch", &self.custom_epoch)
            .finish_non_exhaustive()
    }
}
