use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, SkewflakeId, TimeSource,
    generator::{SkewflakeGenerator, state::GeneratorState},
};

/// A non-concurrent generator suitable for single-threaded environments.
///
/// The state lives in a [`Cell`], so the generator is cheap but **not
/// thread-safe**.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Compensates for backwards clock jumps
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSkewflakeGenerator`]
///
/// [`LockSkewflakeGenerator`]: crate::LockSkewflakeGenerator
pub struct BasicSkewflakeGenerator<T>
where
    T: TimeSource,
{
    state: Cell<GeneratorState>,
    time: T,
}

impl<T> BasicSkewflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicSkewflakeGenerator`] for `worker_id`, reading time
    /// from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` exceeds
    /// [`SkewflakeId::max_worker_id`].
    ///
    /// # Example
    /// ```
    /// use skewflake::{BasicSkewflakeGenerator, SystemClock};
    ///
    /// let generator = BasicSkewflakeGenerator::new(0, SystemClock).unwrap();
    /// let id = generator.next_id();
    /// assert_eq!(id.worker_id(), 0);
    /// ```
    ///
    /// [`Error::InvalidWorkerId`]: crate::Error::InvalidWorkerId
    pub fn new(worker_id: u64, time: T) -> Result<Self> {
        Ok(Self {
            state: Cell::new(GeneratorState::new(worker_id)?),
            time,
        })
    }

    /// Generates a new ID.
    ///
    /// # Panics
    ///
    /// Panics if the time source reports a time that cannot be encoded. See
    /// [`Self::try_next_id`].
    pub fn next_id(&self) -> SkewflakeId {
        match self.try_next_id() {
            Ok(id) => id,
            Err(e) => panic!("time source fault: {e}"),
        }
    }

    /// Generates a new ID, surfacing time source faults instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] or [`Error::TimestampOverflow`];
    /// the generator is left unchanged.
    ///
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<SkewflakeId> {
        let mut state = self.state.get();
        let id = state.next_id(&self.time)?;
        self.state.set(state);
        Ok(id)
    }

    /// Returns the worker ID embedded in every generated ID.
    pub fn worker_id(&self) -> u64 {
        self.state.get().worker_id()
    }

    /// Returns how many milliseconds the virtual clock currently runs ahead
    /// of the time source. Zero when no rollback is being compensated.
    pub fn clock_offset(&self) -> u64 {
        self.state.get().clock_offset()
    }

    /// Returns the virtual timestamp (ms since the Unix epoch) of the last
    /// generated ID, or `-1` before the first one.
    pub fn last_timestamp(&self) -> i64 {
        self.state.get().last_virtual_ts()
    }
}

impl<T> SkewflakeGenerator<T> for BasicSkewflakeGenerator<T>
where
    T: TimeSource,
{
    fn new(worker_id: u64, time: T) -> Result<Self> {
        Self::new(worker_id, time)
    }

    fn try_next_id(&self) -> Result<SkewflakeId> {
        self.try_next_id()
    }

    fn worker_id(&self) -> u64 {
        self.worker_id()
    }

    fn clock_offset(&self) -> u64 {
        self.clock_offset()
    }

    fn last_timestamp(&self) -> i64 {
        self.last_timestamp()
    }
}
