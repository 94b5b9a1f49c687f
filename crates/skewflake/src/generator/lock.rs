use std::sync::Arc;

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, SkewflakeId, SystemClock, TimeSource,
    generator::{SkewflakeGenerator, state::GeneratorState},
};

/// A lock-based generator suitable for multi-threaded environments.
///
/// The state is wrapped in an [`Arc<Mutex<_>>`]: the whole read-clock,
/// compensate, bump-sequence step runs under the lock, so concurrent callers
/// are served one at a time. Clones share the same state and therefore the
/// same ID stream.
///
/// When a sequence is exhausted and there is no clock offset to borrow
/// against, the caller spins *while holding the lock* until the clock reaches
/// the next millisecond. Other callers queue behind it.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Compensates for backwards clock jumps
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicSkewflakeGenerator`]
///
/// [`BasicSkewflakeGenerator`]: crate::BasicSkewflakeGenerator
#[derive(Clone)]
pub struct LockSkewflakeGenerator<T>
where
    T: TimeSource,
{
    state: Arc<Mutex<GeneratorState>>,
    time: T,
}

impl<T> LockSkewflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockSkewflakeGenerator`] for `worker_id`.
    ///
    /// # Parameters
    ///
    /// - `worker_id`: Identity of this generator, `0..=255`. Uniqueness is only
    ///   guaranteed among generators with distinct worker IDs; assigning them
    ///   is up to the deployment.
    /// - `time`: A [`TimeSource`] implementation, usually [`SystemClock`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` exceeds
    /// [`SkewflakeId::max_worker_id`].
    ///
    /// # Example
    /// ```
    /// use skewflake::{Error, LockSkewflakeGenerator, SystemClock};
    ///
    /// assert!(LockSkewflakeGenerator::new(255, SystemClock).is_ok());
    /// assert!(matches!(
    ///     LockSkewflakeGenerator::new(256, SystemClock),
    ///     Err(Error::InvalidWorkerId { .. })
    /// ));
    /// ```
    ///
    /// [`Error::InvalidWorkerId`]: crate::Error::InvalidWorkerId
    pub fn new(worker_id: u64, time: T) -> Result<Self> {
        Ok(Self {
            state: Arc::new(Mutex::new(GeneratorState::new(worker_id)?)),
            time,
        })
    }

    /// Generates a new ID.
    ///
    /// # Panics
    ///
    /// Panics if the time source reports a time that cannot be encoded. See
    /// [`Self::try_next_id`].
    ///
    /// # Example
    /// ```
    /// use skewflake::{LockSkewflakeGenerator, SystemClock};
    ///
    /// let generator = LockSkewflakeGenerator::new(3, SystemClock).unwrap();
    /// let id = generator.next_id();
    /// assert_eq!(id.worker_id(), 3);
    /// ```
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
        self.state.lock().next_id(&self.time)
    }

    /// Returns the worker ID embedded in every generated ID.
    pub fn worker_id(&self) -> u64 {
        self.state.lock().worker_id()
    }

    /// Returns how many milliseconds the virtual clock currently runs ahead
    /// of the time source. Zero when no rollback is being compensated.
    pub fn clock_offset(&self) -> u64 {
        self.state.lock().clock_offset()
    }

    /// Returns the virtual timestamp (ms since the Unix epoch) of the last
    /// generated ID, or `-1` before the first one.
    pub fn last_timestamp(&self) -> i64 {
        self.state.lock().last_virtual_ts()
    }
}

impl LockSkewflakeGenerator<SystemClock> {
    /// Creates a generator reading the operating system's wall clock.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_system_clock(worker_id: u64) -> Result<Self> {
        Self::new(worker_id, SystemClock)
    }
}

impl<T> SkewflakeGenerator<T> for LockSkewflakeGenerator<T>
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
