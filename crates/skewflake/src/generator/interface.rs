use crate::{Result, SkewflakeId, TimeSource};

/// A minimal interface for generating rollback-tolerant Snowflake IDs.
pub trait SkewflakeGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a new generator for `worker_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` does not fit in the
    /// worker field.
    ///
    /// [`Error::InvalidWorkerId`]: crate::Error::InvalidWorkerId
    fn new(worker_id: u64, time: T) -> Result<Self>;

    /// Generates the next ID.
    ///
    /// This is the infallible counterpart to
    /// [`SkewflakeGenerator::try_next_id`]. A backwards clock is absorbed, and
    /// an exhausted sequence either advances the virtual clock or spins until
    /// the next millisecond.
    ///
    /// # Panics
    ///
    /// Panics if the time source reports a time that cannot be encoded (before
    /// the epoch, or past the end of the timestamp field).
    fn next_id(&self) -> SkewflakeId {
        match self.try_next_id() {
            Ok(id) => id,
            Err(e) => panic!("time source fault: {e}"),
        }
    }

    /// Generates the next ID, surfacing time source faults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] or [`Error::TimestampOverflow`] if
    /// the virtual time cannot be encoded. The generator state is unchanged
    /// in that case.
    ///
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    fn try_next_id(&self) -> Result<SkewflakeId>;

    /// The worker ID embedded in every generated ID.
    fn worker_id(&self) -> u64;

    /// How far, in milliseconds, the virtual clock currently runs ahead of
    /// the time source.
    fn clock_offset(&self) -> u64;

    /// The virtual timestamp (ms since the Unix epoch) of the last ID, or `-1`
    /// before the first one.
    fn last_timestamp(&self) -> i64;
}
