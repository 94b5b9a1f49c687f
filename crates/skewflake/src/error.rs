/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `skewflake` can emit.
///
/// Rolling the clock backwards is *not* an error: the generators absorb it by
/// shifting to a virtual clock. The variants below are either construction
/// failures or faults of the time source itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The worker ID does not fit in the ID's worker field.
    #[error("worker id {worker_id} exceeds the maximum of {max}")]
    InvalidWorkerId {
        /// The rejected worker ID.
        worker_id: u64,
        /// The largest accepted worker ID.
        max: u64,
    },

    /// The time source reported a time before [`SKEWFLAKE_EPOCH`].
    ///
    /// [`SKEWFLAKE_EPOCH`]: crate::SKEWFLAKE_EPOCH
    #[error("clock reads {now}ms since the unix epoch, which is before the id epoch")]
    ClockBeforeEpoch {
        /// The virtual time, in milliseconds since the Unix epoch.
        now: i64,
    },

    /// The elapsed time since the epoch no longer fits in the timestamp field.
    #[error("timestamp {timestamp} does not fit in the id timestamp field")]
    TimestampOverflow {
        /// The offending timestamp, in milliseconds since the id epoch.
        timestamp: i64,
    },

    /// A string could not be parsed into an ID.
    #[error("invalid id: {0}")]
    ParseId(String),
}
