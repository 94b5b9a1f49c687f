use core::{fmt, str::FromStr};

use crate::{Error, SKEWFLAKE_EPOCH};

/// A 64-bit Snowflake ID with an 8-bit worker field.
///
/// - 1 bit reserved (always zero, so the value fits in an `i64`)
/// - 43 bits timestamp (ms since [`SKEWFLAKE_EPOCH`])
/// - 8 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            20 19             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (43) | worker ID (8)   | sequence (12) |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
///
/// Ordering follows the raw integer, which is the same as ordering by
/// `(timestamp, worker_id, sequence)`.
///
/// [`SKEWFLAKE_EPOCH`]: crate::SKEWFLAKE_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SkewflakeId {
    id: u64,
}

impl SkewflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 63 - Self::WORKER_ID_BITS - Self::SEQUENCE_BITS;

    /// Width of the worker ID field.
    pub const WORKER_ID_BITS: u32 = 8;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 43-bit timestamp field. Occupies bits 20
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 8-bit worker ID field. Occupies bits 12
    /// through 19.
    pub const WORKER_ID_MASK: u64 = (1 << Self::WORKER_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 20).
    pub const TIMESTAMP_SHIFT: u32 = Self::WORKER_ID_SHIFT + Self::WORKER_ID_BITS;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Packs the three fields into an ID. Each field is masked to its width.
    pub const fn from_components(timestamp: u64, worker_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | sequence,
        }
    }

    /// Wraps a raw integer without validation. See [`Self::is_valid`].
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw packed integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp (ms since [`SKEWFLAKE_EPOCH`]).
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// The embedded timestamp converted back to milliseconds since the Unix
    /// epoch.
    pub const fn unix_millis(&self) -> i64 {
        self.timestamp() as i64 + SKEWFLAKE_EPOCH
    }

    /// Returns the maximum representable timestamp value based on
    /// [`Self::TIMESTAMP_BITS`].
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum representable worker ID value based on
    /// [`Self::WORKER_ID_BITS`].
    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    /// Returns the maximum representable sequence value based on
    /// [`Self::SEQUENCE_BITS`].
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns `true` if the reserved sign bit is clear.
    pub const fn is_valid(&self) -> bool {
        self.id >> 63 == 0
    }

    /// Returns the ID as a zero-padded 19-digit string, which sorts
    /// lexicographically in the same order as the IDs.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl From<SkewflakeId> for u64 {
    fn from(id: SkewflakeId) -> Self {
        id.to_raw()
    }
}

/// Reinterprets the raw bits as a signed integer.
///
/// IDs from a generator, [`FromStr`] or serde always have the reserved bit
/// clear and convert to a non-negative value. An unvalidated
/// [`SkewflakeId::from_raw`] value with the reserved bit set wraps to a
/// negative one; check [`SkewflakeId::is_valid`] first if that matters.
impl From<SkewflakeId> for i64 {
    fn from(id: SkewflakeId) -> Self {
        id.to_raw() as i64
    }
}

impl fmt::Display for SkewflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SkewflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for SkewflakeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|e| Error::ParseId(format!("{s:?}: {e}")))?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(Error::ParseId(format!("{s:?}: reserved bit is set")));
        }
        Ok(id)
    }
}
