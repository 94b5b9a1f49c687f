//! Snowflake-style 64-bit IDs for a single worker that stay monotonic when the
//! system clock moves backwards.
//!
//! Each [`SkewflakeId`] packs a millisecond timestamp (relative to
//! [`SKEWFLAKE_EPOCH`]), an 8-bit worker ID and a 12-bit sequence:
//!
//! ```text
//!  Bit Index:  63           63 62            20 19             12 11             0
//!              +--------------+----------------+-----------------+---------------+
//!  Field:      | reserved (1) | timestamp (43) | worker ID (8)   | sequence (12) |
//!              +--------------+----------------+-----------------+---------------+
//!              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
//! ```
//!
//! When a generator observes the clock going backwards it keeps issuing IDs
//! from a *virtual* clock that continues from the last timestamp it used, and
//! then pays the difference back down as real time catches up.
//!
//! ```
//! use skewflake::{LockSkewflakeGenerator, SystemClock};
//!
//! let generator = LockSkewflakeGenerator::new(7, SystemClock).unwrap();
//! let a = generator.next_id();
//! let b = generator.next_id();
//!
//! assert!(a < b);
//! assert_eq!(a.worker_id(), 7);
//! ```
mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
