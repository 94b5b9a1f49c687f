#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

use crate::{Error, Result, SKEWFLAKE_EPOCH, SkewflakeId, TimeSource};

/// The mutable state behind a generator.
///
/// `last_virtual_ts` is the virtual time of the previous ID and never moves
/// backwards. `clock_offset` is how far the virtual clock currently runs ahead
/// of the real one: it jumps up when a rollback is observed and is paid back
/// whenever the real clock moves forward again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GeneratorState {
    worker_id: u64,
    sequence: u64,
    last_virtual_ts: i64,
    clock_offset: u64,
}

impl GeneratorState {
    pub(crate) fn new(worker_id: u64) -> Result<Self> {
        if worker_id > SkewflakeId::max_worker_id() {
            return Err(Error::InvalidWorkerId {
                worker_id,
                max: SkewflakeId::max_worker_id(),
            });
        }
        Ok(Self {
            worker_id,
            sequence: 0,
            last_virtual_ts: -1,
            clock_offset: 0,
        })
    }

    pub(crate) const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    pub(crate) const fn clock_offset(&self) -> u64 {
        self.clock_offset
    }

    pub(crate) const fn last_virtual_ts(&self) -> i64 {
        self.last_virtual_ts
    }

    /// Produces the next ID, reading `time` once (more often only while
    /// waiting out an exhausted sequence with no offset outstanding).
    ///
    /// On error `self` is left exactly as it was.
    pub(crate) fn next_id<T: TimeSource>(&mut self, time: &T) -> Result<SkewflakeId> {
        let mut next = *self;
        let now = time.current_millis();

        let mut virtual_ts = now + next.offset();
        if virtual_ts < next.last_virtual_ts {
            virtual_ts = next.do_offset(now);
        } else if next.clock_offset > 0 {
            virtual_ts = next.correct_offset(now);
        }

        next.sequence = if virtual_ts == next.last_virtual_ts {
            next.sequence + 1
        } else {
            0
        };

        if next.sequence > SkewflakeId::max_sequence() {
            if next.clock_offset > 0 {
                // Real time is already behind, so borrow one more millisecond
                // instead of waiting for it.
                virtual_ts += 1;
                next.clock_offset += 1;
                #[cfg(feature = "tracing")]
                trace!(
                    virtual_ts,
                    clock_offset = next.clock_offset,
                    "sequence exhausted, advancing virtual clock"
                );
            } else {
                #[cfg(feature = "tracing")]
                trace!(
                    last = next.last_virtual_ts,
                    "sequence exhausted, waiting for next millisecond"
                );
                virtual_ts = next.wait_next_millis(time);
            }
            next.sequence = 0;
        }

        next.last_virtual_ts = virtual_ts;
        let id = next.encode(virtual_ts)?;
        *self = next;
        Ok(id)
    }

    fn offset(&self) -> i64 {
        self.clock_offset as i64
    }

    /// Adopts the depth of a freshly observed rollback as the new offset.
    ///
    /// The offset is replaced, not added to: it becomes exactly the distance
    /// between the last virtual timestamp and the real clock.
    #[cold]
    #[inline(never)]
    fn do_offset(&mut self, now: i64) -> i64 {
        let depth = self.last_virtual_ts - now;
        if depth > 0 {
            #[cfg(feature = "tracing")]
            warn!(
                now,
                last = self.last_virtual_ts,
                previous_offset = self.clock_offset,
                clock_offset = depth,
                "clock moved backwards, continuing on virtual clock"
            );
            self.clock_offset = depth as u64;
        }
        now + self.offset()
    }

    /// Pays back as much offset as the real clock has advanced past the last
    /// virtual timestamp, without letting virtual time go backwards.
    fn correct_offset(&mut self, now: i64) -> i64 {
        let recoverable = (now - self.last_virtual_ts + self.offset()).min(self.offset());
        if recoverable > 0 {
            self.clock_offset -= recoverable as u64;
        }
        #[cfg(feature = "tracing")]
        if recoverable > 0 && self.clock_offset == 0 {
            debug!(now, "clock offset fully recovered");
        }
        now + self.offset()
    }

    fn wait_next_millis<T: TimeSource>(&self, time: &T) -> i64 {
        let mut now = time.current_millis();
        while now <= self.last_virtual_ts {
            core::hint::spin_loop();
            now = time.current_millis();
        }
        now
    }

    fn encode(&self, virtual_ts: i64) -> Result<SkewflakeId> {
        let timestamp = virtual_ts - SKEWFLAKE_EPOCH;
        if timestamp < 0 {
            return Err(Error::ClockBeforeEpoch { now: virtual_ts });
        }
        if timestamp as u64 > SkewflakeId::max_timestamp() {
            return Err(Error::TimestampOverflow { timestamp });
        }
        Ok(SkewflakeId::from_components(
            timestamp as u64,
            self.worker_id,
            self.sequence,
        ))
    }
}
