use std::io::Write;

use serde::{Serialize, Serializer, ser::SerializeSeq};
use skewflake::{LockSkewflakeGenerator, SkewflakeId, SystemClock, TimeSource};
use tracing::{info, warn};

use crate::config::{Command, Config, Format};

/// The decoded view of an ID printed by `decode`.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub id: SkewflakeId,
    pub timestamp: u64,
    pub unix_millis: i64,
    pub worker_id: u64,
    pub sequence: u64,
}

impl From<SkewflakeId> for Decoded {
    fn from(id: SkewflakeId) -> Self {
        Self {
            id,
            timestamp: id.timestamp(),
            unix_millis: id.unix_millis(),
            worker_id: id.worker_id(),
            sequence: id.sequence(),
        }
    }
}

pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Generate { count } => {
            let generator = LockSkewflakeGenerator::new(config.worker_id, SystemClock)?;
            generate(&generator, *count, config.format, out)
        }
        Command::Decode { ids } => decode(ids, config.format, out),
    }
}

pub fn generate<T: TimeSource>(
    generator: &LockSkewflakeGenerator<T>,
    count: usize,
    format: Format,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    info!(worker_id = generator.worker_id(), count, "generating ids");

    match format {
        Format::Text => {
            for _ in 0..count {
                writeln!(out, "{}", generator.try_next_id()?)?;
            }
        }
        Format::Json => {
            // Streamed element by element; `count` may be large.
            let mut serializer = serde_json::Serializer::new(&mut *out);
            let mut seq = (&mut serializer).serialize_seq(Some(count))?;
            for _ in 0..count {
                seq.serialize_element(&generator.try_next_id()?)?;
            }
            seq.end()?;
            writeln!(out)?;
        }
    }

    let offset = generator.clock_offset();
    if offset > 0 {
        warn!(
            clock_offset = offset,
            "finished while still compensating for a clock rollback"
        );
    }
    Ok(())
}

pub fn decode(ids: &[SkewflakeId], format: Format, out: &mut impl Write) -> anyhow::Result<()> {
    for &id in ids {
        let decoded = Decoded::from(id);
        match format {
            Format::Text => writeln!(
                out,
                "{} timestamp={} unix_millis={} worker_id={} sequence={}",
                decoded.id,
                decoded.timestamp,
                decoded.unix_millis,
                decoded.worker_id,
                decoded.sequence
            )?,
            Format::Json => {
                serde_json::to_writer(&mut *out, &decoded)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
