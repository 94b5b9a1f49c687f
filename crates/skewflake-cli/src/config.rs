use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use skewflake::SkewflakeId;

/// Upper bound on `generate --count`, so a typo can't stream forever.
pub const MAX_COUNT: usize = 100_000_000;

/// Command-line arguments for the `skewflake` binary.
///
/// Global settings can also come from environment variables or a `.env` file
/// in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skewflake",
    version,
    about = "Generate and decode rollback-tolerant Snowflake IDs"
)]
pub struct CliArgs {
    /// Worker ID embedded in generated IDs (0-255).
    ///
    /// Each concurrently running generator must use its own worker ID; this
    /// tool does not coordinate them.
    ///
    /// Environment variable: `SKEWFLAKE_WORKER_ID`
    #[arg(long, env = "SKEWFLAKE_WORKER_ID", default_value_t = 0, global = true)]
    pub worker_id: u64,

    /// Output format.
    ///
    /// Environment variable: `SKEWFLAKE_FORMAT`
    #[arg(
        long,
        value_enum,
        env = "SKEWFLAKE_FORMAT",
        default_value_t = Format::Text,
        global = true
    )]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate new IDs, one per line.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print the fields packed into existing IDs.
    Decode {
        /// IDs in decimal form.
        #[arg(required = true)]
        ids: Vec<SkewflakeId>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub worker_id: u64,
    pub format: Format,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let max_worker_id = SkewflakeId::max_worker_id();
        if args.worker_id > max_worker_id {
            bail!(
                "SKEWFLAKE_WORKER_ID ({}) exceeds the worker ID space (max = {})",
                args.worker_id,
                max_worker_id
            );
        }

        if let Command::Generate { count } = args.command {
            if count == 0 {
                bail!("--count must be greater than 0");
            }
            if count > MAX_COUNT {
                bail!("--count ({count}) exceeds the maximum of {MAX_COUNT}");
            }
        }

        Ok(Self {
            worker_id: args.worker_id,
            format: args.format,
            command: args.command,
        })
    }
}
