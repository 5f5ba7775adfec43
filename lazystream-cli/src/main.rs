use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod records;

use records::{GroupSpec, load_records, render, run_count, run_group};

#[derive(Parser, Debug)]
#[command(name = "lazystream")]
#[command(about = "Group JSON-lines records by key", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print `{key: [value, ...]}` in first-seen key order.
    Group {
        /// Path of the key field, e.g. `age` or `address.city` or `tags[0]`.
        #[arg(long)]
        key: String,
        /// Floor-divide integer keys by this width.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        bucket: Option<i64>,
        /// Path of the value kept per record; the whole record when absent.
        #[arg(long)]
        project: Option<String>,
        /// Read from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print `{key: count}` in first-seen key order.
    Count {
        #[arg(long)]
        key: String,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        bucket: Option<i64>,
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let (output, pretty) = match cli.command {
        Commands::Group {
            key,
            bucket,
            project,
            input,
            pretty,
        } => {
            let spec = GroupSpec::new(&key, bucket, project.as_deref())?;
            (run_group(&spec, load_records(input.as_deref())?)?, pretty)
        }
        Commands::Count { key, bucket, input } => {
            let spec = GroupSpec::new(&key, bucket, None)?;
            (run_count(&spec, load_records(input.as_deref())?)?, false)
        }
    };

    let text = render(&output, pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write output")?;
    Ok(())
}
