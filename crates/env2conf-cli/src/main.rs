//! `env2conf` CLI: print prefixed environment variables as a config file.
//!
//! ## Usage
//!
//! ```sh
//! # JSON (default) from every variable starting with "config"
//! config.db.host=localhost config.db.port=5432 env2conf
//!
//! # Several prefixes, TOML output
//! env2conf --prefix app,db --output toml
//!
//! # Arrays and arrays of maps
//! 'config.hosts[0]=a' 'config.hosts[1]=b' 'config.users[0].name=alice' env2conf -o yaml
//!
//! # Debug logging on stderr
//! ENV2CONF_LOG=debug env2conf
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use env2conf_core::config::DEFAULT_PREFIX;
use env2conf_core::{Config, Document, Format};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "env2conf",
    version,
    about = "Convert prefixed environment variables into JSON, YAML, or TOML"
)]
struct Cli {
    /// A comma-delimited list of prefixes to parse env vars on
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// The output format: json, yaml, or toml
    #[arg(short, long, default_value_t = Format::Json)]
    output: Format,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::new(&cli.prefix, cli.output);
    debug!(prefixes = ?config.prefixes, format = %config.format, "starting");
    let document = Document::build(&config, env_pairs()).context("Failed to build document")?;
    let text = document
        .render(config.format)
        .with_context(|| format!("Failed to render {}", config.format))?;
    print!("{}", text);
    Ok(())
}

/// Process environment as (key, value) pairs. Entries that are not valid
/// UTF-8 are skipped.
fn env_pairs() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Install a stderr subscriber when `ENV2CONF_LOG` or `RUST_LOG` is set.
///
/// `ENV2CONF_LOG` takes precedence and uses the same syntax as `RUST_LOG`.
fn init_tracing() {
    let filter = match std::env::var("ENV2CONF_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
