//! # Binary: Stream Relay
//!
//! ## Responsibility
//! Subscribes to the configured topic and prints every record to the console
//! in numbered batches until the source ends or Ctrl-C is pressed.
//!
//! ## Usage
//! ```bash
//! cargo run --bin dexstream-relay
//! cargo run --bin dexstream-relay -- --config dexstream.toml
//! cargo run --bin dexstream-relay -- --print-schema > dexstream.schema.json
//! DEXSTREAM_BROKER_URL=nats://localhost:4222 cargo run --bin dexstream-relay
//! ```
//!
//! ## Guarantees
//! - Records already buffered at Ctrl-C are still printed
//! - Logs go to stderr; stdout carries only relayed records
//! - Connection failures exit non-zero with the error on stderr

use std::path::PathBuf;

use tracing::{info, warn};

use dexstream::config::{export_schema, loader};
use dexstream::{init_tracing_with, ConsoleSink, DexError, NatsSource, Relay};

/// CLI arguments for the relay binary.
struct CliArgs {
    /// Optional TOML config file.
    config: Option<PathBuf>,
    /// Print the config JSON Schema and exit.
    print_schema: bool,
    /// Print usage and exit.
    help: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config: None,
        print_schema: false,
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i < args.len() {
                    cli.config = Some(PathBuf::from(&args[i]));
                }
            }
            "--print-schema" => cli.print_schema = true,
            "--help" | "-h" => cli.help = true,
            _ => {} // Ignore unknown args
        }
        i += 1;
    }

    cli
}

const USAGE: &str = "\
usage: dexstream-relay [--config <file>] [--print-schema]

  --config <file>   TOML configuration (defaults apply when omitted)
  --print-schema    print the configuration JSON Schema and exit

env: DEXSTREAM_BROKER_URL overrides relay.broker_url
     LOG_FORMAT=json|pretty, RUST_LOG=<filter>";

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c, relay runs until the source ends");
        std::future::pending::<()>().await;
    }
}

async fn run(cli: CliArgs) -> Result<(), DexError> {
    let config = loader::resolve(cli.config.as_deref())?;

    let format = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| config.observability.log_format.as_str().to_string());
    init_tracing_with(&format, true)?;

    let relay = Relay::new(&config.relay);
    let source = NatsSource::connect(relay.broker_url()).await?;
    let records = source.subscribe(relay.topic()).await?;

    let mut sink = ConsoleSink::stdout();
    let stats = relay
        .run_until(records, &mut sink, shutdown_signal())
        .await?;

    info!(
        batches = stats.batches,
        records = stats.records,
        "relay finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = parse_args();

    if cli.help {
        println!("{USAGE}");
        return;
    }

    if cli.print_schema {
        match export_schema() {
            Ok(schema) => println!("{schema}"),
            Err(e) => {
                eprintln!("dexstream-relay: schema export failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = run(cli).await {
        eprintln!("dexstream-relay: {e}");
        std::process::exit(1);
    }
}
