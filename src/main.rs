// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up diagnostic logging (RUST_LOG, stderr)
// 2. Parse command-line arguments and the CI variable into a Config
// 3. Run one Session: extract routes, scan links, validate, probe
// 4. Print the report (text or JSON)
// 5. Exit 0 when nothing is broken, 1 otherwise (including fatal errors)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - internal validation and external probing
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - run configuration and defaults
mod report; // src/report.rs - final report and exit code
mod routes; // src/routes/ - route extraction from the routing tree
mod scan; // src/scan/ - link extraction from the source tree
mod session; // src/session.rs - one run, start to finish

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use tracing_subscriber::EnvFilter;

use checker::HttpTransport;
use cli::Cli;
use session::Session;

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Anything that reaches here is unexpected; fail the build
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with the report or --json output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let ci = config::is_ci(std::env::var("CI").ok().as_deref());
    let config = cli.to_config(ci).context("invalid configuration")?;

    let transport =
        HttpTransport::new(&config.user_agent).context("failed to create HTTP client")?;

    if !cli.json {
        println!("🔍 Checking links under {}", config.src_dir.display());
        if config.skip_external {
            println!("⏭️  External links will not be probed");
        }
        println!();
    }

    let report = Session::new(&config).run(&transport).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    Ok(report.exit_code())
}
