//! Reads `name,left,right` scale records and prints `name,left,right` corrections.

use clap::Parser;
use scales::scales::balance;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scales")]
#[command(about = "Work out the weight each pan needs for every scale to balance")]
struct Cli {
    /// Input file, or `-` for stdin
    input: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scales=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let in_ = match read_input(cli.input.as_ref()) {
        Ok(in_) => in_,
        Err(e) => {
            error!("Failed to read input: {}", e);
            process::exit(1);
        }
    };

    let report = match balance(&in_) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!("Balanced {} scales", report.0.len());
    for row in &report.0 {
        println!("{}", row);
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    let mut in_ = String::new();
    match path {
        Some(path) if path.as_os_str() != "-" => {
            File::open(path)?.read_to_string(&mut in_)?;
        }
        _ => {
            io::stdin().read_to_string(&mut in_)?;
        }
    }
    Ok(in_)
}
