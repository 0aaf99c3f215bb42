use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use transport_catalogue::io::{json, text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Parser)]
struct Args {
    /// Path to the request document, or `-` for stdin
    input: PathBuf,
    /// Input format, inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Indent JSON output
    #[arg(long)]
    pretty: bool,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn format(&self) -> Format {
        self.format.unwrap_or_else(|| {
            match self.input.extension().and_then(|ext| ext.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
                _ => Format::Text,
            }
        })
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if self.input.as_os_str() == "-" {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        } else {
            fs::read_to_string(&self.input)
                .with_context(|| format!("Failed to read {}", self.input.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let now = Instant::now();
    let input = args.read_input()?;
    info!("Read input in {:?}", now.elapsed());

    let now = Instant::now();
    match args.format() {
        Format::Json => {
            let responses = json::process(&input)?;
            let output = if args.pretty {
                serde_json::to_string_pretty(&responses)
            } else {
                serde_json::to_string(&responses)
            }
            .context("Failed to serialize responses")?;
            println!("{output}");
        }
        Format::Text => {
            for line in text::process(input.as_bytes())? {
                println!("{line}");
            }
        }
    }
    info!("Answered requests in {:?}", now.elapsed());

    Ok(())
}
