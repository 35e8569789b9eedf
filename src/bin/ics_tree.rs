use std::{
    fs,
    io::{stdin, Read},
    path::PathBuf,
};

use anyhow::{Context, Error};
use clap::Parser as _;
use itertools::Itertools;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use ics_tree::{ColonSplit, EndMatching, ParseOptions, Parser};

/// Print calendar text as a JSON property tree.
#[derive(Debug, clap::Parser)]
#[command(name = "ics_tree", version, about)]
struct Cli {
    /// File to read; stdin if omitted
    path: Option<PathBuf>,

    /// Close each END against the most recently opened block of its type
    #[arg(long)]
    innermost: bool,

    /// Drop everything after a second colon on a line
    #[arg(long)]
    truncate_colons: bool,

    /// Print one tab separated line per event instead of the tree
    #[arg(long)]
    events: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Enable debug output
    #[arg(long, short = 'v')]
    debug: bool,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.innermost {
            options = options.with_end_matching(EndMatching::Innermost);
        }
        if self.truncate_colons {
            options = options.with_colon_split(ColonSplit::Truncate);
        }
        options
    }
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut data = Vec::new();
    match &cli.path {
        Some(path) => {
            data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            stdin().read_to_end(&mut data).context("reading stdin")?;
        }
    }

    let tree = Parser::new(cli.options()).parse_bytes(&data)?;

    if cli.events {
        for event in tree.events() {
            let line = [event.start, event.end, event.summary]
                .iter()
                .map(|field| field.as_deref().unwrap_or("-"))
                .join("\t");
            println!("{}", line);
        }
    } else if cli.compact {
        println!("{}", serde_json::to_string(&tree)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }

    Ok(())
}
