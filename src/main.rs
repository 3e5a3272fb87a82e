//! ECLAT frequent itemset miner.
//!
//! Usage:
//!   eclat --dataset retail.csv                      # mine at 10% support
//!   eclat --dataset retail.csv -m 0.05 --patterns   # print the itemsets
//!   eclat --dataset retail.csv --stats --header     # CSV stats output
//!   eclat --dataset retail.csv --backend bitvec

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use itertools::Itertools;
use tracing::{debug, info};

use eclat::bitmap::TidBitmap;
use eclat::bitset::BitsetBag;
use eclat::eclat::mine;
use eclat::error::{EclatError, Result};
use eclat::itemtree::ItemTree;
use eclat::loader::read_transactions;
use eclat::stats::{csv_row, StatRecorder, TreeSummary, CSV_HEADER};

#[derive(Parser, Debug)]
#[command(name = "eclat", about = "ECLAT frequent itemset mining over vertical bitmaps")]
struct Cli {
    /// Dataset file: one transaction per line, numeric item ids separated
    /// by spaces, commas, or tabs.
    #[arg(short, long, required_unless_present = "header")]
    dataset: Option<PathBuf>,

    /// Minimum support as a fraction of the transaction count, in (0, 1].
    #[arg(short, long, default_value = "0.1")]
    min_support: f64,

    /// Fraction of transactions to read from the start, in (0, 1].
    #[arg(short, long, default_value = "1.0")]
    frac: f64,

    /// Bitmap backend.
    #[arg(short, long, value_enum, default_value = "roaring")]
    backend: Backend,

    /// Print the frequent itemset tree.
    #[arg(short, long)]
    patterns: bool,

    /// Print a CSV stats row (time, memory, tree summary).
    #[arg(short, long)]
    stats: bool,

    /// Print the CSV stats header.
    #[arg(short = 'H', long)]
    header: bool,

    /// Verbose progress output on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Backend {
    Roaring,
    Bitvec,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "eclat=debug" } else { "eclat=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("eclat: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.min_support <= 0.0 || cli.min_support > 1.0 {
        return Err(EclatError::Config(format!(
            "invalid minimum support {}",
            cli.min_support
        )));
    }
    if cli.frac <= 0.0 || cli.frac > 1.0 {
        return Err(EclatError::Config(format!(
            "invalid transaction fraction {}",
            cli.frac
        )));
    }

    if cli.header {
        println!("{}", CSV_HEADER);
    }

    let Some(dataset) = &cli.dataset else {
        return Ok(());
    };

    match cli.backend {
        Backend::Roaring => run_mine::<roaring::RoaringBitmap>(cli, dataset),
        Backend::Bitvec => run_mine::<bitvec::vec::BitVec>(cli, dataset),
    }
}

fn run_mine<B: TidBitmap>(cli: &Cli, dataset: &std::path::Path) -> Result<()> {
    info!("reading {:.1}% of {}", cli.frac * 100.0, dataset.display());
    let bag = read_transactions(dataset, cli.frac)?;
    let min_support = (cli.min_support * bag.len() as f64).ceil() as u64;
    info!(
        "{} transactions, minimum support {:.1}% = {}",
        bag.len(),
        cli.min_support * 100.0,
        min_support
    );

    let mut recorder = StatRecorder::new();
    recorder.start();

    let bitsets = BitsetBag::<B>::build(&bag);
    drop(bag);
    let mut tree = ItemTree::build_roots(bitsets, min_support);
    mine(&mut tree, min_support);

    recorder.stop();

    if cli.verbose {
        for (itemset, support) in tree.itemsets() {
            debug!("{} ({})", itemset.iter().join(" "), support);
        }
    }

    if cli.patterns {
        let stdout = std::io::stdout();
        tree.print(&mut stdout.lock())?;
    }

    if cli.stats {
        let summary = TreeSummary::of(&tree);
        println!("{}", csv_row(&recorder, &summary));
    }

    Ok(())
}
