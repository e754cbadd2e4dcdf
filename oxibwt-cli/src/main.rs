//! OxiBWT CLI - block transforms from the command line
//!
//! Runs the Burrows-Wheeler transform, move-to-front coding, or both, in
//! either direction over a file or stdin/stdout.

mod utils;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;
use oxibwt_core::channel::{ChannelReader, ChannelWriter};
use oxibwt_core::{Direction, OxiBwtError, Result, StreamTransform};
use oxibwt_transform::{
    BurrowsWheeler, CircularSuffixArray, MoveToFrontCodec, Pipeline, RankingStrategy,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use utils::{describe, init_logging, log_level, open_input, open_output};

#[derive(Parser)]
#[command(name = "oxibwt")]
#[command(
    author,
    version,
    about = "Burrows-Wheeler and move-to-front block transforms"
)]
#[command(long_about = "
OxiBWT applies reversible block transforms used ahead of entropy coding.
Each transform takes a mode: '-' runs it forward, '+' inverts it.

Examples:
  oxibwt bwt - < abra.txt > abra.bwt
  oxibwt bwt + < abra.bwt
  oxibwt mtf - -i abra.bwt -o abra.mtf
  oxibwt pipeline - -i book.txt -o book.pre
  oxibwt pipeline + -i book.pre
  oxibwt rank -i abra.txt
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the reversible transforms.
#[derive(Args, Debug)]
struct TransformArgs {
    /// '-' for the forward transform, '+' for the inverse
    #[arg(value_parser = parse_direction)]
    mode: Direction,

    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Burrows-Wheeler transform of one block
    Bwt(TransformArgs),

    /// Move-to-front coding
    Mtf(TransformArgs),

    /// Burrows-Wheeler transform followed by move-to-front coding
    #[command(alias = "p")]
    Pipeline(TransformArgs),

    /// Print the sorted rotation order of a block, one index per line
    Rank {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Ranking algorithm
        #[arg(short, long, value_enum, default_value = "doubling")]
        strategy: Strategy,
    },
}

/// Rotation ranking algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum Strategy {
    /// Prefix doubling (default)
    #[default]
    Doubling,
    /// Pairwise rotation comparison
    Comparison,
}

impl From<Strategy> for RankingStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Doubling => RankingStrategy::PrefixDoubling,
            Strategy::Comparison => RankingStrategy::Comparison,
        }
    }
}

fn parse_direction(s: &str) -> std::result::Result<Direction, String> {
    s.parse().map_err(|e: OxiBwtError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Bwt(args) => cmd_transform(&BurrowsWheeler, &args),
        Commands::Mtf(args) => cmd_transform(&MoveToFrontCodec, &args),
        Commands::Pipeline(args) => cmd_transform(&Pipeline, &args),
        Commands::Rank { input, strategy } => cmd_rank(input, strategy),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Run a transform over the whole input, then write the result.
///
/// The output is only opened once the transform has succeeded, so a rejected
/// input leaves no partial output behind.
fn cmd_transform<T: StreamTransform>(transform: &T, args: &TransformArgs) -> Result<()> {
    let start = Instant::now();
    let input = args.input.as_deref();
    let output = args.output.as_deref();

    info!(
        "{} {}: {} -> {}",
        transform.name(),
        args.mode,
        describe(input, "<stdin>"),
        describe(output, "<stdout>")
    );

    let mut reader = ChannelReader::new(open_input(input)?);
    let mut buffer = ChannelWriter::new(Vec::new());
    transform.apply(args.mode, &mut reader, &mut buffer)?;
    let consumed = reader.bytes_read();
    let data = buffer.into_inner()?;

    let mut writer = ChannelWriter::new(open_output(output)?);
    writer.write_bytes(&data)?;
    writer.flush()?;

    info!(
        "{} {}: {} bytes in, {} bytes out in {:.2?}",
        transform.name(),
        args.mode,
        consumed,
        writer.bytes_written(),
        start.elapsed()
    );
    Ok(())
}

/// Print the circular suffix order of the input block.
fn cmd_rank(input: Option<PathBuf>, strategy: Strategy) -> Result<()> {
    let mut reader = ChannelReader::new(open_input(input.as_deref())?);
    let block = reader.read_block()?;

    let start = Instant::now();
    let csa = CircularSuffixArray::with_strategy(&block, strategy.into())?;
    info!(
        "ranked {} rotations with {:?} in {:.2?}",
        csa.len(),
        strategy,
        start.elapsed()
    );

    let mut out = open_output(None)?;
    for &rotation in csa.order() {
        writeln!(out, "{rotation}")?;
    }
    out.flush()?;
    Ok(())
}
