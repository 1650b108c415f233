use clap::Parser;
use env_logger::TimestampPrecision;
use log::{error, info, LevelFilter};
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::session::PuzzleSession;
use npuzzle_solver::utils::InputError;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File holding k followed by the k*k tile labels (0 is the blank). Reads stdin if omitted.
    input: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Heuristic to run; repeat to select several. Defaults to all four.
    #[clap(short = 'H', long = "heuristic", value_enum)]
    heuristics: Vec<Heuristic>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        source: io::Error,
    },
    #[error("Failed to write the report: {0}")]
    Write(#[from] io::Error),
    #[error("Invalid puzzle: {0}")]
    Input(#[from] InputError),
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            source_name: path.display().to_string(),
            source,
        }),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|source| CliError::Read {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            Ok(content)
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let content = read_input(args.input.as_ref())?;
    let session = PuzzleSession::from_input(&content)?;

    let selection = if args.heuristics.is_empty() {
        Heuristic::ALL.to_vec()
    } else {
        args.heuristics.clone()
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            info!("Writing report to {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    session.write_report(&mut out, &selection)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
