//! termquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(
    name = "termquiz",
    version,
    about = "Terminal multiple-choice quiz runner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Run {
        /// Path to a .toml quiz or a directory of quizzes
        #[arg(long)]
        quiz: PathBuf,

        /// Ask the questions in random order
        #[arg(long)]
        shuffle: bool,

        /// Seed for the question shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for run reports (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print text at once instead of typing it out
        #[arg(long)]
        no_typing: bool,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create starter config and example quiz
    Init,

    /// Print an integer range: STOP, START STOP, or START STOP STEP
    Range {
        #[arg(allow_negative_numbers = true)]
        args: Vec<i64>,
    },

    /// Sort values with the stable merge sort
    Sort {
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// Compare as numbers instead of text
        #[arg(long)]
        numeric: bool,

        /// Largest first
        #[arg(long)]
        reverse: bool,
    },

    /// Shuffle values
    Shuffle {
        values: Vec<String>,

        /// Seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("termquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            quiz,
            shuffle,
            seed,
            output,
            config,
            no_typing,
        } => commands::run::execute(quiz, shuffle, seed, output, config, no_typing).await,
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
        Commands::Range { args } => commands::range::execute(args),
        Commands::Sort {
            values,
            numeric,
            reverse,
        } => commands::sort::execute(values, numeric, reverse).await,
        Commands::Shuffle { values, seed } => commands::shuffle::execute(values, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
