mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfrows",
    version,
    about = "Extract regex-matched records from PDF text into CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the field patterns come from.
#[derive(Args)]
pub struct PatternArgs {
    /// JSON config file with fields and delimiting mode
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra field pattern as NAME=REGEX (repeatable)
    #[arg(short, long = "field", value_name = "NAME=REGEX")]
    field: Vec<String>,

    /// Use pdftotext reading order instead of -layout
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from a PDF (or form-feed separated .txt) and write them as CSV
    Process {
        /// Path to PDF or text file
        input_file: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Field whose match starts a new record
        #[arg(short, long, value_name = "FIELD", conflicts_with = "require")]
        delimiter: Option<String>,

        /// Field that must be present before a record is written (repeatable)
        #[arg(short, long, value_name = "FIELD")]
        require: Vec<String>,

        /// CSV file to write (default: config "output", else output.csv)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Try the patterns on a page range and show which lines match
    Preview {
        /// Path to PDF or text file
        input_file: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,

        /// First page (1-based, inclusive)
        #[arg(long, default_value_t = 1)]
        from: usize,

        /// Last page (inclusive, default: five pages from --from)
        #[arg(long)]
        to: Option<usize>,

        /// Lines to show: success, fail or both
        #[arg(short, long = "match", default_value = "both")]
        match_type: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and check config files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file format with an example
    Schema,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input_file,
            patterns,
            delimiter,
            require,
            out,
        } => commands::process::run(input_file, &patterns, delimiter, require, out),
        Commands::Preview {
            input_file,
            patterns,
            from,
            to,
            match_type,
            output,
        } => commands::preview::run(input_file, &patterns, from, to, &match_type, &output),
        Commands::Config { action } => match action {
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
