use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use inventory_valuation::file::InventoryFile;
use inventory_valuation::source::FeedSource;
use inventory_valuation::{Result, handler, logging};
use serde_json::Value;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_logging(cli.log_level.as_deref()) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Value(args) => execute_value(args),
        Command::Event(args) => execute_event(args),
    }
}

fn execute_value(args: ValueArgs) -> Result<()> {
    let contents = FeedSource::from_arg(&args.input).read_to_string()?;
    let file = InventoryFile::parse(&contents);

    if args.show_rows {
        println!("{file}");
    }

    let valuation = file.valuate();
    let valuation = if args.strict {
        valuation.into_strict()?
    } else {
        valuation
    };

    match args.format {
        OutputFormat::Text => {
            for diagnostic in &valuation.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
            println!("{}", valuation.total);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&valuation)?),
    }
    Ok(())
}

fn execute_event(args: EventArgs) -> Result<()> {
    let source = FeedSource::from_arg(&args.input).read_to_string()?;
    let event: Value = serde_json::from_str(&source)?;

    let response = match args.method {
        Method::Get => handler::handle_get(&event),
        Method::Post => handler::handle_post(&event)?,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compute the total value of a tab-separated inventory feed."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "debug").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Value a TSV inventory feed.
    Value(ValueArgs),
    /// Answer a JSON request envelope.
    Event(EventArgs),
}

#[derive(clap::Args)]
struct ValueArgs {
    /// Feed path, or `-` for standard input.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fail instead of reporting zero when the header lacks a required column.
    #[arg(long)]
    strict: bool,

    /// Print every evaluated row before the total.
    #[arg(long)]
    show_rows: bool,
}

#[derive(clap::Args)]
struct EventArgs {
    /// Event document path, or `-` for standard input.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Request method to dispatch.
    #[arg(long, value_enum, default_value_t = Method::Post)]
    method: Method,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method {
    Get,
    Post,
}
