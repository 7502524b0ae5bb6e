use std::path::PathBuf;
use std::process::ExitCode;

use bus_timetable::app::{self, RunOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Build the published bus timetable from an origin-destination table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Origin-destination CSV table
    #[arg(short, long, default_value = "horaris_manresa_barcelona_fullmatrix_tipusbus.csv")]
    input: PathBuf,

    /// Output JSON document
    #[arg(short, long, default_value = "data.json")]
    output: PathBuf,

    /// Network configuration (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write a static accessible HTML viewer
    #[arg(long)]
    html: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = RunOptions {
        input: args.input,
        output: args.output,
        config: args.config,
        html: args.html,
    };

    match app::run(&options) {
        Ok(summary) => {
            println!("OK -> {}", summary.output.display());
            if let Some(html) = &summary.html {
                println!("OK -> {}", html.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
