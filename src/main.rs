mod error;
mod io;
mod render;
mod types;

use clap::Parser;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Converts a CSV contact list into a phonebook XML file for FRITZ!Box routers.
///
/// The first line of the input is a header. Columns are read by position:
/// id, first name, last name, home, mobile and work number.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the input .csv file.
    input: PathBuf,
    /// Path to the output .xml file.
    output: PathBuf,
    /// Log every converted contact.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> error::Result<()> {
    let mut reader = io::ContactReader::new(&args.input)?;
    let mut phonebook = render::Phonebook::new(unix_now());

    for result in reader.by_ref() {
        let contact = result?;
        debug!(
            id = %contact.id,
            numbers = contact.numbers.len(),
            "converted contact"
        );
        phonebook.push(&contact);
    }

    info!(
        contacts = phonebook.contact_count(),
        skipped = reader.skipped(),
        output = %args.output.display(),
        "writing phonebook"
    );

    io::write_document(&args.output, &phonebook.finish())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
