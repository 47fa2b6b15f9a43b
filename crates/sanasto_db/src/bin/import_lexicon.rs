//! Converts the kaikki.org extract into the normalized lexicon database.

use clap::Parser;
use sanasto_db::{
    domain::lexicon,
    utils::{database, progress},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the input JSONL extract.
    #[arg(default_value = "fi.jsonl")]
    source: PathBuf,
    /// The path to the output SQLite database. Its lexicon tables are recreated.
    #[arg(default_value = "fi_words.sqlite")]
    destination: PathBuf,
    /// Stop after processing this many records.
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if !args.source.is_file() {
        eyre::bail!("Input file not found: {}", args.source.display());
    }
    let mut conn = database::establish(&args.destination)?;
    database::prepare_for_import(&mut conn)?;

    let (records, bar) = progress::open_records(&args.source)?;
    let summary = lexicon::import_records(&mut conn, records, args.limit)?;
    bar.finish_and_clear();

    println!(
        "Completed. Processed {} JSON objects, inserted {} noun/verb entries into {}.",
        summary.processed,
        summary.inserted,
        args.destination.display()
    );
    Ok(())
}
