//! Downloads the kaikki.org extract and imports it into the flat dictionary database.

use clap::{Parser, Subcommand};
use sanasto_db::{
    domain::flat,
    download::{self, DICTIONARY_URL},
    utils::{database, progress},
    DATABASE_FILE, DATA_DIR, DUMP_FILE,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The directory holding the extract and the database.
    #[arg(long, default_value = DATA_DIR)]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Downloads the Finnish extract from kaikki.org.
    Download {
        #[arg(long, default_value = DICTIONARY_URL)]
        url: String,
    },
    /// Imports the downloaded extract into the dictionary database.
    Import {
        /// Only records with this language code are imported.
        #[arg(long, default_value = flat::DEFAULT_LANG_CODE)]
        lang_code: String,
    },
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let dump = cli.data_dir.join(DUMP_FILE);

    match cli.command {
        Command::Download { url } => {
            download::download(&url, &dump)?;
            println!("Saved {}", dump.display());
        }
        Command::Import { lang_code } => {
            download::require_download(&dump)?;
            let db = cli.data_dir.join(DATABASE_FILE);
            let mut conn = database::establish(&db)?;
            database::prepare_for_import(&mut conn)?;

            let (records, bar) = progress::open_records(&dump)?;
            let summary = flat::import_records(&mut conn, records, &lang_code)?;
            bar.finish_and_clear();
            println!(
                "Import complete. Processed {} JSON objects, inserted {} words into {}.",
                summary.processed,
                summary.inserted,
                db.display()
            );
        }
    }
    Ok(())
}
