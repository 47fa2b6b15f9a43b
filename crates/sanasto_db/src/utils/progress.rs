//! Progress reporting for the long-running tools.

use eyre::WrapErr;
use indicatif::{ProgressBar, ProgressBarIter, ProgressStyle};
use kaikki::Records;
use std::{fs::File, io::BufReader, path::Path};

const SIZED_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}";
const UNSIZED_TEMPLATE: &str = "{spinner} [{elapsed_precise}] {bytes} ({bytes_per_sec}) {msg}";

/// A bar counting bytes, or a spinner if the total is not known.
pub fn bytes_bar(total: Option<u64>) -> ProgressBar {
    let (bar, template) = match total {
        Some(total) => (ProgressBar::new(total), SIZED_TEMPLATE),
        None => (ProgressBar::new_spinner(), UNSIZED_TEMPLATE),
    };
    let style = ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

pub type TrackedRecords = Records<BufReader<ProgressBarIter<File>>>;

/// Opens an extract for reading with a bar that follows the bytes consumed.
pub fn open_records(path: &Path) -> eyre::Result<(TrackedRecords, ProgressBar)> {
    tracing::info!("Opening {}", path.display());
    let file =
        File::open(path).wrap_err_with(|| format!("Failed to open file at '{}'", path.display()))?;
    let total = file.metadata().map(|m| m.len()).ok();
    let bar = bytes_bar(total);
    let records = Records::new(BufReader::new(bar.wrap_read(file)));
    Ok((records, bar))
}
