//! Downloads the kaikki.org extract.

use crate::utils::progress;
use eyre::WrapErr;
use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::Duration,
};

pub const DICTIONARY_URL: &str =
    "https://kaikki.org/dictionary/Finnish/kaikki.org-dictionary-Finnish.jsonl";

/// Fails with a hint to run the download first if the extract is missing.
pub fn require_download(dump: &Path) -> eyre::Result<()> {
    if !dump.is_file() {
        eyre::bail!(
            "{} not found. Please download it first with 'dictionary download'.",
            dump.display()
        );
    }
    Ok(())
}

/// Streams the file at `url` to `destination`, returning the number of bytes written.
///
/// The body is written to a temporary file next to the destination and only moved in place
/// once complete. There is no overall timeout as the extract is large.
pub fn download(url: &str, destination: &Path) -> eyre::Result<u64> {
    let dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create directory '{}'", dir.display()))?;

    tracing::info!("Starting download from {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<Duration>)
        .build()
        .wrap_err("Failed to build HTTP client")?;
    let response = client
        .get(url)
        .send()
        .and_then(|res| res.error_for_status())
        .wrap_err_with(|| format!("Failed to download {url}"))?;

    let bar = progress::bytes_bar(response.content_length());
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    let written = {
        let mut writer = io::BufWriter::new(temp_file.as_file_mut());
        let written = io::copy(&mut bar.wrap_read(response), &mut writer)
            .wrap_err_with(|| format!("Failed to download {url}"))?;
        writer.flush()?;
        written
    };
    temp_file
        .persist(destination)
        .wrap_err_with(|| format!("Failed to write '{}'", destination.display()))?;
    bar.finish_with_message("done");
    tracing::info!("Downloaded {written} bytes to {}", destination.display());
    Ok(written)
}
