//! Scrapes inflection data from Wiktionary.

use crate::{
    config::HttpConfig,
    inflection::{self, raw_text},
};
use once_cell::sync::Lazy;
use reqwest::{blocking::Client, StatusCode, Url};
use sanasto_core::WordData;
use scraper::{ElementRef, Html, Selector};

pub const FINNISH_SECTION: &str = "Finnish";

static INFLECTION_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.inflection-table").expect("valid selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Page not found")]
    NotFound,
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Fetches word pages from a Wiktionary host.
pub struct Wiktionary {
    client: Client,
    base_url: String,
    section: String,
}

impl Wiktionary {
    pub fn new(config: &HttpConfig) -> eyre::Result<Self> {
        Ok(Self::with_client(config.client()?, &config.wiktionary_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            section: FINNISH_SECTION.to_string(),
        }
    }

    /// Fetches a word's page and returns the first inflection table that parses.
    ///
    /// Fails softly: every failure is logged and results in `None`.
    pub fn fetch_word_data(&self, word: &str) -> Option<WordData> {
        match self.fetch_page(word) {
            Ok(html) => find_word_data(word, &html, &self.section),
            Err(ScrapeError::NotFound) => {
                tracing::warn!("Wiktionary page not found for word '{word}'");
                None
            }
            Err(err) => {
                tracing::error!("Failed to fetch Wiktionary page for word '{word}': {err}");
                None
            }
        }
    }

    pub fn fetch_page(&self, word: &str) -> Result<String, ScrapeError> {
        let url = self.page_url(word)?;
        tracing::debug!("Fetching {url}");
        let response = self.client.get(url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound);
        }
        let html = response.error_for_status()?.text()?;
        Ok(html)
    }

    fn page_url(&self, word: &str) -> Result<Url, ScrapeError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| ScrapeError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["wiki", word]);
        Ok(url)
    }
}

/// Finds the first inflection table in a language's section of a page that parses as a verb
/// or a noun, in document order.
pub fn find_word_data(word: &str, html: &str, section: &str) -> Option<WordData> {
    let document = Html::parse_document(html);
    let Some(content) = section_content(&document, section) else {
        tracing::warn!("No '{section}' section found for word '{word}'");
        return None;
    };

    for table in inflection_tables(&content) {
        if is_possessive_table(table) {
            continue;
        }
        if let Some(verb) = inflection::parse_verb(word, table) {
            return Some(WordData::Verb(verb));
        }
        if let Some(noun) = inflection::parse_noun(word, table) {
            return Some(WordData::Noun(noun));
        }
    }
    tracing::warn!("No valid verb or noun inflection table found for '{word}'");
    None
}

// the elements following a section's heading up to the next heading of the same or a higher level
fn section_content<'a>(document: &'a Html, section: &str) -> Option<Vec<ElementRef<'a>>> {
    let anchor = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().id() == Some(section))?;

    // older markup puts the id on a span inside the heading, newer markup on the heading itself
    let (heading, level) = std::iter::once(anchor)
        .chain(anchor.ancestors().filter_map(ElementRef::wrap))
        .find_map(|e| heading_level(e.value().name()).map(|level| (e, level)))
        .unwrap_or((anchor, 2));
    // newer markup also wraps the heading in a div
    let heading = heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| section_level(*parent).is_some())
        .unwrap_or(heading);

    let content = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|e| section_level(*e).map_or(true, |l| l > level))
        .collect();
    Some(content)
}

// `select` only matches descendants, so a table at the top of the section is checked separately
fn inflection_tables<'a>(content: &[ElementRef<'a>]) -> Vec<ElementRef<'a>> {
    content
        .iter()
        .flat_map(|element| {
            let own = INFLECTION_TABLE.matches(element).then_some(*element);
            own.into_iter().chain(element.select(&INFLECTION_TABLE))
        })
        .collect()
}

fn is_possessive_table(table: ElementRef<'_>) -> bool {
    table
        .select(&ROW)
        .next()
        .is_some_and(|row| raw_text(row).contains("Possessive forms"))
}

fn heading_level(name: &str) -> Option<u8> {
    name.strip_prefix('h')?
        .parse()
        .ok()
        .filter(|level| (1..=6).contains(level))
}

fn section_level(element: ElementRef<'_>) -> Option<u8> {
    let name = element.value().name();
    if let Some(level) = heading_level(name) {
        return Some(level);
    }
    if name != "div" {
        return None;
    }
    element
        .value()
        .classes()
        .find_map(|c| c.strip_prefix("mw-heading")?.parse().ok())
}
