//! Parses Wiktionary inflection tables into verbs and nouns.
//!
//! The tables are formatted for humans: header rows vary, cells are merged and some tables
//! are not the ones we want at all. The parsers are lenient about structure but only accept
//! tables that yield a complete enough paradigm.

use once_cell::sync::Lazy;
use sanasto_core::{Case, Declension, Noun, Person, Verb, MISSING_FORM};
use scraper::{ElementRef, Selector};
use std::collections::BTreeMap;

/// The minimum number of cases a table needs to be accepted as a noun declension.
pub const MIN_CASES: usize = 3;

const KOTUS_MARKER: &str = "Kotus type";

// the row labels of a conjugation table, the words are joined with a non-breaking space
const PERSON_LABELS: [(&str, Person); 6] = [
    ("1st\u{a0}sing.", Person::FirstSingular),
    ("2nd\u{a0}sing.", Person::SecondSingular),
    ("3rd\u{a0}sing.", Person::ThirdSingular),
    ("1st\u{a0}plur.", Person::FirstPlural),
    ("2nd\u{a0}plur.", Person::SecondPlural),
    ("3rd\u{a0}plur.", Person::ThirdPlural),
];

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").expect("valid selector"));

/// Parses a conjugation table. Returns `None` unless every person has a form.
pub fn parse_verb(word: &str, table: ElementRef<'_>) -> Option<Verb> {
    let verb_type = table
        .select(&ROW)
        .next()
        .map(raw_text)
        .filter(|text| text.contains(KOTUS_MARKER))
        .and_then(|text| kotus_type(&text))
        .unwrap_or(Verb::UNKNOWN_TYPE);

    let mut conjugations = BTreeMap::new();
    for row in table.select(&ROW) {
        let mut cells = cells(row).into_iter();
        let (Some(label), Some(form)) = (cells.next(), cells.next()) else {
            continue;
        };
        let person = PERSON_LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, person)| *person);
        if let Some(person) = person {
            // later tenses repeat the labels, the first one is the present tense
            conjugations.entry(person).or_insert(form);
        }
    }

    let verb = Verb {
        infinitive: word.to_string(),
        verb_type,
        conjugations,
    };
    if !verb.is_complete() {
        tracing::trace!(
            "Table for '{word}' is not a verb, only {} persons found",
            verb.conjugations.len()
        );
        return None;
    }
    Some(verb)
}

/// Parses a declension table. Returns `None` unless at least [`MIN_CASES`] cases were found.
pub fn parse_noun(word: &str, table: ElementRef<'_>) -> Option<Noun> {
    let rows = table.select(&ROW).collect::<Vec<_>>();
    let first_row = rows.first()?;
    // the number header is sometimes preceded by a title row
    let skip = match rows.get(1) {
        Some(second_row) if !has_number_header(*first_row) && has_number_header(*second_row) => 1,
        _ => 0,
    };

    let mut declensions = BTreeMap::new();
    for row in &rows[skip..] {
        let cells = cells(*row);
        let Some(label) = cells.first() else {
            continue;
        };
        let Some(case) = Case::find_in(&label.to_lowercase()) else {
            continue;
        };
        if declensions.contains_key(&case) {
            continue;
        }
        let declension = match cells.as_slice() {
            [_, singular, plural, ..] => Declension {
                singular: first_variant(singular),
                plural: first_variant(plural),
            },
            [_, singular] => Declension {
                singular: singular.clone(),
                plural: MISSING_FORM.to_string(),
            },
            _ => continue,
        };
        declensions.insert(case, declension);
    }

    if declensions.len() < MIN_CASES {
        tracing::trace!(
            "Table for '{word}' is not a noun, only {} cases found",
            declensions.len()
        );
        return None;
    }
    Some(Noun {
        word: word.to_string(),
        declensions,
    })
}

/// Extracts the number following the word "type", e.g. 52 from "Kotus type 52/sanoa".
pub fn kotus_type(text: &str) -> Option<u32> {
    let tokens = text.split_whitespace().collect::<Vec<_>>();
    tokens
        .windows(2)
        .filter(|pair| pair[0] == "type")
        .find_map(|pair| {
            let digits = pair[1]
                .split('/')
                .next()
                .unwrap_or_default()
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>();
            digits.parse().ok()
        })
}

/// The concatenated text of an element, as it appears in the document.
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

// the concatenated text of an element with each text node trimmed
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL).map(stripped_text).collect()
}

fn has_number_header(row: ElementRef<'_>) -> bool {
    let text = raw_text(row).to_lowercase();
    text.contains("singular") || text.contains("plural")
}

// cells may list variants separated by slashes
fn first_variant(cell: &str) -> String {
    cell.split('/').next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use scraper::Html;

    fn with_table<T>(html: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("table").unwrap();
        let table = fragment.select(&selector).next().unwrap();
        f(table)
    }

    const SANOA: &str = r#"
<table class="inflection-table">
<tr><th colspan="3">Inflection of <i>sanoa</i> (Kotus type 52/sanoa, no gradation)</th></tr>
<tr><th colspan="3">indicative mood</th></tr>
<tr><th>present tense</th><th>positive</th><th>negative</th></tr>
<tr><th>1st&nbsp;sing.</th><td>sanon</td><td>en sano</td></tr>
<tr><th>2nd&nbsp;sing.</th><td>sanot</td><td>et sano</td></tr>
<tr><th>3rd&nbsp;sing.</th><td>sanoo</td><td>ei sano</td></tr>
<tr><th>1st&nbsp;plur.</th><td>sanomme</td><td>emme sano</td></tr>
<tr><th>2nd&nbsp;plur.</th><td>sanotte</td><td>ette sano</td></tr>
<tr><th>3rd&nbsp;plur.</th><td>sanovat</td><td>eivät sano</td></tr>
<tr><th>past tense</th><th>positive</th><th>negative</th></tr>
<tr><th>1st&nbsp;sing.</th><td>sanoin</td><td>en sanonut</td></tr>
<tr><th>3rd&nbsp;plur.</th><td>sanoivat</td><td>eivät sanoneet</td></tr>
</table>"#;

    const TALO: &str = r#"
<table class="inflection-table">
<tr><th colspan="3">Inflection of <i>talo</i> (Kotus type 1/valo, no gradation)</th></tr>
<tr><th></th><th>singular</th><th>plural</th></tr>
<tr><th>nominative</th><td>talo</td><td>talot</td></tr>
<tr><th>accusative</th><td>talo</td><td>talot</td></tr>
<tr><th>genitive</th><td> talon </td><td>talojen / taloin<sup>rare</sup></td></tr>
<tr><th>partitive</th><td>taloa</td><td>taloja</td></tr>
<tr><th>Inessive</th><td>talossa</td><td>taloissa</td></tr>
<tr><th>nominative</th><td>talokin</td><td>talotkin</td></tr>
<tr><th>instructive</th><td>taloin</td></tr>
</table>"#;

    #[test]
    fn parses_verb() {
        let verb = with_table(SANOA, |t| parse_verb("sanoa", t)).unwrap();
        assert_eq!(verb.infinitive, "sanoa");
        assert_eq!(verb.verb_type, 52);
        assert_eq!(verb.conjugations.len(), 6);
        assert_eq!(verb.conjugations[&Person::FirstSingular], "sanon");
        assert_eq!(verb.conjugations[&Person::ThirdSingular], "sanoo");
        // the past tense rows come later and are ignored
        assert_eq!(verb.conjugations[&Person::ThirdPlural], "sanovat");
    }

    #[test]
    fn rejects_incomplete_verb() {
        let html = SANOA.replace(
            "<tr><th>2nd&nbsp;plur.</th><td>sanotte</td><td>ette sano</td></tr>",
            "",
        );
        assert!(with_table(&html, |t| parse_verb("sanoa", t)).is_none());
    }

    #[test]
    fn requires_exact_person_labels() {
        let html = SANOA.replace("2nd&nbsp;plur.", "2nd plur.");
        assert!(with_table(&html, |t| parse_verb("sanoa", t)).is_none());
    }

    #[test]
    fn defaults_verb_type() {
        let html = SANOA.replace("Kotus type 52/sanoa, no gradation", "no gradation");
        let verb = with_table(&html, |t| parse_verb("sanoa", t)).unwrap();
        assert_eq!(verb.verb_type, 0);
    }

    #[test]
    fn extracts_kotus_type() {
        assert_eq!(kotus_type("Inflection of olla (Kotus type 64/juoda)"), Some(64));
        assert_eq!(kotus_type("(Kotus type 67/tulla, t-l gradation)"), Some(67));
        assert_eq!(kotus_type("type* type 5"), Some(5));
        assert_eq!(kotus_type("type unknown, type 12"), Some(12));
        assert_eq!(kotus_type("Kotus type"), None);
        assert_eq!(kotus_type("no type here"), None);
    }

    #[test]
    fn verb_parser_rejects_noun_table() {
        assert!(with_table(TALO, |t| parse_verb("talo", t)).is_none());
    }

    #[test]
    fn parses_noun() {
        let noun = with_table(TALO, |t| parse_noun("talo", t)).unwrap();
        assert_eq!(noun.word, "talo");
        assert_eq!(
            noun.declensions.keys().copied().collect::<Vec<_>>(),
            [
                Case::Nominative,
                Case::Genitive,
                Case::Partitive,
                Case::Inessive,
                Case::Instructive
            ]
        );
        let genitive = &noun.declensions[&Case::Genitive];
        assert_eq!(genitive.singular, "talon");
        assert_eq!(genitive.plural, "talojen");
        // the first nominative row wins
        assert_eq!(noun.declensions[&Case::Nominative].singular, "talo");
        let instructive = &noun.declensions[&Case::Instructive];
        assert_eq!(instructive.singular, "taloin");
        assert_eq!(instructive.plural, "-");
    }

    #[test]
    fn rejects_noun_with_too_few_cases() {
        let html = r#"
<table class="inflection-table">
<tr><th></th><th>singular</th><th>plural</th></tr>
<tr><th>nominative</th><td>talo</td><td>talot</td></tr>
<tr><th>genitive</th><td>talon</td><td>talojen</td></tr>
<tr><th>nominative</th><td>talokin</td><td>talotkin</td></tr>
</table>"#;
        assert!(with_table(html, |t| parse_noun("talo", t)).is_none());
    }

    #[test]
    fn parses_noun_without_header() {
        let html = r#"
<table class="inflection-table">
<tr><th>nominative</th><td>vesi</td><td>vedet</td></tr>
<tr><th>genitive</th><td>veden</td><td>vesien</td></tr>
<tr><th>partitive</th><td>vettä</td><td>vesiä</td></tr>
</table>"#;
        let noun = with_table(html, |t| parse_noun("vesi", t)).unwrap();
        assert_eq!(noun.declensions.len(), 3);
        assert_eq!(noun.declensions[&Case::Nominative].plural, "vedet");
    }

    #[test]
    fn handles_empty_table() {
        let html = r#"<table class="inflection-table"></table>"#;
        assert!(with_table(html, |t| parse_noun("x", t)).is_none());
        assert!(with_table(html, |t| parse_verb("x", t)).is_none());
    }
}
