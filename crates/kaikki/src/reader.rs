//! Streams records out of a line-delimited extract.

use crate::record::Record;
use sanasto_core::PartOfSpeech;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to read line {line}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON on line {line}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected a JSON object on line {line}")]
    NotAnObject { line: usize },
    #[error("Unexpected value for field '{field}' on line {line}")]
    Shape {
        line: usize,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReadError {
    /// The 1-based line number the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            Self::Io { line, .. }
            | Self::Json { line, .. }
            | Self::NotAnObject { line }
            | Self::Shape { line, .. } => *line,
        }
    }
}

/// A record that has been parsed as JSON but not yet checked against [`Record`].
///
/// Lets callers filter on the headword, part of speech and language before the rest of the
/// record is looked at, so records that are skipped anyway never fail the import.
#[derive(Debug, Clone)]
pub struct RawRecord {
    line: usize,
    value: Value,
}

impl RawRecord {
    pub fn line(&self) -> usize {
        self.line
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }

    pub fn word(&self) -> Option<&str> {
        self.str_field("word")
    }

    pub fn lang_code(&self) -> Option<&str> {
        self.str_field("lang_code")
    }

    /// The headword, if present and non-empty.
    pub fn lemma(&self) -> Option<&str> {
        self.word().filter(|w| !w.is_empty())
    }

    /// The part of speech, if it is one sanasto stores.
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        self.str_field("pos").and_then(|pos| pos.parse().ok())
    }

    /// Deserializes the full record, naming the offending top-level field on failure.
    pub fn into_record(self) -> Result<Record, ReadError> {
        Record::deserialize(&self.value).map_err(|source| ReadError::Shape {
            line: self.line,
            field: self.offending_field(),
            source,
        })
    }

    fn offending_field(&self) -> String {
        self.value
            .as_object()
            .and_then(|fields| {
                fields.iter().find_map(|(key, value)| {
                    let single = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
                    Record::deserialize(&single).is_err().then(|| key.clone())
                })
            })
            .unwrap_or_else(|| "record".to_string())
    }
}

/// A single-pass iterator over the records of an extract, one JSON object per line.
///
/// Only one line is held in memory at a time. Blank lines are skipped.
pub struct Records<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl Records<BufReader<File>> {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// The number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<RawRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            let read = match self.reader.read_line(&mut self.buf) {
                Ok(read) => read,
                Err(source) => {
                    return Some(Err(ReadError::Io {
                        line: self.line + 1,
                        source,
                    }))
                }
            };
            if read == 0 {
                return None;
            }
            self.line += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            tracing::trace!("Parsing line {}", self.line);
            let value = match serde_json::from_str::<Value>(line) {
                Ok(value) => value,
                Err(source) => {
                    return Some(Err(ReadError::Json {
                        line: self.line,
                        source,
                    }))
                }
            };
            if !value.is_object() {
                return Some(Err(ReadError::NotAnObject { line: self.line }));
            }
            return Some(Ok(RawRecord {
                line: self.line,
                value,
            }));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skips_blank_lines() {
        let input = "{\"word\": \"a\"}\n\n   \n{\"word\": \"b\"}\n";
        let mut records = Records::new(input.as_bytes());
        assert_eq!(records.next().unwrap().unwrap().word(), Some("a"));
        assert_eq!(records.next().unwrap().unwrap().word(), Some("b"));
        assert_eq!(records.line_number(), 4);
        assert!(records.next().is_none());
    }

    #[test]
    fn handles_missing_trailing_newline() {
        let input = "{\"word\": \"a\"}\r\n{\"word\": \"b\"}";
        let words = Records::new(input.as_bytes())
            .map(|r| r.unwrap().word().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(words, ["a", "b"]);
    }

    #[test]
    fn reports_line_of_invalid_json() {
        let input = "{\"word\": \"a\"}\n\n{\"word\": \n";
        let mut records = Records::new(input.as_bytes());
        assert!(records.next().unwrap().is_ok());
        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, ReadError::Json { line: 3, .. }), "{err:?}");
        assert_eq!(err.to_string(), "Invalid JSON on line 3");
    }

    #[test]
    fn rejects_non_objects() {
        let mut records = Records::new("[1, 2]\n".as_bytes());
        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, ReadError::NotAnObject { line: 1 }), "{err:?}");
    }

    #[test]
    fn filters_before_checking_shape() {
        let input = concat!(
            r#"{"word": "talo", "pos": "noun", "lang_code": "fi"}"#,
            "\n",
            r#"{"word": "nopea", "pos": "adj", "senses": [{"tags": ["x", null]}]}"#,
            "\n",
        );
        let mut records = Records::new(input.as_bytes());
        let talo = records.next().unwrap().unwrap();
        assert_eq!(talo.lemma(), Some("talo"));
        assert_eq!(talo.part_of_speech(), Some(PartOfSpeech::Noun));
        assert_eq!(talo.lang_code(), Some("fi"));
        assert_eq!(talo.into_record().unwrap().lemma(), Some("talo"));

        let nopea = records.next().unwrap().unwrap();
        assert_eq!(nopea.lemma(), Some("nopea"));
        assert_eq!(nopea.part_of_speech(), None);
        let err = nopea.into_record().unwrap_err();
        assert!(matches!(&err, ReadError::Shape { line: 2, field, .. } if field == "senses"));
        assert_eq!(err.to_string(), "Unexpected value for field 'senses' on line 2");
    }

    #[test]
    fn lemma_requires_a_string() {
        let mut records = Records::new("{\"word\": 5, \"pos\": \"verb\"}\n".as_bytes());
        let record = records.next().unwrap().unwrap();
        assert_eq!(record.lemma(), None);
        assert_eq!(record.part_of_speech(), Some(PartOfSpeech::Verb));
        assert_eq!(record.line(), 1);
    }
}
