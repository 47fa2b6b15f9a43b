//! Example sentences from the Tatoeba API.

use crate::config::HttpConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub finnish: String,
    pub english: String,
}

pub struct Tatoeba {
    client: Client,
    url: String,
}

impl Tatoeba {
    pub fn new(config: &HttpConfig) -> eyre::Result<Self> {
        Ok(Self::with_client(config.client()?, &config.tatoeba_url))
    }

    pub fn with_client(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Searches for Finnish sentences containing the word that have an English translation.
    ///
    /// Errors are logged and result in an empty list.
    pub fn example_sentences(&self, word: &str) -> Vec<ExampleSentence> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("from", "fin"), ("query", word), ("trans_to", "eng")])
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json::<Value>());
        match response {
            Ok(body) => sentences_from_response(&body),
            Err(err) => {
                tracing::error!("Error calling Tatoeba API: {err}");
                Vec::new()
            }
        }
    }
}

fn sentences_from_response(body: &Value) -> Vec<ExampleSentence> {
    body["results"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|result| {
            let finnish = result["text"].as_str().unwrap_or_default();
            // translations are grouped, the first group holds the direct translations
            let english = result["translations"]
                .get(0)
                .and_then(|group| group.get(0))
                .and_then(|translation| translation["text"].as_str())
                .unwrap_or_default();
            if finnish.is_empty() || english.is_empty() {
                return None;
            }
            Some(ExampleSentence {
                finnish: finnish.to_string(),
                english: english.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_sentences() {
        let body = json!({
            "paging": {},
            "results": [
                {
                    "id": 1,
                    "text": "Talo on punainen.",
                    "translations": [[{"text": "The house is red.", "lang": "eng"}], []]
                },
                {"id": 2, "text": "Talo on iso.", "translations": [[], [{"text": "indirect"}]]},
                {"id": 3, "text": "", "translations": [[{"text": "Empty."}]]},
                {"id": 4, "text": "Missä talo on?"}
            ]
        });
        assert_eq!(
            sentences_from_response(&body),
            [ExampleSentence {
                finnish: "Talo on punainen.".to_string(),
                english: "The house is red.".to_string(),
            }]
        );
    }

    #[test]
    fn handles_missing_results() {
        assert!(sentences_from_response(&json!({"results": null})).is_empty());
        assert!(sentences_from_response(&json!({})).is_empty());
    }
}
