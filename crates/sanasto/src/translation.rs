//! Machine translation through the MyMemory API.
//! See <https://mymemory.translated.net/doc/spec.php>

use crate::config::HttpConfig;
use reqwest::blocking::Client;
use serde_json::Value;

pub struct MyMemory {
    client: Client,
    url: String,
}

impl MyMemory {
    pub fn new(config: &HttpConfig) -> eyre::Result<Self> {
        Ok(Self::with_client(config.client()?, &config.mymemory_url))
    }

    pub fn with_client(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Translates text between two languages given as ISO 639-1 codes.
    ///
    /// Errors are logged and result in `None`.
    pub fn translate(&self, text: &str, source: &str, target: &str) -> Option<String> {
        let langpair = format!("{source}|{target}");
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json::<Value>());
        match response {
            Ok(body) => translation_from_response(&body),
            Err(err) => {
                tracing::error!("Error calling MyMemory API: {err}");
                None
            }
        }
    }
}

fn translation_from_response(body: &Value) -> Option<String> {
    // the status is sometimes sent as a string
    let status = match &body["responseStatus"] {
        Value::Number(status) => status.as_u64(),
        Value::String(status) => status.parse().ok(),
        _ => None,
    };
    if status != Some(200) {
        tracing::warn!(
            "MyMemory API returned status {}: {}",
            body["responseStatus"],
            body["responseDetails"]
        );
        return None;
    }
    body["responseData"]["translatedText"]
        .as_str()
        .map(str::to_string)
}
