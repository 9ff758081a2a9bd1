//! Blocking HTTP adapter for an external category classifier.
//!
//! The engine only sees the [`Classifier`] trait; this adapter is wired
//! in when `--classifier-url` is given. Any transport or shape problem
//! yields `None` so the rule/history/default chain takes over — a dead
//! classifier service must never fail a reconciliation run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tallybook_recon::classify::sanitize_label;
use tallybook_recon::Classifier;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    memo: &'a str,
    counterparty: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    category: Option<String>,
}

pub struct HttpClassifier {
    http: reqwest::blocking::Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(url: String) -> Result<Self, String> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("cannot build HTTP client: {e}"))?;
        Ok(Self { http, url })
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, memo: &str, counterparty: &str) -> Option<String> {
        let response = self
            .http
            .post(&self.url)
            .json(&ClassifyRequest { memo, counterparty })
            .send()
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let body: ClassifyResponse = response.json().ok()?;
        sanitize_label(&body.category?)
    }
}
