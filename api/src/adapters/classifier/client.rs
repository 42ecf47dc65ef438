//! HTTP toxicity classifier client
//!
//! Wire contract:
//! - `POST <base_url>/<endpoint>` with `Authorization: <api_key>` and body
//!   `{"data": [<text>]}`
//! - response `{"data": [{"label": ..., "confidences": [{"confidence": ...}, ...]}]}`;
//!   only `data[0].label` and `data[0].confidences[0].confidence` are read.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::domain::entities::{ClassificationLabel, ClassificationResult};
use crate::domain::ports::ToxicityClassifier;
use crate::error::ClassificationUnavailable;

/// Implementation of the remote classifier port
pub struct HttpToxicityClassifier {
    http: Client,
    url: String,
    api_key: String,
}

impl HttpToxicityClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassificationUnavailable> {
        let http = Client::builder()
            .user_agent(concat!("commentboard-api/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            url: join_url(&config.base_url, &config.endpoint),
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    data: [&'a str; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    data: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    label: String,
    confidences: Vec<LabelConfidence>,
}

#[derive(Deserialize)]
struct LabelConfidence {
    confidence: f64,
}

/// Decode a classifier response body
fn parse_prediction(body: &[u8]) -> Result<ClassificationResult, ClassificationUnavailable> {
    let response: PredictResponse = serde_json::from_slice(body)
        .map_err(|e| ClassificationUnavailable::MalformedResponse(e.to_string()))?;

    let prediction = response.data.into_iter().next().ok_or_else(|| {
        ClassificationUnavailable::MalformedResponse("empty data array".to_string())
    })?;

    let confidence = prediction
        .confidences
        .first()
        .map(|c| c.confidence)
        .ok_or_else(|| {
            ClassificationUnavailable::MalformedResponse("empty confidences array".to_string())
        })?;

    if !(0.0..=1.0).contains(&confidence) {
        return Err(ClassificationUnavailable::MalformedResponse(format!(
            "confidence {} outside [0, 1]",
            confidence
        )));
    }

    Ok(ClassificationResult::new(
        ClassificationLabel::from_wire(&prediction.label),
        confidence,
    ))
}

#[async_trait]
impl ToxicityClassifier for HttpToxicityClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationUnavailable> {
        let response = self
            .http
            .post(&self.url)
            .header(header::AUTHORIZATION, &self.api_key)
            .json(&PredictRequest { data: [text] })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClassificationUnavailable::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        parse_prediction(&body)
    }
}
