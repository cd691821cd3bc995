use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{config::Config, error::FacadeError};

/// A source of upstream JSON documents.
///
/// Implementations hand back only documents that upstream itself marked as
/// successful; every other outcome is an error.
#[async_trait]
pub trait Upstream: Send + Sync + Debug {
    async fn fetch(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, FacadeError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FacadeError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl Upstream for OpenWeatherClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, FacadeError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("APPID", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            debug!(%status, body = %truncate_body(&body), "upstream rejected request");
            return Err(FacadeError::UpstreamStatus(status));
        }

        let doc: Value = serde_json::from_str(&body)?;
        check_success_marker(&doc)?;

        Ok(doc)
    }
}

/// Upstream reports its own status as `cod`, a string on some endpoints and a
/// number on others.
fn check_success_marker(doc: &Value) -> Result<(), FacadeError> {
    match doc.get("cod") {
        Some(Value::String(s)) if s == "200" => Ok(()),
        Some(Value::Number(n)) if n.as_u64() == Some(200) => Ok(()),
        Some(other) => Err(FacadeError::UpstreamMarker(other.to_string())),
        None => Err(FacadeError::UpstreamMarker("missing".to_string())),
    }
}

/// Construct the OpenWeather client described by `config`.
pub fn upstream_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather-server configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let client = OpenWeatherClient::new(
        api_key.to_owned(),
        config.upstream.base_url.as_str(),
        Duration::from_secs(config.upstream.timeout_secs),
    )?;

    Ok(client)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
