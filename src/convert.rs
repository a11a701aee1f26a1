//! Reference [`Converter`] implementation backed by an HTTP text-generation
//! service. The endpoint is configuration; the API key comes from the
//! environment at construction time.

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::{DefinitionKind, ServiceState};
use crate::contract::{CollaboratorError, ConversionRequest, ConvertedUnit, Converter};

/// Environment variable holding the conversion service API key.
pub const API_KEY_ENV: &str = "LLM_PORTER_API_KEY";

#[derive(Debug)]
pub struct LlmConverter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl LlmConverter {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a converter with the API key taken from the environment,
    /// loading `.env` if present.
    pub fn new_from_env(endpoint: impl Into<String>) -> Result<Self, CollaboratorError> {
        dotenvy::dotenv().ok();
        let api_key = env::var(API_KEY_ENV)
            .map_err(|e| format!("{API_KEY_ENV} environment variable not set: {e}"))?;
        Ok(Self::new(endpoint, api_key))
    }
}

#[derive(Serialize)]
struct ConvertPayload<'a> {
    name: &'a str,
    kind: DefinitionKind,
    primary: &'a str,
    template: Option<&'a str>,
    style: Option<&'a str>,
    service_state: Option<ServiceState>,
}

#[derive(Deserialize)]
struct ConvertResponse {
    content: String,
}

#[async_trait]
impl Converter for LlmConverter {
    async fn convert<'a>(
        &self,
        req: ConversionRequest<'a>,
    ) -> Result<ConvertedUnit, CollaboratorError> {
        let payload = ConvertPayload {
            name: req.name,
            kind: req.kind,
            primary: req.primary,
            template: req.template,
            style: req.style,
            service_state: req.service_state,
        };

        debug!(item = req.name, endpoint = %self.endpoint, "Posting conversion request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("conversion endpoint returned {status} for {}", req.name).into());
        }

        let body: ConvertResponse = response.json().await?;
        info!(item = req.name, bytes = body.content.len(), "Received converted content");
        Ok(ConvertedUnit {
            content: body.content,
        })
    }
}
