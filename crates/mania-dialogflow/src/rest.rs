//! Dialogflow v2 REST client for the `projects.agent.entityTypes` collection.
//!
//! # Auth
//! OAuth2 bearer token via the `Authorization` header.
//!
//! # Endpoint pattern
//! `POST https://dialogflow.googleapis.com/v2/{parent}/entityTypes?languageCode=...`

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::{path, ApiError, EntityType, EntityTypesClient};

pub struct RestClient {
    base_url: String,
    api_version: String,
    language_code: Option<String>,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(
        base_url: String,
        api_version: String,
        language_code: Option<String>,
        access_token: Option<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self {
            base_url,
            api_version,
            language_code,
            access_token,
            client,
        })
    }

    fn entity_types_url(&self, parent: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            path::entity_types_path(parent.trim_start_matches('/')),
        )
    }
}

#[async_trait]
impl EntityTypesClient for RestClient {
    fn name(&self) -> &str {
        "rest"
    }

    async fn create_entity_type(
        &self,
        parent: &str,
        entity_type: &EntityType,
    ) -> Result<EntityType, ApiError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or_else(|| ApiError::Auth("no access token available".into()))?;

        let url = self.entity_types_url(parent);
        debug!(%url, display_name = %entity_type.display_name, "sending createEntityType request");

        let mut req = self.client.post(&url).bearer_auth(token).json(entity_type);
        if let Some(lang) = &self.language_code {
            req = req.query(&[("languageCode", lang)]);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            debug!(%status, body = %text, "createEntityType rejected");
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("{e}: {text}")))
    }
}
