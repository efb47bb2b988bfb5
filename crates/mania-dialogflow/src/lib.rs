mod types;
mod client;
mod error;
mod rest;
mod mock;
pub mod auth;
pub mod path;

pub use types::*;
pub use client::EntityTypesClient;
pub use error::ApiError;
pub use rest::RestClient;
pub use mock::{MockClient, RecordedCall, ScriptedMockClient};

use std::time::Duration;

use mania_config::{ClientKind, Config};
use tracing::debug;

/// Construct a boxed [`EntityTypesClient`] from configuration.
///
/// Client selection:
/// - `"rest"` → [`RestClient`] authenticated with the token found by
///   [`auth::resolve_access_token`]
/// - `"mock"` → [`MockClient`], which never leaves the process
pub fn from_config(cfg: &Config) -> anyhow::Result<Box<dyn EntityTypesClient>> {
    let df = &cfg.dialogflow;
    match df.client {
        ClientKind::Rest => {
            let token = auth::resolve_access_token(df);
            if token.is_none() {
                debug!(
                    env = %df.access_token_env,
                    "no access token found; requests will fail to authenticate"
                );
            }
            let base_url = df
                .base_url
                .clone()
                .unwrap_or_else(|| path::default_base_url(df.location.as_deref()));
            let client = RestClient::new(
                base_url,
                df.api_version.clone(),
                df.language_code.clone(),
                token,
                df.timeout_secs.map(Duration::from_secs),
            )?;
            Ok(Box::new(client))
        }
        ClientKind::Mock => Ok(Box::new(MockClient::default())),
    }
}

/// Resource path of the agent the configured project owns.
pub fn agent_parent(cfg: &Config) -> String {
    path::agent_path(&cfg.project_id, cfg.dialogflow.location.as_deref())
}
