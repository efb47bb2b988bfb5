// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Project that owns the mania agent when nothing else is configured.
pub const DEFAULT_PROJECT_ID: &str = "mania-25a3b";

/// Environment variable consulted for a bearer token when no explicit
/// `access_token` is configured.
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Serde default helper — returns `true`.
///
/// `#[serde(default)]` on a `bool` always falls back to `false`, so a named
/// function is required for fields that are enabled unless switched off.
fn default_true() -> bool {
    true
}

fn default_project_id() -> String {
    DEFAULT_PROJECT_ID.into()
}

fn default_api_version() -> String {
    "v2".into()
}

fn default_access_token_env() -> String {
    DEFAULT_ACCESS_TOKEN_ENV.into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Cloud project that hosts the Dialogflow agent.
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default)]
    pub dialogflow: DialogflowConfig,
    /// Process exit status after a failed provisioning run.
    #[serde(default)]
    pub exit_policy: ExitPolicy,
    /// Entity types to create, in order.
    ///
    /// When empty the built-in catalog (`category`, then `item`) is used.
    ///
    /// ```toml
    /// [[entity_types]]
    /// display_name = "category"
    /// kind = "map"
    ///
    /// [[entity_types.entities]]
    /// value = "New York"
    /// synonyms = ["New York", "NYC"]
    /// ```
    #[serde(default)]
    pub entity_types: Vec<EntityTypeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            dialogflow: DialogflowConfig::default(),
            exit_policy: ExitPolicy::default(),
            entity_types: Vec::new(),
        }
    }
}

impl Config {
    /// The entity types a provisioning run will create: the configured list,
    /// or the built-in catalog when none are configured.
    pub fn effective_entity_types(&self) -> Vec<EntityTypeConfig> {
        if self.entity_types.is_empty() {
            crate::catalog::builtin_entity_types()
        } else {
            self.entity_types.clone()
        }
    }
}

/// Which client implementation talks to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Dialogflow REST API over HTTPS.
    #[default]
    Rest,
    /// In-process mock that assigns names without any network access.
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogflowConfig {
    #[serde(default)]
    pub client: ClientKind,
    /// Base URL override.  Defaults to `https://dialogflow.googleapis.com`,
    /// or the regional endpoint when `location` is set.
    pub base_url: Option<String>,
    /// REST API version segment of the request path.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Regional agent location (e.g. `europe-west1`).  `None` targets the
    /// global agent at `projects/{project}/agent`.
    pub location: Option<String>,
    /// Language of the entity synonyms; the agent default is used when unset.
    pub language_code: Option<String>,
    /// Explicit bearer token.  Prefer `access_token_env` in checked-in files.
    pub access_token: Option<String>,
    /// Environment variable that holds the bearer token.
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    /// Fall back to `gcloud auth application-default print-access-token`
    /// when neither of the above yields a token.
    #[serde(default = "default_true")]
    pub use_gcloud: bool,
    /// Per-request timeout; the transport default applies when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for DialogflowConfig {
    fn default() -> Self {
        Self {
            client: ClientKind::default(),
            base_url: None,
            api_version: default_api_version(),
            location: None,
            language_code: None,
            access_token: None,
            access_token_env: default_access_token_env(),
            use_gcloud: true,
            timeout_secs: None,
        }
    }
}

/// Exit status used when provisioning fails.
///
/// `Success` keeps the historical behaviour of the setup script, which
/// logged the error and still exited 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Exit with status 1 after reporting the failure.
    #[default]
    Failure,
    /// Report the failure and exit 0.
    Success,
}

impl std::fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitPolicy::Failure => write!(f, "failure"),
            ExitPolicy::Success => write!(f, "success"),
        }
    }
}

/// How the agent resolves matches of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Every synonym resolves to its canonical value.
    #[default]
    Map,
    /// Plain list of values without canonicalisation.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeConfig {
    pub display_name: String,
    #[serde(default)]
    pub kind: EntityKind,
    /// Let the agent recognise values similar to the listed ones.
    #[serde(default)]
    pub auto_expansion: bool,
    /// Allow fuzzy matching of synonyms.
    #[serde(default)]
    pub fuzzy_extraction: bool,
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl EntityConfig {
    pub fn new<S: Into<String>>(value: impl Into<String>, synonyms: impl IntoIterator<Item = S>) -> Self {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
