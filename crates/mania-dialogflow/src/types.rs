// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Wire representation of Dialogflow v2 `EntityType` resources.

use mania_config::{EntityConfig, EntityKind, EntityTypeConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "KIND_MAP")]
    Map,
    #[serde(rename = "KIND_LIST")]
    List,
    #[serde(rename = "KIND_REGEXP")]
    Regexp,
    #[serde(rename = "KIND_UNSPECIFIED", other)]
    Unspecified,
}

impl From<EntityKind> for Kind {
    fn from(k: EntityKind) -> Self {
        match k {
            EntityKind::Map => Kind::Map,
            EntityKind::List => Kind::List,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoExpansionMode {
    AutoExpansionModeUnspecified,
    AutoExpansionModeDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl From<&EntityConfig> for Entity {
    fn from(e: &EntityConfig) -> Self {
        Self {
            value: e.value.clone(),
            synonyms: e.synonyms.clone(),
        }
    }
}

/// A named lookup dictionary of the agent.
///
/// `name` is assigned by the server and is absent from create requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub display_name: String,
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_expansion_mode: Option<AutoExpansionMode>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_fuzzy_extraction: Option<bool>,
}

impl EntityType {
    /// A create request body: no server name, no optional modes.
    pub fn new(display_name: impl Into<String>, kind: Kind, entities: Vec<Entity>) -> Self {
        Self {
            name: None,
            display_name: display_name.into(),
            kind,
            auto_expansion_mode: None,
            entities,
            enable_fuzzy_extraction: None,
        }
    }

    /// Copy of `self` carrying the given server-assigned name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }
}

impl From<&EntityTypeConfig> for EntityType {
    fn from(cfg: &EntityTypeConfig) -> Self {
        let mut ty = EntityType::new(
            cfg.display_name.trim(),
            cfg.kind.into(),
            cfg.entities.iter().map(Entity::from).collect(),
        );
        if cfg.auto_expansion {
            ty.auto_expansion_mode = Some(AutoExpansionMode::AutoExpansionModeDefault);
        }
        if cfg.fuzzy_extraction {
            ty.enable_fuzzy_extraction = Some(true);
        }
        ty
    }
}
