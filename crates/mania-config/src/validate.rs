// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Local checks run before any request reaches the agent.
//!
//! The agent rejects some of these itself, but only after earlier entity
//! types in the run have already been created.  Catching them up front keeps
//! a bad config from leaving the agent half-provisioned.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Config, EntityKind, EntityTypeConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("project id must not be empty")]
    EmptyProjectId,

    #[error("project id `{0}` must not contain `/`")]
    InvalidProjectId(String),

    #[error("no entity types to provision")]
    NoEntityTypes,

    #[error("entity type #{index} has an empty display name")]
    EmptyDisplayName { index: usize },

    #[error("entity type `{0}` is defined more than once")]
    DuplicateDisplayName(String),

    #[error("entity type `{0}` has no entities")]
    NoEntities(String),

    #[error("entity type `{entity_type}` has an entity with an empty value")]
    EmptyValue { entity_type: String },

    #[error("entity type `{entity_type}` defines value `{value}` more than once")]
    DuplicateValue { entity_type: String, value: String },

    #[error("value `{value}` of `{entity_type}` must list itself as a synonym")]
    MissingSelfSynonym { entity_type: String, value: String },

    #[error("value `{value}` of `{entity_type}` repeats synonym `{synonym}`")]
    DuplicateSynonym {
        entity_type: String,
        value: String,
        synonym: String,
    },
}

/// Validate the whole config and return the entity types a run would create.
pub fn validate(cfg: &Config) -> Result<Vec<EntityTypeConfig>, ValidationError> {
    let project = cfg.project_id.trim();
    if project.is_empty() {
        return Err(ValidationError::EmptyProjectId);
    }
    if project.contains('/') {
        return Err(ValidationError::InvalidProjectId(project.to_string()));
    }
    let types = cfg.effective_entity_types();
    validate_entity_types(&types)?;
    Ok(types)
}

pub fn validate_entity_types(types: &[EntityTypeConfig]) -> Result<(), ValidationError> {
    if types.is_empty() {
        return Err(ValidationError::NoEntityTypes);
    }

    let mut seen_names = HashSet::new();
    for (index, ty) in types.iter().enumerate() {
        let name = ty.display_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyDisplayName { index });
        }
        if !seen_names.insert(name) {
            return Err(ValidationError::DuplicateDisplayName(name.to_string()));
        }
        validate_entities(ty)?;
    }
    Ok(())
}

fn validate_entities(ty: &EntityTypeConfig) -> Result<(), ValidationError> {
    if ty.entities.is_empty() {
        return Err(ValidationError::NoEntities(ty.display_name.clone()));
    }

    let mut seen_values = HashSet::new();
    for entity in &ty.entities {
        if entity.value.trim().is_empty() {
            return Err(ValidationError::EmptyValue {
                entity_type: ty.display_name.clone(),
            });
        }
        if !seen_values.insert(entity.value.as_str()) {
            return Err(ValidationError::DuplicateValue {
                entity_type: ty.display_name.clone(),
                value: entity.value.clone(),
            });
        }

        // List entities carry no synonyms of their own.
        if ty.kind == EntityKind::List {
            continue;
        }
        if !entity.synonyms.iter().any(|s| s == &entity.value) {
            return Err(ValidationError::MissingSelfSynonym {
                entity_type: ty.display_name.clone(),
                value: entity.value.clone(),
            });
        }
        let mut seen_synonyms = HashSet::new();
        for synonym in &entity.synonyms {
            if !seen_synonyms.insert(synonym.as_str()) {
                return Err(ValidationError::DuplicateSynonym {
                    entity_type: ty.display_name.clone(),
                    value: entity.value.clone(),
                    synonym: synonym.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog, EntityConfig};

    fn map_type(name: &str, entities: Vec<EntityConfig>) -> EntityTypeConfig {
        EntityTypeConfig {
            display_name: name.into(),
            kind: EntityKind::Map,
            auto_expansion: false,
            fuzzy_extraction: false,
            entities,
        }
    }

    #[test]
    fn default_config_is_valid() {
        let types = validate(&Config::default()).unwrap();
        assert_eq!(types, catalog::builtin_entity_types());
    }

    #[test]
    fn empty_project_id_rejected() {
        let cfg = Config {
            project_id: "  ".into(),
            ..Config::default()
        };
        assert_eq!(validate(&cfg), Err(ValidationError::EmptyProjectId));
    }

    #[test]
    fn project_id_with_slash_rejected() {
        let cfg = Config {
            project_id: "a/b".into(),
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ValidationError::InvalidProjectId(p)) if p == "a/b"));
    }

    #[test]
    fn empty_list_rejected() {
        assert_eq!(validate_entity_types(&[]), Err(ValidationError::NoEntityTypes));
    }

    #[test]
    fn blank_display_name_rejected() {
        let types = vec![map_type(" ", vec![EntityConfig::new("x", ["x"])])];
        assert_eq!(
            validate_entity_types(&types),
            Err(ValidationError::EmptyDisplayName { index: 0 })
        );
    }

    #[test]
    fn duplicate_display_name_rejected() {
        let types = vec![catalog::item(), catalog::item()];
        assert_eq!(
            validate_entity_types(&types),
            Err(ValidationError::DuplicateDisplayName("item".into()))
        );
    }

    #[test]
    fn type_without_entities_rejected() {
        let types = vec![map_type("empty", vec![])];
        assert_eq!(
            validate_entity_types(&types),
            Err(ValidationError::NoEntities("empty".into()))
        );
    }

    #[test]
    fn duplicate_value_rejected() {
        let types = vec![map_type(
            "category",
            vec![
                EntityConfig::new("New York", ["New York"]),
                EntityConfig::new("New York", ["New York", "NYC"]),
            ],
        )];
        assert!(matches!(
            validate_entity_types(&types),
            Err(ValidationError::DuplicateValue { value, .. }) if value == "New York"
        ));
    }

    #[test]
    fn map_value_must_be_its_own_synonym() {
        let types = vec![map_type("category", vec![EntityConfig::new("New York", ["NYC"])])];
        assert!(matches!(
            validate_entity_types(&types),
            Err(ValidationError::MissingSelfSynonym { value, .. }) if value == "New York"
        ));
    }

    #[test]
    fn repeated_synonym_rejected() {
        let types = vec![map_type("item", vec![EntityConfig::new("Broadway", ["Broadway", "Broadway"])])];
        assert!(matches!(
            validate_entity_types(&types),
            Err(ValidationError::DuplicateSynonym { synonym, .. }) if synonym == "Broadway"
        ));
    }

    #[test]
    fn list_entities_need_no_synonyms() {
        let mut ty = map_type("street", vec![EntityConfig::new("Main St", Vec::<String>::new())]);
        ty.kind = EntityKind::List;
        validate_entity_types(&[ty]).unwrap();
    }
}
