// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Built-in entity types provisioned when the config lists none.

use crate::{EntityConfig, EntityKind, EntityTypeConfig};

/// `category` followed by `item`.  Creation order matters: `item` is only
/// created once `category` exists.
pub fn builtin_entity_types() -> Vec<EntityTypeConfig> {
    vec![category(), item()]
}

/// Cities the agent can filter listings by.
pub fn category() -> EntityTypeConfig {
    EntityTypeConfig {
        display_name: "category".into(),
        kind: EntityKind::Map,
        auto_expansion: false,
        fuzzy_extraction: false,
        entities: vec![
            EntityConfig::new("New York", ["New York", "NYC"]),
            EntityConfig::new("Los Angeles", ["Los Angeles", "LA", "L.A."]),
        ],
    }
}

/// Items a user can put in their cart.
pub fn item() -> EntityTypeConfig {
    EntityTypeConfig {
        display_name: "item".into(),
        kind: EntityKind::Map,
        auto_expansion: false,
        fuzzy_extraction: false,
        entities: vec![EntityConfig::new("Broadway", ["Broadway"])],
    }
}
