// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Sequential creation of entity types.
//!
//! Entity types are created strictly in order; each request is only issued
//! once the previous one has succeeded.  The first rejection stops the run.
//! Nothing is retried and nothing created earlier is rolled back.

use std::io::{self, Write};

use mania_dialogflow::{ApiError, EntityType, EntityTypesClient};
use thiserror::Error;
use tracing::{debug, info};

/// Progress of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    /// Waiting for the create call of the entity type at this index.
    Pending(usize),
    Done,
    /// The create call at this index was rejected.
    Failed(usize),
}

/// An entity type the agent accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub display_name: String,
    /// Server-assigned resource name.
    pub name: String,
}

#[derive(Debug, Error)]
#[error("entity type `{}` (step {} of {}) failed: {}", .display_name, .step + 1, .total, .source)]
pub struct ProvisionError {
    /// Zero-based index of the rejected entity type.
    pub step: usize,
    pub total: usize,
    pub display_name: String,
    /// Entity types created before the failure; they stay on the agent.
    pub created: Vec<Created>,
    #[source]
    pub source: ApiError,
}

/// Create every entity type under `parent`, in order.
///
/// `on_created` runs after each successful call, before the next request is
/// issued.
pub async fn provision(
    client: &dyn EntityTypesClient,
    parent: &str,
    entity_types: &[EntityType],
    mut on_created: impl FnMut(&Created),
) -> Result<Vec<Created>, ProvisionError> {
    let total = entity_types.len();
    let mut created = Vec::with_capacity(total);
    let mut stage = Stage::Idle;
    debug!(?stage, client = client.name(), %parent, total, "provisioning entity types");

    for (step, entity_type) in entity_types.iter().enumerate() {
        stage = Stage::Pending(step);
        debug!(?stage, display_name = %entity_type.display_name, "creating entity type");

        match client.create_entity_type(parent, entity_type).await {
            Ok(stored) => {
                let c = Created {
                    display_name: entity_type.display_name.clone(),
                    name: stored.name.unwrap_or_default(),
                };
                info!(display_name = %c.display_name, name = %c.name, "entity type created");
                on_created(&c);
                created.push(c);
            }
            Err(source) => {
                stage = Stage::Failed(step);
                debug!(?stage, error = %source, "provisioning stopped");
                return Err(ProvisionError {
                    step,
                    total,
                    display_name: entity_type.display_name.clone(),
                    created,
                    source,
                });
            }
        }
    }

    stage = Stage::Done;
    debug!(?stage, created = created.len(), "provisioning finished");
    Ok(created)
}

/// Console output of a run: confirmations on one stream, the failure report
/// on the other.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Reporter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn created(&mut self, c: &Created) -> io::Result<()> {
        writeln!(self.out, "Created new entity type: {}", c.name)
    }

    /// One line, naming the failed step and anything left behind on the agent.
    pub fn failed(&mut self, e: &ProvisionError) -> io::Result<()> {
        write!(self.err, "Error creating entity type: {e}")?;
        if !e.created.is_empty() {
            let names: Vec<&str> = e.created.iter().map(|c| c.name.as_str()).collect();
            write!(self.err, " (already created, not rolled back: {})", names.join(", "))?;
        }
        writeln!(self.err)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
