// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{path, ApiError, EntityType, EntityTypesClient};

/// Deterministic in-process client.  Every create succeeds and is assigned
/// `{parent}/entityTypes/mock-{n}` with `n` counting from 1.
#[derive(Default)]
pub struct MockClient {
    created: AtomicUsize,
}

#[async_trait]
impl EntityTypesClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_entity_type(
        &self,
        parent: &str,
        entity_type: &EntityType,
    ) -> Result<EntityType, ApiError> {
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let name = format!("{}/mock-{n}", path::entity_types_path(parent));
        Ok(entity_type.with_name(name))
    }
}

/// One create call as seen by [`ScriptedMockClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub parent: String,
    pub entity_type: EntityType,
}

/// A pre-scripted client.  Each call to `create_entity_type` pops the next
/// outcome from the front of the queue: `Ok(name)` echoes the request back
/// with that server name, `Err(e)` rejects the call.  Every call is recorded
/// so tests can assert what was sent and in which order.
pub struct ScriptedMockClient {
    scripts: Arc<Mutex<VecDeque<Result<String, ApiError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedMockClient {
    pub fn new(scripts: Vec<Result<String, ApiError>>) -> Self {
        Self {
            scripts: Arc::new(Mutex::new(scripts.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience: every scripted call succeeds with the given names.
    pub fn created<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::new(names.into_iter().map(|n| Ok(n.into())).collect())
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl EntityTypesClient for ScriptedMockClient {
    fn name(&self) -> &str {
        "scripted-mock"
    }

    async fn create_entity_type(
        &self,
        parent: &str,
        entity_type: &EntityType,
    ) -> Result<EntityType, ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                parent: parent.to_string(),
                entity_type: entity_type.clone(),
            });

        let next = self
            .scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(Ok(name)) => Ok(entity_type.with_name(name)),
            Some(Err(e)) => Err(e),
            None => Err(ApiError::Status {
                code: 500,
                status: "INTERNAL".into(),
                message: "scripted mock has no response left".into(),
            }),
        }
    }
}
