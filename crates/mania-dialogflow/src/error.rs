// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("{status} ({code}): {message}")]
    Status {
        code: u16,
        status: String,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Deserialize)]
struct Envelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl ApiError {
    /// Classify a non-success HTTP response.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        let (code, status, message) = match serde_json::from_str::<Envelope>(body) {
            Ok(env) => (
                if env.error.code == 0 { http_status } else { env.error.code },
                env.error.status,
                env.error.message,
            ),
            Err(_) => (http_status, String::new(), body.trim().to_string()),
        };

        if code == 401 || code == 403 {
            let message = if message.is_empty() { format!("HTTP {code}") } else { message };
            return ApiError::Auth(message);
        }

        let status = if status.is_empty() { format!("HTTP {code}") } else { status };
        ApiError::Status { code, status, message }
    }

    /// The agent already holds an entity type with this display name.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ApiError::Status { code: 409, .. })
            || matches!(self, ApiError::Status { status, .. } if status == "ALREADY_EXISTS")
    }
}
