// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod schema;
mod loader;
pub mod catalog;
pub mod validate;

pub use schema::*;
pub use loader::{expand_path, load};
pub use validate::{validate, validate_entity_types, ValidationError};
