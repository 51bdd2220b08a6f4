//! Entity input files.
//!
//! A file holds either one entity object or an array of them.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use citelens_shared::{CitelensError, EntityInput, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityDocument {
    Many(Vec<EntityInput>),
    One(Box<EntityInput>),
}

/// Parse entity JSON. Every entity must carry a non-blank id.
pub fn parse_entities(json: &str) -> Result<Vec<EntityInput>> {
    let document: EntityDocument = serde_json::from_str(json)
        .map_err(|e| CitelensError::parse(format!("invalid entity JSON: {e}")))?;

    let entities = match document {
        EntityDocument::Many(entities) => entities,
        EntityDocument::One(entity) => vec![*entity],
    };

    if let Some(pos) = entities.iter().position(|e| e.id.trim().is_empty()) {
        return Err(CitelensError::validation(format!(
            "entity at index {pos} has an empty id"
        )));
    }

    Ok(entities)
}

/// Read and parse an entity file.
pub fn load_entities(path: &Path) -> Result<Vec<EntityInput>> {
    let content = std::fs::read_to_string(path).map_err(|e| CitelensError::io(path, e))?;
    let entities = parse_entities(&content)?;
    debug!(path = %path.display(), count = entities.len(), "entities loaded");
    Ok(entities)
}
