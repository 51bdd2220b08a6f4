//! Shared types, error model, reference data, and configuration for citelens.
//!
//! This crate is the foundation depended on by all other citelens crates.
//! It provides:
//! - [`CitelensError`]: the unified error type
//! - Domain types ([`SourceType`], [`CitationRecord`], [`ExtractedFact`], ...)
//! - Reference tables ([`ReferenceData`], [`load_reference_data`])
//! - Configuration ([`AppConfig`], config loading)
//! - Score rounding helpers ([`score`])

pub mod config;
pub mod error;
pub mod reference;
pub mod score;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, ReferenceConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{CitelensError, Result};
pub use reference::{
    CuratedTable, DirectoryEntry, LoadedReference, RedditTable, ReferenceData, ReferenceOrigin,
    load_reference_data, normalize_domain, read_reference_file,
};
pub use types::{
    CitationRecord, ClassificationResult, EntityInput, ExtractedFact, FactType, MentionRecord,
    SourceType,
};
