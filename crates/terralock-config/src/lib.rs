// crates/terralock-config/src/lib.rs
// ============================================================================
// Module: Terralock Config Library
// Description: Canonical config model, validation, and local persistence.
// Purpose: Single source of truth for the terralock configuration document.
// Dependencies: dirs, serde, serde_yaml, terralock-core, thiserror
// ============================================================================

//! ## Overview
//! `terralock-config` defines the configuration document that selects the
//! LLM provider, the cloud provider, and the state backend settings. The
//! document validates fail-fast before anything is provisioned: a document
//! that passes is structurally sufficient for the orchestrator with no
//! further null or empty checks. Persistence is one YAML file per user with
//! owner-only permissions, since fields may carry credentials.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod document;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::CloudConfig;
pub use document::ConfigDocument;
pub use document::LlmConfig;
pub use document::S3BackendConfig;
pub use document::TerraformConfig;
pub use document::ValidationError;
pub use store::ConfigStore;
pub use store::StoreError;
