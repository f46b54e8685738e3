// crates/terralock-config/src/document.rs
// ============================================================================
// Module: Configuration Document
// Description: Discriminated provider settings with fail-fast validation.
// Purpose: Reject incomplete documents before any remote call is attempted.
// Dependencies: serde, terralock-core, thiserror
// ============================================================================

//! ## Overview
//! Provider-specific settings are modeled as tagged variants so only the
//! fields of the active provider exist at all; fields of unselected
//! providers are never checked because they are never present. Leaf fields
//! default to empty strings on deserialization, which keeps requiredness a
//! validator concern: the validator names the exact field that is missing
//! or malformed, stopping at the first violation (fail-fast, not
//! accumulate-all).
//!
//! Validation order is llm, then cloud, then terraform backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use terralock_core::is_valid_bucket_name;
use terralock_core::is_valid_region_code;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The single backend type currently supported.
pub const SUPPORTED_BACKEND_TYPE: &str = "s3";

/// Default local inference endpoint offered by `config init`.
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// A named field failed a named rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field {field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the violating field.
    pub field: String,
    /// Human-readable rule that was violated.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for one field.
    fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Document Sections
// ============================================================================

/// LLM provider selection with provider-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum LlmConfig {
    /// Local Ollama endpoint.
    Ollama {
        /// Base URL of the Ollama server.
        #[serde(default)]
        url: String,
        /// Model name to run.
        #[serde(default)]
        model: String,
    },
    /// Hosted `OpenAI`-compatible endpoint.
    OpenAi {
        /// API key for the hosted endpoint.
        #[serde(default)]
        api_key: String,
        /// Model name to run.
        #[serde(default)]
        model: String,
    },
}

/// Cloud provider selection with provider-specific defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum CloudConfig {
    /// Amazon Web Services.
    Aws {
        /// Region used when a command does not specify one.
        #[serde(default)]
        default_region: String,
    },
    /// Google Cloud Platform. Selectable, but its provisioning workflow is
    /// not implemented.
    Gcp {},
}

/// Terraform state backend settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerraformConfig {
    /// Backend type; must equal [`SUPPORTED_BACKEND_TYPE`].
    #[serde(default)]
    pub backend_type: String,
    /// S3 backend settings, required once the backend type is selected.
    #[serde(default)]
    pub s3: S3BackendConfig,
}

/// S3 backend settings for Terraform state and locking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3BackendConfig {
    /// Name of the state bucket.
    #[serde(default)]
    pub bucket_name: String,
    /// Region of the state bucket.
    #[serde(default)]
    pub bucket_region: String,
    /// Object key under which state is stored.
    #[serde(default)]
    pub state_key: String,
}

/// The validated settings document.
///
/// # Invariants
/// - A document is either fully valid for its active providers or rejected
///   outright; no partially-valid document flows into provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// LLM provider selection.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Cloud provider selection.
    #[serde(default)]
    pub cloud: CloudConfig,
    /// Terraform backend settings.
    #[serde(default)]
    pub terraform: TerraformConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::Ollama {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: String::new(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::Aws {
            default_region: String::new(),
        }
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            cloud: CloudConfig::default(),
            terraform: TerraformConfig {
                backend_type: SUPPORTED_BACKEND_TYPE.to_string(),
                s3: S3BackendConfig::default(),
            },
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl ConfigDocument {
    /// Validates the document, stopping at the first violating field.
    ///
    /// A document that passes is structurally sufficient for the
    /// provisioning orchestrator to consume without further checks.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first field that violates a
    /// rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_llm()?;
        self.validate_cloud()?;
        self.validate_terraform()
    }

    /// Checks the fields of the active LLM provider.
    fn validate_llm(&self) -> Result<(), ValidationError> {
        match &self.llm {
            LlmConfig::Ollama {
                url,
                model,
            } => {
                require("llm.ollama.url", url)?;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::new(
                        "llm.ollama.url",
                        "must be an http or https url",
                    ));
                }
                require("llm.ollama.model", model)
            }
            LlmConfig::OpenAi {
                api_key,
                model,
            } => {
                require("llm.open_ai.api_key", api_key)?;
                require("llm.open_ai.model", model)
            }
        }
    }

    /// Checks the fields of the active cloud provider.
    fn validate_cloud(&self) -> Result<(), ValidationError> {
        match &self.cloud {
            CloudConfig::Aws {
                default_region,
            } => {
                require("cloud.aws.default_region", default_region)?;
                require_region_code("cloud.aws.default_region", default_region)
            }
            CloudConfig::Gcp {} => Ok(()),
        }
    }

    /// Checks the terraform backend settings.
    fn validate_terraform(&self) -> Result<(), ValidationError> {
        if self.terraform.backend_type != SUPPORTED_BACKEND_TYPE {
            return Err(ValidationError::new(
                "terraform.backend_type",
                "must be \"s3\" (the only supported backend)",
            ));
        }
        let backend = &self.terraform.s3;
        require("terraform.s3.bucket_name", &backend.bucket_name)?;
        if !is_valid_bucket_name(&backend.bucket_name) {
            return Err(ValidationError::new(
                "terraform.s3.bucket_name",
                "must be 3-63 lowercase alphanumeric characters or hyphens, \
                 not starting or ending with a hyphen",
            ));
        }
        require("terraform.s3.bucket_region", &backend.bucket_region)?;
        require_region_code("terraform.s3.bucket_region", &backend.bucket_region)?;
        require("terraform.s3.state_key", &backend.state_key)
    }
}

/// Requires a field to be present and non-blank.
fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "required"));
    }
    Ok(())
}

/// Requires a field to match the region code shape.
fn require_region_code(field: &str, value: &str) -> Result<(), ValidationError> {
    if !is_valid_region_code(value) {
        return Err(ValidationError::new(field, "must match <letters>-<letters>-<digit>"));
    }
    Ok(())
}
