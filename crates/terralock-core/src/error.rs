// crates/terralock-core/src/error.rs
// ============================================================================
// Module: Provider Error Taxonomy
// Description: Failure classification for remote provider calls.
// Purpose: Give every capability call one stable error surface.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Remote calls fail for three reasons that callers treat differently: the
//! provider rejected or dropped the call, the caller cancelled it, or the
//! selected provider has no implemented workflow. Errors carry rendered
//! context strings rather than provider SDK types so the core crate stays
//! provider-neutral.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Failure of a single remote provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The remote call failed (network, auth, throttling, service error).
    #[error("remote call failed: {0}")]
    Remote(String),
    /// The call was cancelled through the caller-supplied signal.
    #[error("operation cancelled")]
    Cancelled,
    /// The selected provider has no implemented workflow.
    #[error("unsupported provider: {0}")]
    Unsupported(String),
}

impl ProviderError {
    /// Wraps an arbitrary error as a remote-call failure.
    pub fn remote(err: impl std::fmt::Display) -> Self {
        Self::Remote(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ProviderError;

    #[test]
    fn remote_wraps_display_output() {
        let error = ProviderError::remote("access denied");
        assert_eq!(error, ProviderError::Remote("access denied".to_string()));
        assert_eq!(error.to_string(), "remote call failed: access denied");
    }

    #[test]
    fn cancelled_renders_distinctly() {
        assert_eq!(ProviderError::Cancelled.to_string(), "operation cancelled");
    }
}
