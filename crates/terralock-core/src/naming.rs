// crates/terralock-core/src/naming.rs
// ============================================================================
// Module: Backend Naming Rules
// Description: Bucket and region naming rules plus the provisioning target.
// Purpose: Enforce provider naming constraints before any remote call.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Bucket names and region codes are validated with plain character checks
//! against the provider's published rules. [`BackendTarget`] is the only way
//! to hand a bucket/region pair to the orchestrator, and it cannot be
//! constructed from values that violate those rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum bucket name length accepted by the provider.
const MIN_BUCKET_NAME_LENGTH: usize = 3;
/// Maximum bucket name length accepted by the provider.
const MAX_BUCKET_NAME_LENGTH: usize = 63;

// ============================================================================
// SECTION: Naming Rules
// ============================================================================

/// Returns true when the name satisfies provider bucket-naming rules.
///
/// Rules: 3-63 characters, lowercase alphanumeric and hyphens only, and the
/// name must not start or end with a hyphen.
#[must_use]
pub fn is_valid_bucket_name(name: &str) -> bool {
    if name.len() < MIN_BUCKET_NAME_LENGTH || name.len() > MAX_BUCKET_NAME_LENGTH {
        return false;
    }
    if name.starts_with('-') || name.ends_with('-') {
        return false;
    }
    name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Returns true when the code matches the `<letters>-<letters>-<digit>`
/// region shape, e.g. `eu-west-1` or `ap-southeast-2`.
#[must_use]
pub fn is_valid_region_code(code: &str) -> bool {
    let mut groups = code.split('-');
    let (Some(area), Some(direction), Some(ordinal), None) =
        (groups.next(), groups.next(), groups.next(), groups.next())
    else {
        return false;
    };
    let alpha = |group: &str| !group.is_empty() && group.chars().all(|ch| ch.is_ascii_lowercase());
    alpha(area)
        && alpha(direction)
        && ordinal.len() == 1
        && ordinal.chars().all(|ch| ch.is_ascii_digit())
}

// ============================================================================
// SECTION: Backend Target
// ============================================================================

/// Rejection of a bucket/region pair that violates naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The bucket name violates provider naming rules.
    #[error("invalid bucket name: {0}")]
    InvalidBucketName(String),
    /// The region code does not match the recognized shape.
    #[error("invalid region code: {0}")]
    InvalidRegion(String),
}

/// The bucket/region pair the provisioning orchestrator acts on.
///
/// # Invariants
/// - Both fields are always set and well-formed; construction fails closed.
/// - The orchestrator never mutates a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendTarget {
    /// Name of the bucket that will hold state and lock markers.
    bucket_name: String,
    /// Region the bucket lives in (or will be created in).
    region: String,
}

impl BackendTarget {
    /// Creates a target after checking both naming rules.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError`] when either field violates its rule.
    pub fn new(
        bucket_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, TargetError> {
        let bucket_name = bucket_name.into();
        if !is_valid_bucket_name(&bucket_name) {
            return Err(TargetError::InvalidBucketName(bucket_name));
        }
        let region = region.into();
        if !is_valid_region_code(&region) {
            return Err(TargetError::InvalidRegion(region));
        }
        Ok(Self {
            bucket_name,
            region,
        })
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Returns the region code.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::BackendTarget;
    use super::TargetError;
    use super::is_valid_bucket_name;
    use super::is_valid_region_code;

    #[test]
    fn bucket_name_rules_match_provider_limits() {
        assert!(is_valid_bucket_name("valid-bucket-01"));
        assert!(is_valid_bucket_name("abc"));
        // Uppercase and underscores are rejected.
        assert!(!is_valid_bucket_name("My_Bucket"));
        // Too short and too long.
        assert!(!is_valid_bucket_name("ab"));
        assert!(!is_valid_bucket_name(&"a".repeat(64)));
        assert!(is_valid_bucket_name(&"a".repeat(63)));
        // Hyphen placement.
        assert!(!is_valid_bucket_name("-leading"));
        assert!(!is_valid_bucket_name("trailing-"));
    }

    #[test]
    fn region_code_shape_is_enforced() {
        assert!(is_valid_region_code("us-east-1"));
        assert!(is_valid_region_code("ap-southeast-4"));
        assert!(!is_valid_region_code("useast1"));
        assert!(!is_valid_region_code("us-east"));
        assert!(!is_valid_region_code("us-east-10"));
        assert!(!is_valid_region_code("us-gov-west-1"));
        assert!(!is_valid_region_code("US-EAST-1"));
        assert!(!is_valid_region_code("us--1"));
    }

    #[test]
    fn target_construction_fails_closed() {
        let target = BackendTarget::new("tf-state-prod", "eu-west-1");
        assert!(target.is_ok());
        assert_eq!(
            BackendTarget::new("My_Bucket", "eu-west-1"),
            Err(TargetError::InvalidBucketName("My_Bucket".to_string()))
        );
        assert_eq!(
            BackendTarget::new("tf-state-prod", "europe"),
            Err(TargetError::InvalidRegion("europe".to_string()))
        );
    }
}
