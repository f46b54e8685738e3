// crates/terralock-core/src/regions.rs
// ============================================================================
// Module: Region Catalog
// Description: Region enumeration, membership checks, and descriptions.
// Purpose: Give callers a deterministic view of provider regions.
// Dependencies: async-trait
// ============================================================================

//! ## Overview
//! The catalog answers three questions: which regions exist, is a given code
//! one of them, and what is its human-readable name. Enumeration is a remote
//! call behind [`RegionLister`]; membership checks re-query the provider on
//! every call so a transient listing failure surfaces as an error instead of
//! silently approving or rejecting a code. Descriptions come from a fixed
//! static table and never fail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::ProviderError;

// ============================================================================
// SECTION: Region Descriptions
// ============================================================================

/// Well-known region codes paired with their human-readable names.
const REGION_DESCRIPTIONS: &[(&str, &str)] = &[
    ("af-south-1", "Africa (Cape Town)"),
    ("ap-east-1", "Asia Pacific (Hong Kong)"),
    ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    ("ap-northeast-2", "Asia Pacific (Seoul)"),
    ("ap-northeast-3", "Asia Pacific (Osaka)"),
    ("ap-south-1", "Asia Pacific (Mumbai)"),
    ("ap-south-2", "Asia Pacific (Hyderabad)"),
    ("ap-southeast-1", "Asia Pacific (Singapore)"),
    ("ap-southeast-2", "Asia Pacific (Sydney)"),
    ("ap-southeast-3", "Asia Pacific (Jakarta)"),
    ("ap-southeast-4", "Asia Pacific (Melbourne)"),
    ("ca-central-1", "Canada (Central)"),
    ("ca-west-1", "Canada West (Calgary)"),
    ("eu-central-1", "Europe (Frankfurt)"),
    ("eu-central-2", "Europe (Zurich)"),
    ("eu-north-1", "Europe (Stockholm)"),
    ("eu-south-1", "Europe (Milan)"),
    ("eu-south-2", "Europe (Spain)"),
    ("eu-west-1", "Europe (Ireland)"),
    ("eu-west-2", "Europe (London)"),
    ("eu-west-3", "Europe (Paris)"),
    ("il-central-1", "Israel (Tel Aviv)"),
    ("me-central-1", "Middle East (UAE)"),
    ("me-south-1", "Middle East (Bahrain)"),
    ("sa-east-1", "South America (Sao Paulo)"),
    ("us-east-1", "US East (N. Virginia)"),
    ("us-east-2", "US East (Ohio)"),
    ("us-west-1", "US West (N. California)"),
    ("us-west-2", "US West (Oregon)"),
];

/// Returns the human-readable description for a region code.
///
/// Unknown codes are echoed back verbatim so callers always have something
/// presentable.
#[must_use]
pub fn describe_region(code: &str) -> String {
    REGION_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or_else(|| code.to_string(), |(_, description)| (*description).to_string())
}

// ============================================================================
// SECTION: Region Listing
// ============================================================================

/// Remote capability that enumerates every region known to the provider.
#[async_trait]
pub trait RegionLister: Send + Sync {
    /// Returns all region codes, including opt-in regions, in provider order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the remote listing call fails.
    async fn list_region_codes(&self) -> Result<Vec<String>, ProviderError>;
}

#[async_trait]
impl<T: RegionLister + ?Sized> RegionLister for std::sync::Arc<T> {
    async fn list_region_codes(&self) -> Result<Vec<String>, ProviderError> {
        (**self).list_region_codes().await
    }
}

/// Deterministic catalog view over a [`RegionLister`].
#[derive(Debug, Clone)]
pub struct RegionCatalog<L> {
    /// Remote region enumeration capability.
    lister: L,
}

impl<L: RegionLister> RegionCatalog<L> {
    /// Creates a catalog over the given lister.
    pub const fn new(lister: L) -> Self {
        Self {
            lister,
        }
    }

    /// Returns every region code known to the provider, sorted
    /// lexicographically.
    ///
    /// Callers must not rely on any ordering other than the sorted one.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the remote listing call fails.
    pub async fn list_regions(&self) -> Result<Vec<String>, ProviderError> {
        let mut codes = self.lister.list_region_codes().await?;
        codes.sort_unstable();
        Ok(codes)
    }

    /// Returns true when the code is a region the provider knows about.
    ///
    /// The full list is re-queried on every call; results are deliberately
    /// not cached so listing failures are visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the remote listing call fails.
    pub async fn is_valid_region(&self, code: &str) -> Result<bool, ProviderError> {
        let codes = self.lister.list_region_codes().await?;
        Ok(codes.iter().any(|known| known == code))
    }

    /// Returns the human-readable description for a region code.
    #[must_use]
    pub fn describe(&self, code: &str) -> String {
        describe_region(code)
    }
}

#[cfg(test)]
mod tests {
    use super::describe_region;

    #[test]
    fn known_codes_resolve_to_friendly_names() {
        assert_eq!(describe_region("us-east-1"), "US East (N. Virginia)");
        assert_eq!(describe_region("ap-southeast-2"), "Asia Pacific (Sydney)");
    }

    #[test]
    fn unknown_codes_echo_verbatim() {
        assert_eq!(describe_region("xx-unknown-9"), "xx-unknown-9");
    }
}
