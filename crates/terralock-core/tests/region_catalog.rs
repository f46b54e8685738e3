//! Region catalog determinism tests for terralock-core.
// crates/terralock-core/tests/region_catalog.rs
// =============================================================================
// Module: Region Catalog Tests
// Description: Sorted listing, membership checks, and failure propagation.
// Purpose: Ensure catalog answers are deterministic and failures surface.
// =============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use terralock_core::ProviderError;
use terralock_core::RegionCatalog;
use terralock_core::RegionLister;

/// Per-test result alias.
type TestResult = Result<(), String>;

/// Lister double returning a scripted response and counting calls.
struct FakeLister {
    /// Scripted listing response.
    response: Result<Vec<&'static str>, ProviderError>,
    /// Number of remote listing calls issued.
    calls: AtomicUsize,
}

impl FakeLister {
    /// Builds a lister that succeeds with the given codes.
    fn with_codes(codes: &[&'static str]) -> Self {
        Self {
            response: Ok(codes.to_vec()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Builds a lister whose remote call fails.
    fn broken() -> Self {
        Self {
            response: Err(ProviderError::Remote("listing throttled".to_string())),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RegionLister for FakeLister {
    async fn list_region_codes(&self) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .as_ref()
            .map(|codes| codes.iter().map(ToString::to_string).collect())
            .map_err(Clone::clone)
    }
}

#[tokio::test]
async fn list_regions_sorts_provider_order_lexicographically() -> TestResult {
    let catalog = RegionCatalog::new(FakeLister::with_codes(&[
        "eu-west-1",
        "us-east-1",
        "ap-south-1",
    ]));
    let regions = catalog.list_regions().await.map_err(|err| err.to_string())?;
    assert_eq!(regions, vec!["ap-south-1", "eu-west-1", "us-east-1"]);
    Ok(())
}

#[tokio::test]
async fn membership_requeries_the_provider_every_call() -> TestResult {
    let lister = Arc::new(FakeLister::with_codes(&["eu-west-1", "us-east-1", "ap-south-1"]));
    let catalog = RegionCatalog::new(Arc::clone(&lister));
    assert!(catalog.is_valid_region("eu-west-1").await.map_err(|err| err.to_string())?);
    assert!(!catalog.is_valid_region("mars-north-1").await.map_err(|err| err.to_string())?);
    // No caching by design: each membership check is one remote listing.
    assert_eq!(lister.calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn listing_failure_propagates_instead_of_approving() -> TestResult {
    let catalog = RegionCatalog::new(FakeLister::broken());
    match catalog.is_valid_region("eu-west-1").await {
        Err(ProviderError::Remote(message)) => {
            assert!(message.contains("throttled"));
            Ok(())
        }
        other => Err(format!("expected remote failure, got {other:?}")),
    }
}

#[tokio::test]
async fn describe_falls_back_to_the_code() -> TestResult {
    let catalog = RegionCatalog::new(FakeLister::with_codes(&[]));
    assert_eq!(catalog.describe("eu-west-2"), "Europe (London)");
    assert_eq!(catalog.describe("not-a-region"), "not-a-region");
    Ok(())
}
