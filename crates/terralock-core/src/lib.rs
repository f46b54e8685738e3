// crates/terralock-core/src/lib.rs
// ============================================================================
// Module: Terralock Core Library
// Description: Provider-neutral types and workflows for state-bucket setup.
// Purpose: Single source of truth for bucket provisioning semantics.
// Dependencies: async-trait, serde, thiserror, tokio, tokio-util
// ============================================================================

//! ## Overview
//! `terralock-core` defines the provider-neutral model for provisioning the
//! remote bucket that backs infrastructure-as-code state and locking. The
//! crate owns the bucket/region naming rules, the region catalog, and the
//! idempotent provisioning orchestrator. Remote capability is abstracted
//! behind traits so provider clients and test doubles plug in without a
//! network.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod naming;
pub mod provision;
pub mod regions;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ProviderError;
pub use naming::BackendTarget;
pub use naming::TargetError;
pub use naming::is_valid_bucket_name;
pub use naming::is_valid_region_code;
pub use provision::BucketProvisioner;
pub use provision::ProvisionObserver;
pub use provision::ProvisionStep;
pub use provision::ProvisioningError;
pub use provision::ProvisioningOutcome;
pub use provision::StateBucketClient;
pub use regions::RegionCatalog;
pub use regions::RegionLister;
pub use regions::describe_region;
