// crates/terralock-aws/src/regions.rs
// ============================================================================
// Module: AWS Region Lister
// Description: EC2-backed enumeration of every account-visible region.
// Purpose: Supply the region catalog with provider truth, opt-ins included.
// Dependencies: async-trait, aws-config, aws-sdk-ec2, terralock-core
// ============================================================================

//! ## Overview
//! Region enumeration is one `DescribeRegions` call with `all_regions` set,
//! so opt-in regions appear even when the account has not enabled them. The
//! response order is provider-defined; sorting is the catalog's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_ec2::Client;
use terralock_core::ProviderError;
use terralock_core::regions::RegionLister;

// ============================================================================
// SECTION: Client
// ============================================================================

/// EC2-backed implementation of the region listing capability.
#[derive(Debug, Clone)]
pub struct AwsRegionLister {
    /// EC2 client handle.
    client: Client,
}

impl AwsRegionLister {
    /// Connects using the standard credential/config chain with an explicit
    /// region override for the listing endpoint.
    pub async fn connect(region: &str) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&shared_config),
        }
    }

    /// Wraps an already-configured EC2 client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl RegionLister for AwsRegionLister {
    async fn list_region_codes(&self) -> Result<Vec<String>, ProviderError> {
        let output = self
            .client
            .describe_regions()
            .all_regions(true)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        let codes = output
            .regions()
            .iter()
            .filter_map(|region| region.region_name().map(ToString::to_string))
            .collect();
        Ok(codes)
    }
}
