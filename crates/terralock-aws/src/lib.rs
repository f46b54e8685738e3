// crates/terralock-aws/src/lib.rs
// ============================================================================
// Module: Terralock AWS Library
// Description: AWS SDK implementations of the terralock capability traits.
// Purpose: Bind the provider-neutral core to S3 and EC2 remote calls.
// Dependencies: async-trait, aws-config, aws-sdk-ec2, aws-sdk-s3, terralock-core
// ============================================================================

//! ## Overview
//! `terralock-aws` provides the concrete AWS clients behind the core traits:
//! [`AwsStateBucketClient`] maps every provisioning capability to its S3
//! control-plane call, and [`AwsRegionLister`] enumerates regions through
//! EC2 with opt-in regions included. SDK configuration is loaded through the
//! standard environment/profile chain with an explicit region override.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bucket;
pub mod regions;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bucket::AwsStateBucketClient;
pub use regions::AwsRegionLister;
