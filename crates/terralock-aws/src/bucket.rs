// crates/terralock-aws/src/bucket.rs
// ============================================================================
// Module: AWS State Bucket Client
// Description: S3 control-plane implementation of the capability set.
// Purpose: Map each provisioning capability to one idempotent S3 call.
// Dependencies: async-trait, aws-config, aws-sdk-s3, terralock-core
// ============================================================================

//! ## Overview
//! Every capability is one S3 control-plane call keyed by bucket name. The
//! configuration calls (`put_*`) overwrite the entire setting, which is what
//! makes the orchestrator's retry-to-convergence model safe. The one wire
//! quirk lives in [`location_constraint_for`]: the provider's default region
//! must be encoded as an omitted location constraint on create, while every
//! other region is passed explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::BucketLifecycleConfiguration;
use aws_sdk_s3::types::BucketLocationConstraint;
use aws_sdk_s3::types::BucketVersioningStatus;
use aws_sdk_s3::types::CreateBucketConfiguration;
use aws_sdk_s3::types::ExpirationStatus;
use aws_sdk_s3::types::LifecycleRule;
use aws_sdk_s3::types::LifecycleRuleFilter;
use aws_sdk_s3::types::NoncurrentVersionExpiration;
use aws_sdk_s3::types::PublicAccessBlockConfiguration;
use aws_sdk_s3::types::ServerSideEncryption;
use aws_sdk_s3::types::ServerSideEncryptionByDefault;
use aws_sdk_s3::types::ServerSideEncryptionConfiguration;
use aws_sdk_s3::types::ServerSideEncryptionRule;
use aws_sdk_s3::types::Tag;
use aws_sdk_s3::types::Tagging;
use aws_sdk_s3::types::VersioningConfiguration;
use terralock_core::ProviderError;
use terralock_core::provision::BUCKET_TAGS;
use terralock_core::provision::LIFECYCLE_RULE_ID;
use terralock_core::provision::NONCURRENT_VERSION_RETENTION_DAYS;
use terralock_core::provision::PROVIDER_DEFAULT_REGION;
use terralock_core::provision::StateBucketClient;

// ============================================================================
// SECTION: Region Encoding
// ============================================================================

/// Returns the location constraint to send on create, if any.
///
/// The provider represents its default region two different ways: as an
/// omitted field on write and as an empty field on read. Create calls for
/// the default region must therefore carry no constraint at all.
#[must_use]
pub fn location_constraint_for(region: &str) -> Option<BucketLocationConstraint> {
    if region == PROVIDER_DEFAULT_REGION {
        None
    } else {
        Some(BucketLocationConstraint::from(region))
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// S3-backed implementation of the state bucket capability set.
#[derive(Debug, Clone)]
pub struct AwsStateBucketClient {
    /// S3 client handle.
    client: Client,
}

impl AwsStateBucketClient {
    /// Connects using the standard credential/config chain with an explicit
    /// region override.
    pub async fn connect(region: &str) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&shared_config),
        }
    }

    /// Wraps an already-configured S3 client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl StateBucketClient for AwsStateBucketClient {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ProviderError> {
        // HeadBucket has no body; any error (404, 403, network) is reported
        // to the orchestrator, which decides how to treat it.
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(ProviderError::remote)
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProviderError> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if let Some(constraint) = location_constraint_for(region) {
            let config =
                CreateBucketConfiguration::builder().location_constraint(constraint).build();
            request = request.create_bucket_configuration(config);
        }
        request.send().await.map_err(ProviderError::remote)?;
        Ok(())
    }

    async fn put_versioning(&self, bucket: &str) -> Result<(), ProviderError> {
        let config =
            VersioningConfiguration::builder().status(BucketVersioningStatus::Enabled).build();
        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(config)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        Ok(())
    }

    async fn put_encryption(&self, bucket: &str) -> Result<(), ProviderError> {
        let by_default = ServerSideEncryptionByDefault::builder()
            .sse_algorithm(ServerSideEncryption::Aes256)
            .build()
            .map_err(ProviderError::remote)?;
        let rule = ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(by_default)
            .bucket_key_enabled(true)
            .build();
        let config = ServerSideEncryptionConfiguration::builder()
            .rules(rule)
            .build()
            .map_err(ProviderError::remote)?;
        self.client
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        Ok(())
    }

    async fn put_public_access_block(&self, bucket: &str) -> Result<(), ProviderError> {
        let config = PublicAccessBlockConfiguration::builder()
            .block_public_acls(true)
            .block_public_policy(true)
            .ignore_public_acls(true)
            .restrict_public_buckets(true)
            .build();
        self.client
            .put_public_access_block()
            .bucket(bucket)
            .public_access_block_configuration(config)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        Ok(())
    }

    async fn put_lifecycle(&self, bucket: &str) -> Result<(), ProviderError> {
        let expiration = NoncurrentVersionExpiration::builder()
            .noncurrent_days(NONCURRENT_VERSION_RETENTION_DAYS)
            .build();
        let rule = LifecycleRule::builder()
            .id(LIFECYCLE_RULE_ID)
            .status(ExpirationStatus::Enabled)
            .filter(LifecycleRuleFilter::builder().prefix("").build())
            .noncurrent_version_expiration(expiration)
            .build()
            .map_err(ProviderError::remote)?;
        let config = BucketLifecycleConfiguration::builder()
            .rules(rule)
            .build()
            .map_err(ProviderError::remote)?;
        self.client
            .put_bucket_lifecycle_configuration()
            .bucket(bucket)
            .lifecycle_configuration(config)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        Ok(())
    }

    async fn put_tagging(&self, bucket: &str) -> Result<(), ProviderError> {
        let mut tagging = Tagging::builder();
        for (key, value) in BUCKET_TAGS {
            let tag =
                Tag::builder().key(*key).value(*value).build().map_err(ProviderError::remote)?;
            tagging = tagging.tag_set(tag);
        }
        let tagging = tagging.build().map_err(ProviderError::remote)?;
        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(tagging)
            .send()
            .await
            .map_err(ProviderError::remote)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::location_constraint_for;

    #[test]
    fn default_region_omits_the_location_constraint() {
        assert!(location_constraint_for("us-east-1").is_none());
    }

    #[test]
    fn other_regions_carry_an_explicit_constraint() {
        let rendered =
            location_constraint_for("eu-west-1").map(|constraint| constraint.as_str().to_string());
        assert_eq!(rendered, Some("eu-west-1".to_string()));
        let rendered = location_constraint_for("ap-southeast-2")
            .map(|constraint| constraint.as_str().to_string());
        assert_eq!(rendered, Some("ap-southeast-2".to_string()));
    }
}
