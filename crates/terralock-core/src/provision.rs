// crates/terralock-core/src/provision.rs
// ============================================================================
// Module: Bucket Provisioning Orchestrator
// Description: Idempotent convergence of a bucket to the secured target state.
// Purpose: Drive the fixed ordered sequence of provider configuration calls.
// Dependencies: async-trait, serde, thiserror, tokio, tokio-util
// ============================================================================

//! ## Overview
//! Provisioning is a fixed sequence of individually idempotent remote calls:
//! existence check, conditional create, then five unconditional configuration
//! overwrites (versioning, encryption, public-access lock-down, lifecycle,
//! tagging). Every step is an overwrite rather than an increment, so a
//! failed run leaves a half-configured bucket that the next run finishes
//! converging. No rollback is attempted and no retries happen here; the
//! caller re-invokes the whole operation, which is always safe.
//!
//! Remote capability is the [`StateBucketClient`] trait so tests can inject
//! failures at any step without a network.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::naming::BackendTarget;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Region the provider treats as its default; `create` for this region must
/// omit the explicit location constraint (the provider represents it as an
/// omitted field on write and an empty field on read).
pub const PROVIDER_DEFAULT_REGION: &str = "us-east-1";

/// Retention window, in days, after which noncurrent object versions are
/// expired. Bounds storage growth from lock-marker churn under versioning.
pub const NONCURRENT_VERSION_RETENTION_DAYS: i32 = 7;

/// Identifier of the lifecycle rule applied to the state bucket.
pub const LIFECYCLE_RULE_ID: &str = "terralock-expire-noncurrent-versions";

/// Fixed descriptive tags applied to the state bucket.
pub const BUCKET_TAGS: &[(&str, &str)] =
    &[("ManagedBy", "terralock"), ("Purpose", "terraform-state")];

// ============================================================================
// SECTION: Provider Capability Set
// ============================================================================

/// Remote capability set the orchestrator depends on.
///
/// Each method is a single synchronous remote call keyed by bucket name.
/// Implementations must make every configuration call an idempotent
/// overwrite of the full setting, never a partial mutation.
#[async_trait]
pub trait StateBucketClient: Send + Sync {
    /// Returns whether a bucket with this name already exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the existence query fails.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ProviderError>;

    /// Creates the bucket in the given region.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the create call fails.
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProviderError>;

    /// Enables object versioning on the bucket.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the versioning call fails.
    async fn put_versioning(&self, bucket: &str) -> Result<(), ProviderError>;

    /// Sets default provider-managed server-side encryption with the
    /// bucket-key optimization enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the encryption call fails.
    async fn put_encryption(&self, bucket: &str) -> Result<(), ProviderError>;

    /// Sets all four public-access-block flags to true.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the public-access-block call fails.
    async fn put_public_access_block(&self, bucket: &str) -> Result<(), ProviderError>;

    /// Sets the lifecycle rule expiring noncurrent versions after
    /// [`NONCURRENT_VERSION_RETENTION_DAYS`] days.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the lifecycle call fails.
    async fn put_lifecycle(&self, bucket: &str) -> Result<(), ProviderError>;

    /// Sets the fixed descriptive tags from [`BUCKET_TAGS`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the tagging call fails.
    async fn put_tagging(&self, bucket: &str) -> Result<(), ProviderError>;
}

#[async_trait]
impl<T: StateBucketClient + ?Sized> StateBucketClient for Arc<T> {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ProviderError> {
        (**self).bucket_exists(bucket).await
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), ProviderError> {
        (**self).create_bucket(bucket, region).await
    }

    async fn put_versioning(&self, bucket: &str) -> Result<(), ProviderError> {
        (**self).put_versioning(bucket).await
    }

    async fn put_encryption(&self, bucket: &str) -> Result<(), ProviderError> {
        (**self).put_encryption(bucket).await
    }

    async fn put_public_access_block(&self, bucket: &str) -> Result<(), ProviderError> {
        (**self).put_public_access_block(bucket).await
    }

    async fn put_lifecycle(&self, bucket: &str) -> Result<(), ProviderError> {
        (**self).put_lifecycle(bucket).await
    }

    async fn put_tagging(&self, bucket: &str) -> Result<(), ProviderError> {
        (**self).put_tagging(bucket).await
    }
}

// ============================================================================
// SECTION: Step Model
// ============================================================================

/// Ordered provisioning steps.
///
/// # Invariants
/// - Variants are stable; error reports and observers label steps with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProvisionStep {
    /// Query whether the bucket already exists.
    ExistenceCheck,
    /// Create the bucket shell.
    Create,
    /// Enable object versioning.
    Versioning,
    /// Set default server-side encryption.
    Encryption,
    /// Block all public access.
    PublicAccessBlock,
    /// Apply the noncurrent-version lifecycle rule.
    Lifecycle,
    /// Apply the fixed descriptive tags.
    Tagging,
}

impl ProvisionStep {
    /// Returns a stable label for the step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExistenceCheck => "existence-check",
            Self::Create => "create",
            Self::Versioning => "versioning",
            Self::Encryption => "encryption",
            Self::PublicAccessBlock => "public-access-block",
            Self::Lifecycle => "lifecycle",
            Self::Tagging => "tagging",
        }
    }
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one provisioning invocation.
///
/// Produced once per call and not persisted. A non-error return is the sole
/// success signal; the flag only distinguishes creation from reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProvisioningOutcome {
    /// True only when the bucket did not previously exist and this call
    /// created it.
    pub bucket_was_created: bool,
}

/// Failure of a named provisioning step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provisioning step {step} failed: {source}")]
pub struct ProvisioningError {
    /// The step that failed.
    pub step: ProvisionStep,
    /// The underlying provider failure.
    #[source]
    pub source: ProviderError,
}

// ============================================================================
// SECTION: Observer Hook
// ============================================================================

/// Dependency-light progress hook for provisioning runs.
///
/// Default methods are no-ops so implementors opt into the events they care
/// about. Observers must not fail and must not block.
pub trait ProvisionObserver: Send + Sync {
    /// Called before a step's remote call is issued.
    fn step_started(&self, step: ProvisionStep) {
        let _ = step;
    }

    /// Called after a step's remote call succeeds.
    fn step_succeeded(&self, step: ProvisionStep) {
        let _ = step;
    }
}

/// Observer that ignores every event.
struct NoopObserver;

impl ProvisionObserver for NoopObserver {}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Drives the provisioning sequence against a [`StateBucketClient`].
pub struct BucketProvisioner<C> {
    /// Provider capability set.
    client: C,
    /// Progress hook.
    observer: Arc<dyn ProvisionObserver>,
}

impl<C: StateBucketClient> BucketProvisioner<C> {
    /// Creates a provisioner with no progress reporting.
    pub fn new(client: C) -> Self {
        Self {
            client,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the progress hook.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProvisionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Converges the target bucket to the secured state.
    ///
    /// Six ordered steps run strictly in sequence; each configuration step
    /// is an idempotent overwrite, so re-running after any failure finishes
    /// the convergence. The returned flag reports creation versus reuse
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError`] naming the step that failed and the
    /// underlying cause. Cancellation through `cancel` surfaces as
    /// [`ProviderError::Cancelled`] under the interrupted step.
    pub async fn ensure_state_bucket(
        &self,
        target: &BackendTarget,
        cancel: &CancellationToken,
    ) -> Result<ProvisioningOutcome, ProvisioningError> {
        let bucket = target.bucket_name();

        // Step 1: existence check. Any query failure other than cancellation
        // is treated as "absent" and the sequence proceeds to create, which
        // can mask a transient outage as a missing bucket.
        self.observer.step_started(ProvisionStep::ExistenceCheck);
        let exists = match guarded(cancel, self.client.bucket_exists(bucket)).await {
            Ok(exists) => exists,
            Err(ProviderError::Cancelled) => {
                return Err(ProvisioningError {
                    step: ProvisionStep::ExistenceCheck,
                    source: ProviderError::Cancelled,
                });
            }
            Err(_) => false,
        };
        self.observer.step_succeeded(ProvisionStep::ExistenceCheck);

        // Step 2: conditional create. The only non-recoverable failure in
        // the sequence; nothing has been mutated yet besides the shell.
        let mut bucket_was_created = false;
        if !exists {
            self.run_step(ProvisionStep::Create, cancel, self.client.create_bucket(bucket, target.region()))
                .await?;
            bucket_was_created = true;
        }

        // Steps 3-6: unconditional idempotent overwrites.
        self.run_step(ProvisionStep::Versioning, cancel, self.client.put_versioning(bucket))
            .await?;
        self.run_step(ProvisionStep::Encryption, cancel, self.client.put_encryption(bucket))
            .await?;
        self.run_step(
            ProvisionStep::PublicAccessBlock,
            cancel,
            self.client.put_public_access_block(bucket),
        )
        .await?;
        self.run_step(ProvisionStep::Lifecycle, cancel, self.client.put_lifecycle(bucket))
            .await?;
        self.run_step(ProvisionStep::Tagging, cancel, self.client.put_tagging(bucket)).await?;

        Ok(ProvisioningOutcome {
            bucket_was_created,
        })
    }

    /// Runs one step's remote call under the cancellation guard and wraps
    /// failures with the step identity.
    async fn run_step(
        &self,
        step: ProvisionStep,
        cancel: &CancellationToken,
        call: impl Future<Output = Result<(), ProviderError>> + Send,
    ) -> Result<(), ProvisioningError> {
        self.observer.step_started(step);
        guarded(cancel, call).await.map_err(|source| ProvisioningError {
            step,
            source,
        })?;
        self.observer.step_succeeded(step);
        Ok(())
    }
}

/// Races a remote call against the cancellation signal.
///
/// Cancellation wins ties so an already-cancelled token aborts before the
/// call's side effects are observed by the caller.
async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ProviderError>> + Send,
) -> Result<T, ProviderError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ProviderError::Cancelled),
        result = call => result,
    }
}

#[cfg(test)]
mod tests {
    use super::ProvisionStep;

    #[test]
    fn step_labels_are_stable() {
        assert_eq!(ProvisionStep::ExistenceCheck.as_str(), "existence-check");
        assert_eq!(ProvisionStep::Create.as_str(), "create");
        assert_eq!(ProvisionStep::PublicAccessBlock.as_str(), "public-access-block");
    }
}
