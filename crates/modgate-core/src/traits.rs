//! Capability traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ModerationRequest, ModerationVerdict};

/// Banned-content classification capability.
///
/// Implemented by the remote model client; transport shells depend on this
/// trait so the backend can be substituted (e.g. with a counting mock in
/// tests).
#[async_trait]
pub trait ModerationCapability: Send + Sync {
    /// Classify one text, returning a fully populated verdict.
    ///
    /// Errors are limited to configuration and transport failures; an
    /// unparseable model reply resolves to the fail-open verdict.
    async fn check(&self, request: &ModerationRequest) -> Result<ModerationVerdict>;
}
