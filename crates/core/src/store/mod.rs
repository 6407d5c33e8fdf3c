//! Stores: the storage boundary where validation and authorization are
//! enforced before anything reaches a repository port.

mod application_store;
mod idea_store;

pub use application_store::ApplicationStore;
pub use idea_store::IdeaStore;

use std::future::Future;
use std::time::Duration;

use crate::error::CoreError;
use crate::identity::Identity;
use crate::policy::{DenyReason, PolicyDecision};

/// Run a repository call under `limit`. Expiry is reported as
/// [`CoreError::Transient`].
pub(crate) async fn bounded<T, F>(limit: Duration, op: &'static str, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = limit.as_millis() as u64;
            tracing::warn!(op, timeout_ms, "Repository call timed out");
            Err(CoreError::Transient(format!(
                "{op} timed out after {timeout_ms}ms"
            )))
        }
    }
}

/// Enforce a policy decision, logging denials.
pub(crate) fn enforce(decision: PolicyDecision, action: &str) -> Result<(), CoreError> {
    if let PolicyDecision::Deny(reason) = decision {
        log_denial(reason, action);
    }
    decision.enforce(action)
}

/// Enforce an authentication-gated decision and hand back the identity.
pub(crate) fn authenticated<'a>(
    decision: PolicyDecision,
    requester: Option<&'a Identity>,
    action: &str,
) -> Result<&'a Identity, CoreError> {
    enforce(decision, action)?;
    requester.ok_or_else(|| {
        log_denial(DenyReason::Anonymous, action);
        DenyReason::Anonymous.into_error(action)
    })
}

fn log_denial(reason: DenyReason, action: &str) {
    tracing::warn!(action, reason = reason.code(), "Authorization denied");
}
