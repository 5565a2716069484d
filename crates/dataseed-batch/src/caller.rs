use std::sync::Arc;

use async_trait::async_trait;
use dataseed_core::{CallOutcome, WorkItem};

/// The external call capability.
///
/// One invocation is one attempt; retries are applied by [`crate::RetryPolicy`].
/// Implementations classify their own failures as transient or permanent.
#[async_trait]
pub trait Caller: Send + Sync {
    async fn call(&self, item: &WorkItem) -> CallOutcome;
}

#[async_trait]
impl<C: Caller + ?Sized> Caller for Arc<C> {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        self.as_ref().call(item).await
    }
}
