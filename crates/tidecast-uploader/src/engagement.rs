//! Engagement helpers: likes with an explicit optimistic-update pattern,
//! and best-effort view recording.

use anyhow::Result;
use tidecast_core::models::{ContentKind, EngagementCount};
use uuid::Uuid;

use crate::client::AppClient;

/// Like counter updated client-side ahead of server confirmation.
///
/// The pending delta is either confirmed with the server's authoritative
/// value or rolled back to the last confirmed one; callers cannot end up
/// displaying a count the server never acknowledged.
#[derive(Debug, Clone, Copy)]
pub struct OptimisticCounter {
    current: i64,
    confirmed: i64,
}

impl OptimisticCounter {
    pub fn new(confirmed: i64) -> Self {
        Self {
            current: confirmed,
            confirmed,
        }
    }

    pub fn value(&self) -> i64 {
        self.current
    }

    /// Apply a local delta ahead of server confirmation.
    pub fn apply(&mut self, delta: i64) {
        self.current += delta;
    }

    /// Adopt the server's authoritative value.
    pub fn confirm(&mut self, value: i64) {
        self.current = value;
        self.confirmed = value;
    }

    /// Revert to the last confirmed value.
    pub fn rollback(&mut self) {
        self.current = self.confirmed;
    }
}

#[derive(Clone, Debug)]
pub struct Engagement {
    app: AppClient,
}

impl Engagement {
    pub fn new(app: AppClient) -> Self {
        Self { app }
    }

    /// Like a record. The counter is bumped before the request goes out and
    /// rolled back if the server rejects it; the error is returned so the
    /// caller can surface it.
    pub async fn like(
        &self,
        kind: ContentKind,
        id: Uuid,
        counter: &mut OptimisticCounter,
    ) -> Result<i64> {
        counter.apply(1);
        let path = format!("/api/{}/{}/likes", kind.endpoint(), id);
        match self
            .app
            .post_json::<EngagementCount, _>(&path, &serde_json::json!({}))
            .await
        {
            Ok(count) => {
                counter.confirm(count.likes_count);
                Ok(count.likes_count)
            }
            Err(e) => {
                counter.rollback();
                Err(e)
            }
        }
    }

    /// Remove a like, with the same optimistic/rollback behavior.
    pub async fn unlike(
        &self,
        kind: ContentKind,
        id: Uuid,
        counter: &mut OptimisticCounter,
    ) -> Result<i64> {
        counter.apply(-1);
        let path = format!("/api/{}/{}/likes", kind.endpoint(), id);
        match self.app.delete(&path).await {
            Ok(()) => {
                counter.confirm(counter.value());
                Ok(counter.value())
            }
            Err(e) => {
                counter.rollback();
                Err(e)
            }
        }
    }

    /// Record a view, fire-and-forget. Failures are intentionally non-fatal
    /// and only logged.
    pub fn record_view(&self, kind: ContentKind, id: Uuid) {
        let app = self.app.clone();
        let path = format!("/api/{}/{}/views", kind.endpoint(), id);
        tokio::spawn(async move {
            if let Err(e) = app.post_no_content(&path, &serde_json::json!({})).await {
                tracing::warn!(error = %e, media_id = %id, "Failed to record view");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_confirms_server_value() {
        let mut counter = OptimisticCounter::new(10);
        counter.apply(1);
        assert_eq!(counter.value(), 11);
        counter.confirm(12); // server may disagree with the local guess
        assert_eq!(counter.value(), 12);
    }

    #[test]
    fn counter_rolls_back_to_confirmed() {
        let mut counter = OptimisticCounter::new(10);
        counter.apply(1);
        counter.rollback();
        assert_eq!(counter.value(), 10);

        counter.apply(-1);
        assert_eq!(counter.value(), 9);
        counter.rollback();
        assert_eq!(counter.value(), 10);
    }

    #[test]
    fn rollback_after_confirm_keeps_confirmed() {
        let mut counter = OptimisticCounter::new(0);
        counter.apply(1);
        counter.confirm(1);
        counter.rollback();
        assert_eq!(counter.value(), 1);
    }
}
