use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::tokens::TokenStore;

/// Spawn the expired-token sweeper. It runs until `shutdown` flips to true.
pub fn spawn(
    tokens: Arc<dyn TokenStore>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run(tokens, interval, shutdown))
}

async fn run(tokens: Arc<dyn TokenStore>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    tracing::debug!("Token sweeper started (every {}s)", interval.as_secs());

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        if *shutdown.borrow() {
            break;
        }

        let removed = tokens.sweep().await;
        if removed > 0 {
            tracing::info!(
                "Swept {removed} expired reset tokens ({} remaining)",
                tokens.len().await
            );
        }
    }

    tracing::debug!("Token sweeper stopped");
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::tokens::{MemoryTokenStore, TokenStatus};

    #[tokio::test]
    async fn sweeper_drops_expired_tokens_and_stops_on_shutdown() {
        let store = Arc::new(MemoryTokenStore::new(chrono::Duration::minutes(30)));
        let expired = store.issue_at(Utc::now() - chrono::Duration::hours(1));
        let live = store.issue().await;

        let (tx, rx) = watch::channel(false);
        let handle = spawn(store.clone(), Duration::from_millis(10), rx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.lookup(&expired).await, TokenStatus::NotFound);
        assert_eq!(store.lookup(&live).await, TokenStatus::Valid);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
