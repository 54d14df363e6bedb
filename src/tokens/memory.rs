use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::{TokenStatus, TokenStore};

/// Process-local token store keyed by token id.
pub struct MemoryTokenStore {
    /// token -> expires_at
    entries: DashMap<String, DateTime<Utc>>,
    ttl: Duration,
}

impl MemoryTokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        loop {
            let token = Uuid::new_v4().to_string();
            // Never overwrite a live entry.
            if let Entry::Vacant(slot) = self.entries.entry(token.clone()) {
                slot.insert(expires_at);
                return token;
            }
        }
    }

    pub fn lookup_at(&self, token: &str, now: DateTime<Utc>) -> TokenStatus {
        match self.entries.get(token) {
            None => TokenStatus::NotFound,
            Some(expires_at) if now >= *expires_at => TokenStatus::Expired,
            Some(_) => TokenStatus::Valid,
        }
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, expires_at| {
            let live = now < *expires_at;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    async fn lookup(&self, token: &str) -> TokenStatus {
        self.lookup_at(token, Utc::now())
    }

    async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    async fn len(&self) -> usize {
        self.entries.len()
    }
}
