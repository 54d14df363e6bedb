pub mod memory;

use async_trait::async_trait;

pub use memory::MemoryTokenStore;

/// Outcome of looking a reset token up in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    NotFound,
    Expired,
}

impl TokenStatus {
    pub fn is_valid(self) -> bool {
        self == TokenStatus::Valid
    }

    pub fn message(self) -> &'static str {
        match self {
            TokenStatus::Valid => "token valid",
            TokenStatus::NotFound => "token not found or expired",
            TokenStatus::Expired => "token expired",
        }
    }
}

/// Storage for issued reset tokens and their expiry times.
/// Handlers only depend on this trait.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Generate a fresh token and record its expiry. Always succeeds.
    async fn issue(&self) -> String;

    /// Report whether `token` is currently usable. Never mutates the entry.
    async fn lookup(&self, token: &str) -> TokenStatus;

    /// Drop entries that have expired. Returns how many were removed.
    async fn sweep(&self) -> usize;

    async fn len(&self) -> usize;
}
