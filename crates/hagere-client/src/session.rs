//! session token cell
//!
//! authentication itself lives outside this codebase; the console only
//! carries the bearer token it was handed and forgets it on a 401

use std::sync::Arc;
use tokio::sync::RwLock;

/// shared bearer-token holder, cheap to clone across clients
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// forced logout: drop the token everywhere this session is shared
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clear_is_visible_through_clones() {
        let session = Session::with_token("abc");
        let clone = session.clone();
        assert!(clone.is_authenticated().await);

        session.clear().await;
        assert!(!clone.is_authenticated().await);
        assert_eq!(clone.token().await, None);
    }
}
