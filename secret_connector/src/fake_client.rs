use crate::{
    client::{SecretPayload, SecretStoreClient},
    errors::SecretStoreError,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// In-memory [`SecretStoreClient`] for local runs and tests.
#[derive(Debug, Default, Clone)]
pub struct FakeSecretClient {
    secrets: HashMap<String, SecretPayload>,
    closes: Arc<AtomicUsize>,
}

impl FakeSecretClient {
    pub fn new() -> FakeSecretClient {
        FakeSecretClient::default()
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .insert(name.into(), SecretPayload::Text(value.into()));
        self
    }

    pub fn with_binary(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.secrets
            .insert(name.into(), SecretPayload::Binary(value.into()));
        self
    }

    /// How many times `close` was called on this client or any of its clones.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStoreClient for FakeSecretClient {
    async fn fetch(&self, name: &str) -> Result<SecretPayload, SecretStoreError> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or(SecretStoreError::NotFound)
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_registered_secrets() {
        let client = FakeSecretClient::new()
            .with_text("db-password", "p@ss")
            .with_binary("tls-key", b"key".to_vec());

        assert_eq!(
            client.fetch("db-password").await,
            Ok(SecretPayload::Text("p@ss".to_owned()))
        );
        assert_eq!(
            client.fetch("tls-key").await,
            Ok(SecretPayload::Binary(b"key".to_vec()))
        );
        assert_eq!(
            client.fetch("missing").await,
            Err(SecretStoreError::NotFound)
        );
    }

    #[test]
    fn counts_closes_across_clones() {
        let client = FakeSecretClient::new();
        let observer = client.clone();

        client.close();

        assert_eq!(observer.close_count(), 1);
    }
}
