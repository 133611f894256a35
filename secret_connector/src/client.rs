use crate::errors::SecretStoreError;
use async_trait::async_trait;
#[cfg(any(test, feature = "mocks"))]
use mockall::*;

/// Raw value of a secret as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl SecretPayload {
    /// Text form of the payload. Binary payloads are decoded as UTF-8, replacing invalid
    /// sequences with `U+FFFD`.
    pub fn into_text(self) -> String {
        match self {
            SecretPayload::Text(text) => text,
            SecretPayload::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<SecretPayload, SecretStoreError>;

    /// Releases the resources held by the client.
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_is_returned_as_is() {
        let payload = SecretPayload::Text("secret-value-123".to_owned());
        assert_eq!(payload.into_text(), "secret-value-123");
    }

    #[test]
    fn binary_payload_is_decoded() {
        let payload = SecretPayload::Binary(b"binary-secret-content".to_vec());
        assert_eq!(payload.into_text(), "binary-secret-content");

        let invalid = SecretPayload::Binary(vec![b'o', b'k', 0xff]);
        assert_eq!(invalid.into_text(), "ok\u{fffd}");
    }
}
