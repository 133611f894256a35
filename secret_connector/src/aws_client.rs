use crate::{
    client::{SecretPayload, SecretStoreClient},
    errors::SecretStoreError,
};
use async_trait::async_trait;
use aws_sdk_secretsmanager::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    Client,
};
use std::{error::Error, fmt::Debug};
use tracing::{debug, warn};

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const ACCESS_DENIED: &str = "AccessDeniedException";

/// [`SecretStoreClient`] backed by AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct AwsSecretStoreClient {
    client: Client,
}

impl AwsSecretStoreClient {
    pub fn new(client: Client) -> AwsSecretStoreClient {
        AwsSecretStoreClient { client }
    }

    pub fn region(&self) -> Option<&str> {
        self.client.config().region().map(|region| region.as_ref())
    }
}

#[async_trait]
impl SecretStoreClient for AwsSecretStoreClient {
    async fn fetch(&self, name: &str) -> Result<SecretPayload, SecretStoreError> {
        let output = match self.client.get_secret_value().secret_id(name).send().await {
            Err(err) => Err(map_sdk_error(err)),
            Ok(o) => Ok(o),
        }?;

        if let Some(text) = output.secret_string() {
            return Ok(SecretPayload::Text(text.to_owned()));
        }

        let Some(binary) = output.secret_binary() else {
            warn!(secret = name, "secret has no value");
            return Err(SecretStoreError::EmptyPayload);
        };

        Ok(SecretPayload::Binary(binary.as_ref().to_vec()))
    }

    fn close(&self) {
        debug!("secrets manager client released");
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> SecretStoreError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    store_error_from_code(err.code(), message)
}

fn store_error_from_code(code: Option<&str>, message: String) -> SecretStoreError {
    match code {
        Some(RESOURCE_NOT_FOUND) => SecretStoreError::NotFound,
        Some(ACCESS_DENIED) => SecretStoreError::AccessDenied,
        _ => SecretStoreError::RequestFailure(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_error_codes() {
        assert_eq!(
            store_error_from_code(Some("ResourceNotFoundException"), String::new()),
            SecretStoreError::NotFound
        );
        assert_eq!(
            store_error_from_code(Some("AccessDeniedException"), String::new()),
            SecretStoreError::AccessDenied
        );
        assert_eq!(
            store_error_from_code(Some("ThrottlingException"), "rate exceeded".to_owned()),
            SecretStoreError::RequestFailure("rate exceeded".to_owned())
        );
        assert_eq!(
            store_error_from_code(None, "dispatch failure".to_owned()),
            SecretStoreError::RequestFailure("dispatch failure".to_owned())
        );
    }
}
