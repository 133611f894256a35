use crate::{
    aws_client_builder::AwsSecretStoreClientBuilder,
    client::SecretStoreClient,
    converter::SecretConverter,
    converters::{as_json, StringConverter},
    errors::{SecretStoreError, SecretsManagerError},
};
use configs::SecretsManagerConfigs;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

/// Retrieves secrets from a [`SecretStoreClient`] and converts them into typed values.
///
/// The connector owns the store client until [`SecretConnector::close`] is called. The
/// default converter is fixed at construction and stays readable after closing.
pub struct SecretConnector<T = String> {
    client: Option<Box<dyn SecretStoreClient>>,
    converter: Arc<dyn SecretConverter<T>>,
}

impl SecretConnector<String> {
    pub fn new(client: Box<dyn SecretStoreClient>) -> SecretConnector<String> {
        SecretConnector::with_converter(client, Arc::new(StringConverter))
    }

    /// Connects to AWS Secrets Manager in `region`, with the credentials of the named profile.
    pub async fn from_profile(
        region: &str,
        profile: &str,
    ) -> Result<SecretConnector<String>, SecretsManagerError> {
        let client = AwsSecretStoreClientBuilder::new()
            .region(region)
            .profile(profile)
            .build()
            .await?;

        Ok(SecretConnector::new(Box::new(client)))
    }

    /// Connects to AWS Secrets Manager resolving region and credentials from the environment.
    pub async fn from_env() -> Result<SecretConnector<String>, SecretsManagerError> {
        let client = AwsSecretStoreClientBuilder::new().build().await?;

        Ok(SecretConnector::new(Box::new(client)))
    }

    pub async fn from_configs(
        cfg: &SecretsManagerConfigs,
    ) -> Result<SecretConnector<String>, SecretsManagerError> {
        let client = AwsSecretStoreClientBuilder::from_configs(cfg).build().await?;

        Ok(SecretConnector::new(Box::new(client)))
    }
}

impl<T> SecretConnector<T> {
    pub fn with_converter(
        client: Box<dyn SecretStoreClient>,
        converter: Arc<dyn SecretConverter<T>>,
    ) -> SecretConnector<T> {
        SecretConnector {
            client: Some(client),
            converter,
        }
    }

    pub fn builder() -> SecretConnectorBuilder<T> {
        SecretConnectorBuilder::default()
    }

    /// Returns the raw value of the secret. Binary secrets are decoded as UTF-8.
    pub async fn get(&self, name: &str) -> Result<String, SecretsManagerError> {
        let fetched = match &self.client {
            Some(client) => client.fetch(name).await,
            None => Err(SecretStoreError::Closed),
        };

        match fetched {
            Err(err) => {
                error!(
                    secret = name,
                    error = err.to_string(),
                    "failure to retrieve secret"
                );
                Err(SecretsManagerError::SecretRetrieval {
                    name: name.to_owned(),
                    source: err,
                })
            }
            Ok(payload) => Ok(payload.into_text()),
        }
    }

    /// Returns the secret converted by `converter`.
    ///
    /// Retrieval failures are returned as they are, conversion failures as
    /// [`SecretsManagerError::SecretConversion`].
    pub async fn get_with<U, C>(&self, name: &str, converter: &C) -> Result<U, SecretsManagerError>
    where
        C: SecretConverter<U> + ?Sized,
    {
        let value = self.get(name).await?;

        match converter.convert(value) {
            Err(err) => {
                error!(
                    secret = name,
                    error = err.to_string(),
                    "failure to convert secret"
                );
                Err(SecretsManagerError::SecretConversion {
                    name: name.to_owned(),
                    source: err,
                })
            }
            Ok(v) => Ok(v),
        }
    }

    /// Returns the secret deserialized from JSON into `U`.
    pub async fn get_json<U>(&self, name: &str) -> Result<U, SecretsManagerError>
    where
        U: DeserializeOwned,
    {
        self.get_with(name, &as_json::<U>()).await
    }

    /// Returns the secret converted by the default converter.
    pub async fn get_default(&self, name: &str) -> Result<T, SecretsManagerError> {
        self.get_with(name, self.converter.as_ref()).await
    }

    /// Whether the secret can be retrieved.
    ///
    /// Any failure counts as absent, including denied access and transient errors.
    pub async fn exists(&self, name: &str) -> bool {
        match self.get(name).await {
            Err(err) => {
                debug!(secret = name, error = err.to_string(), "secret not available");
                false
            }
            Ok(_) => true,
        }
    }

    /// Releases the store client. Calling it again is a no-op.
    pub fn close(&mut self) {
        if let Some(client) = self.client.take() {
            client.close();
            debug!("secret connector closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    pub fn converter(&self) -> Arc<dyn SecretConverter<T>> {
        self.converter.clone()
    }
}

/// Builds a [`SecretConnector`] from optional parts, failing when one is missing.
pub struct SecretConnectorBuilder<T> {
    client: Option<Box<dyn SecretStoreClient>>,
    converter: Option<Arc<dyn SecretConverter<T>>>,
}

impl<T> Default for SecretConnectorBuilder<T> {
    fn default() -> Self {
        SecretConnectorBuilder {
            client: None,
            converter: None,
        }
    }
}

impl<T> SecretConnectorBuilder<T> {
    pub fn client(mut self, client: Box<dyn SecretStoreClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn converter(mut self, converter: Arc<dyn SecretConverter<T>>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn build(self) -> Result<SecretConnector<T>, SecretsManagerError> {
        let Some(client) = self.client else {
            error!("secret store client was not provided");
            return Err(SecretsManagerError::Configuration(
                "secret store client is required".to_owned(),
            ));
        };

        let Some(converter) = self.converter else {
            error!("default converter was not provided");
            return Err(SecretsManagerError::Configuration(
                "default converter is required".to_owned(),
            ));
        };

        Ok(SecretConnector::with_converter(client, converter))
    }
}
