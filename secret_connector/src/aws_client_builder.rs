use crate::{aws_client::AwsSecretStoreClient, errors::SecretsManagerError};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::{config::Credentials, Client};
use configs::SecretsManagerConfigs;
use tracing::{debug, error};

const STATIC_CREDENTIALS_PROVIDER: &str = "secret-connector";

/// Resolves the configuration of an [`AwsSecretStoreClient`].
///
/// Every setting left unset is resolved through the AWS default provider chain
/// (environment variables, shared config and credentials files, container and
/// instance metadata).
#[derive(Debug, Default, Clone)]
pub struct AwsSecretStoreClientBuilder {
    region: Option<String>,
    profile: Option<String>,
    endpoint: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
}

impl AwsSecretStoreClientBuilder {
    pub fn new() -> AwsSecretStoreClientBuilder {
        AwsSecretStoreClientBuilder::default()
    }

    pub fn from_configs(cfg: &SecretsManagerConfigs) -> AwsSecretStoreClientBuilder {
        AwsSecretStoreClientBuilder {
            region: cfg.region.clone(),
            profile: cfg.profile.clone(),
            endpoint: cfg.endpoint.clone(),
            access_key_id: cfg.access_key_id.clone(),
            secret_access_key: cfg.secret_access_key.clone(),
            session_token: cfg.session_token.clone(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Named profile of the shared AWS config and credentials files.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Overrides the service endpoint, e.g. to point at a local stand-in.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn static_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self.session_token = session_token;
        self
    }

    pub async fn build(&self) -> Result<AwsSecretStoreClient, SecretsManagerError> {
        self.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&self.access_key_id, &self.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                self.session_token.clone(),
                None,
                STATIC_CREDENTIALS_PROVIDER,
            ));
        }

        let config = loader.load().await;
        debug!(
            region = config.region().map(|r| r.to_string()),
            "secrets manager client configured"
        );

        Ok(AwsSecretStoreClient::new(Client::new(&config)))
    }

    fn validate(&self) -> Result<(), SecretsManagerError> {
        let required = [
            ("region", &self.region),
            ("profile", &self.profile),
            ("endpoint", &self.endpoint),
        ];

        for (field, value) in required {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                error!(field = field, "empty secrets manager client setting");
                return Err(SecretsManagerError::Configuration(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        match (&self.access_key_id, &self.secret_access_key) {
            (Some(_), None) | (None, Some(_)) => {
                error!("incomplete static credentials");
                Err(SecretsManagerError::Configuration(
                    "access key id and secret access key must be provided together".to_owned(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_configs() {
        let cfg = SecretsManagerConfigs {
            region: Some("sa-east-1".to_owned()),
            profile: Some("default".to_owned()),
            endpoint: Some("http://localhost:4566".to_owned()),
            ..SecretsManagerConfigs::default()
        };

        let builder = AwsSecretStoreClientBuilder::from_configs(&cfg);

        assert_eq!(builder.region.as_deref(), Some("sa-east-1"));
        assert_eq!(builder.profile.as_deref(), Some("default"));
        assert_eq!(builder.endpoint.as_deref(), Some("http://localhost:4566"));
        assert!(builder.validate().is_ok());
    }

    #[tokio::test]
    async fn rejects_empty_settings() {
        let res = AwsSecretStoreClientBuilder::new()
            .region("  ")
            .build()
            .await;

        assert!(matches!(res, Err(SecretsManagerError::Configuration(_))));

        let res = AwsSecretStoreClientBuilder::new()
            .region("us-east-1")
            .profile("")
            .build()
            .await;

        assert!(matches!(res, Err(SecretsManagerError::Configuration(_))));
    }

    #[tokio::test]
    async fn rejects_incomplete_static_credentials() {
        let cfg = SecretsManagerConfigs {
            region: Some("us-east-1".to_owned()),
            access_key_id: Some("local".to_owned()),
            ..SecretsManagerConfigs::default()
        };

        let res = AwsSecretStoreClientBuilder::from_configs(&cfg).build().await;

        assert!(matches!(res, Err(SecretsManagerError::Configuration(_))));
    }

    #[tokio::test]
    async fn builds_client_with_explicit_settings() {
        let client = AwsSecretStoreClientBuilder::new()
            .region("sa-east-1")
            .endpoint("http://localhost:4566")
            .static_credentials("local", "local", None)
            .build()
            .await
            .unwrap();

        assert_eq!(client.region(), Some("sa-east-1"));
    }
}
