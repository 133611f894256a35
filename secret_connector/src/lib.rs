mod aws_client;
mod aws_client_builder;
mod client;
mod connector;
mod converter;
mod fake_client;

pub mod converters;
pub mod errors;
pub use aws_client::AwsSecretStoreClient;
pub use aws_client_builder::AwsSecretStoreClientBuilder;
#[cfg(feature = "mocks")]
pub use client::MockSecretStoreClient;
pub use client::{SecretPayload, SecretStoreClient};
pub use connector::{SecretConnector, SecretConnectorBuilder};
pub use converter::SecretConverter;
pub use fake_client::FakeSecretClient;
