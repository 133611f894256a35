use std::{
    error::Error as StdError,
    num::{ParseFloatError, ParseIntError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretsManagerError {
    #[error("invalid secret connector configuration - `{0}`")]
    Configuration(String),

    #[error("failure to retrieve the secret `{name}`")]
    SecretRetrieval {
        name: String,
        #[source]
        source: SecretStoreError,
    },

    #[error("failure to convert the secret `{name}`")]
    SecretConversion {
        name: String,
        #[source]
        source: ConversionError,
    },
}

impl SecretsManagerError {
    /// Name of the secret the failure refers to, if any.
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            SecretsManagerError::Configuration(_) => None,
            SecretsManagerError::SecretRetrieval { name, .. }
            | SecretsManagerError::SecretConversion { name, .. } => Some(name),
        }
    }
}

/// Failures reported by a [`crate::SecretStoreClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretStoreError {
    #[error("secret not found")]
    NotFound,

    #[error("access to the secret was denied")]
    AccessDenied,

    #[error("secret has neither a string nor a binary value")]
    EmptyPayload,

    #[error("failure to send request - `{0}`")]
    RequestFailure(String),

    #[error("secret store client was closed")]
    Closed,
}

/// Failures raised by a [`crate::SecretConverter`].
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid integer value")]
    InvalidInteger(#[from] ParseIntError),

    #[error("invalid floating point value")]
    InvalidFloat(#[from] ParseFloatError),

    #[error("invalid json value")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown json field - `{0}`")]
    UnknownField(String),

    #[error("invalid delimiter pattern")]
    InvalidDelimiter(#[from] regex::Error),

    #[error("{0}")]
    Custom(Box<dyn StdError + Send + Sync>),
}

impl ConversionError {
    pub fn custom<E>(err: E) -> ConversionError
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        ConversionError::Custom(err.into())
    }

    pub fn message(msg: impl Into<String>) -> ConversionError {
        ConversionError::Custom(msg.into().into())
    }
}
