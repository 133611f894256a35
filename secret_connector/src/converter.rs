use crate::errors::ConversionError;

/// Turns the textual value of a secret into `T`.
///
/// Converters are shared between concurrent calls of a [`crate::SecretConnector`],
/// so implementations must not rely on mutable state. Any closure
/// `Fn(String) -> Result<T, ConversionError>` is a converter as well.
pub trait SecretConverter<T>: Send + Sync {
    fn convert(&self, value: String) -> Result<T, ConversionError>;
}

impl<T, F> SecretConverter<T> for F
where
    F: Fn(String) -> Result<T, ConversionError> + Send + Sync,
{
    fn convert(&self, value: String) -> Result<T, ConversionError> {
        self(value)
    }
}
