use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigsError {
    #[error("internal error")]
    InternalError,

    #[error("invalid value for `{0}`")]
    InvalidValue(String),
}
