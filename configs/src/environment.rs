use std::{
    env,
    fmt::{Display, Formatter, Result},
};

pub const RUST_ENV_KEY: &str = "RUST_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Staging,
    Prod,
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let printable = match *self {
            Environment::Local => "local",
            Environment::Dev => "development",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        };
        write!(f, "{}", printable)
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Environment::Prod,
            "staging" | "stg" => Environment::Staging,
            "develop" | "development" | "dev" => Environment::Dev,
            _ => Environment::Local,
        }
    }
}

impl Environment {
    pub fn from_rust_env() -> Environment {
        Environment::from(env::var(RUST_ENV_KEY).unwrap_or_default().as_str())
    }

    /// Dotenv file loaded for this environment.
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Local => ".env.local",
            Environment::Dev => ".env.develop",
            Environment::Staging => ".env.staging",
            Environment::Prod => ".env",
        }
    }

    pub fn is_local(&self) -> bool {
        self == &Environment::Local
    }
}
