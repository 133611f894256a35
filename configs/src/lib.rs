mod app;
mod configs;
mod environment;
mod secrets;

pub use app::AppConfigs;
pub use configs::Configs;
pub use environment::Environment;
pub use secrets::SecretsManagerConfigs;
