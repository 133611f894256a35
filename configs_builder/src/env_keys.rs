pub const APP_NAME_ENV_KEY: &str = "APP_NAME";
pub const LOG_LEVEL_ENV_KEY: &str = "LOG_LEVEL";
pub const ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY: &str = "ENABLE_EXTERNAL_CRATES_LOGGING";

pub const AWS_REGION_ENV_KEY: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION_ENV_KEY: &str = "AWS_DEFAULT_REGION";
pub const AWS_PROFILE_ENV_KEY: &str = "AWS_PROFILE";
pub const AWS_ENDPOINT_URL_ENV_KEY: &str = "AWS_ENDPOINT_URL";
pub const AWS_ACCESS_KEY_ID_ENV_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY_ENV_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN_ENV_KEY: &str = "AWS_SESSION_TOKEN";
