use crate::{
    env_keys::{
        APP_NAME_ENV_KEY, AWS_ACCESS_KEY_ID_ENV_KEY, AWS_DEFAULT_REGION_ENV_KEY,
        AWS_ENDPOINT_URL_ENV_KEY, AWS_PROFILE_ENV_KEY, AWS_REGION_ENV_KEY,
        AWS_SECRET_ACCESS_KEY_ENV_KEY, AWS_SESSION_TOKEN_ENV_KEY,
        ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY, LOG_LEVEL_ENV_KEY,
    },
    errors::ConfigsError,
};
use configs::{AppConfigs, Configs, Environment, SecretsManagerConfigs};
use dotenvy::from_filename;
use std::env::{self, VarError};
use tracing::error;

const SECRETS_ENV_KEYS: [&str; 7] = [
    AWS_REGION_ENV_KEY,
    AWS_DEFAULT_REGION_ENV_KEY,
    AWS_PROFILE_ENV_KEY,
    AWS_ENDPOINT_URL_ENV_KEY,
    AWS_ACCESS_KEY_ID_ENV_KEY,
    AWS_SECRET_ACCESS_KEY_ENV_KEY,
    AWS_SESSION_TOKEN_ENV_KEY,
];

#[derive(Default)]
pub struct ConfigBuilder {
    skip_logging: bool,
}

impl ConfigBuilder {
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Keeps the global tracing subscriber untouched.
    pub fn skip_logging(mut self) -> Self {
        self.skip_logging = true;
        self
    }

    pub fn build(&self) -> Result<Configs, ConfigsError> {
        let env = Environment::from_rust_env();
        from_filename(env.env_file()).ok();

        let mut cfg = Configs::default();
        self.fill_app(&mut cfg, env)?;

        if !self.skip_logging {
            match logging::setup(&cfg.app) {
                Err(_) => Err(ConfigsError::InternalError {}),
                _ => Ok(()),
            }?;
        }

        for key in SECRETS_ENV_KEYS {
            if let Some(value) = self.read_env(key)? {
                self.fill_secrets(&mut cfg.secrets, key, &value);
            }
        }

        Ok(cfg)
    }
}

impl ConfigBuilder {
    fn fill_app(&self, cfg: &mut Configs, env: Environment) -> Result<(), ConfigsError> {
        let name = self.fmt_name(&env, env::var(APP_NAME_ENV_KEY).unwrap_or_default());
        let log_level = env::var(LOG_LEVEL_ENV_KEY).unwrap_or("debug".to_owned());
        let enable_external_creates_logging = self.parse_flag(
            ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY,
            env::var(ENABLE_EXTERNAL_CRATES_LOGGING_ENV_KEY).unwrap_or_default(),
        )?;

        cfg.app = AppConfigs {
            name,
            env,
            log_level,
            enable_external_creates_logging,
        };

        Ok(())
    }

    fn fill_secrets(&self, cfg: &mut SecretsManagerConfigs, key: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        match key {
            AWS_REGION_ENV_KEY => {
                cfg.region = Some(value.to_owned());
                true
            }
            AWS_DEFAULT_REGION_ENV_KEY => {
                if cfg.region.is_none() {
                    cfg.region = Some(value.to_owned());
                }
                true
            }
            AWS_PROFILE_ENV_KEY => {
                cfg.profile = Some(value.to_owned());
                true
            }
            AWS_ENDPOINT_URL_ENV_KEY => {
                cfg.endpoint = Some(value.to_owned());
                true
            }
            AWS_ACCESS_KEY_ID_ENV_KEY => {
                cfg.access_key_id = Some(value.to_owned());
                true
            }
            AWS_SECRET_ACCESS_KEY_ENV_KEY => {
                cfg.secret_access_key = Some(value.to_owned());
                true
            }
            AWS_SESSION_TOKEN_ENV_KEY => {
                cfg.session_token = Some(value.to_owned());
                true
            }
            _ => false,
        }
    }

    fn read_env(&self, key: &str) -> Result<Option<String>, ConfigsError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                error!(key = key, "environment variable is not valid unicode");
                Err(ConfigsError::InvalidValue(key.to_owned()))
            }
        }
    }

    fn parse_flag(&self, key: &str, value: String) -> Result<bool, ConfigsError> {
        if value.trim().is_empty() {
            return Ok(false);
        }

        value.trim().parse().map_err(|_| {
            error!(key = key, value = value, "invalid boolean value");
            ConfigsError::InvalidValue(key.to_owned())
        })
    }

    fn fmt_name(&self, env: &Environment, name: String) -> String {
        let env_str = env.to_string();
        if name.starts_with(&env_str) {
            return name;
        }

        format!("{}-{}", env_str, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_secrets_configs() {
        let builder = ConfigBuilder::new();
        let mut cfg = SecretsManagerConfigs::default();

        assert!(builder.fill_secrets(&mut cfg, AWS_DEFAULT_REGION_ENV_KEY, "us-east-1"));
        assert!(builder.fill_secrets(&mut cfg, AWS_REGION_ENV_KEY, "sa-east-1"));
        assert!(builder.fill_secrets(&mut cfg, AWS_DEFAULT_REGION_ENV_KEY, "eu-west-1"));
        assert!(builder.fill_secrets(&mut cfg, AWS_PROFILE_ENV_KEY, "default"));
        assert!(builder.fill_secrets(&mut cfg, AWS_ENDPOINT_URL_ENV_KEY, "http://localhost:4566"));
        assert!(builder.fill_secrets(&mut cfg, AWS_ACCESS_KEY_ID_ENV_KEY, "local"));
        assert!(builder.fill_secrets(&mut cfg, AWS_SECRET_ACCESS_KEY_ENV_KEY, "local"));
        assert!(builder.fill_secrets(&mut cfg, AWS_SESSION_TOKEN_ENV_KEY, "token"));
        assert!(!builder.fill_secrets(&mut cfg, "HOME", "/root"));

        assert_eq!(
            cfg,
            SecretsManagerConfigs {
                region: Some("sa-east-1".to_owned()),
                profile: Some("default".to_owned()),
                endpoint: Some("http://localhost:4566".to_owned()),
                access_key_id: Some("local".to_owned()),
                secret_access_key: Some("local".to_owned()),
                session_token: Some("token".to_owned()),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn should_only_read_known_variables() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let invalid = OsStr::from_bytes(&[0x66, 0xff]);

        env::set_var("CONFIGS_BUILDER_UNRELATED", invalid);
        let res = ConfigBuilder::new().skip_logging().build();
        assert!(res.is_ok());

        env::set_var(AWS_SESSION_TOKEN_ENV_KEY, invalid);
        let res = ConfigBuilder::new().skip_logging().build();
        assert_eq!(
            res.err(),
            Some(ConfigsError::InvalidValue(AWS_SESSION_TOKEN_ENV_KEY.to_owned()))
        );

        env::remove_var(AWS_SESSION_TOKEN_ENV_KEY);
        env::remove_var("CONFIGS_BUILDER_UNRELATED");
    }

    #[test]
    fn should_ignore_empty_values() {
        let builder = ConfigBuilder::new();
        let mut cfg = SecretsManagerConfigs::default();

        assert!(!builder.fill_secrets(&mut cfg, AWS_REGION_ENV_KEY, "  "));
        assert!(!builder.fill_secrets(&mut cfg, AWS_PROFILE_ENV_KEY, ""));

        assert_eq!(cfg, SecretsManagerConfigs::default());
    }

    #[test]
    fn should_parse_flags() {
        let builder = ConfigBuilder::new();

        assert_eq!(builder.parse_flag("FLAG", "true".to_owned()), Ok(true));
        assert_eq!(builder.parse_flag("FLAG", " false ".to_owned()), Ok(false));
        assert_eq!(builder.parse_flag("FLAG", String::new()), Ok(false));
        assert_eq!(
            builder.parse_flag("FLAG", "yes".to_owned()),
            Err(ConfigsError::InvalidValue("FLAG".to_owned()))
        );
    }

    #[test]
    fn should_prefix_name_with_environment() {
        let builder = ConfigBuilder::new();

        assert_eq!(
            builder.fmt_name(&Environment::Local, "connector".to_owned()),
            "local-connector"
        );
        assert_eq!(
            builder.fmt_name(&Environment::Prod, "prod-connector".to_owned()),
            "prod-connector"
        );
    }
}
