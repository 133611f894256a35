use crate::{AppConfigs, SecretsManagerConfigs};

#[derive(Debug, Clone, Default)]
pub struct Configs {
    pub app: AppConfigs,
    pub secrets: SecretsManagerConfigs,
}
