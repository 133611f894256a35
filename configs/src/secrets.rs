/// Settings used to reach the secret store. Unset values are resolved by the AWS
/// default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretsManagerConfigs {
    ///Default: resolved from the environment
    pub region: Option<String>,
    ///Default: resolved from the environment
    pub profile: Option<String>,
    ///Used with local stand-ins of the secret store
    pub endpoint: Option<String>,
    ///Default:
    pub access_key_id: Option<String>,
    ///Default:
    pub secret_access_key: Option<String>,
    ///Default:
    pub session_token: Option<String>,
}

