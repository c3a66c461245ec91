use config_keys::ConfigKey;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "FORUM";

/// Resolves config keys from environment variables named `<PREFIX>_<KEY>`
#[derive(Clone, Debug)]
pub struct EnvConfig {
    prefix: String,
}

#[derive(Debug, Error)]
pub enum EnvConfigError {
    #[error("config key {0} is not set and has no fallback")]
    KeyNotFound(String),
    #[error("failed to parse {var}: {source}")]
    Parse {
        var: String,
        source: serde_json::Error,
    },
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> EnvConfig {
        EnvConfig {
            prefix: prefix.into(),
        }
    }

    pub fn var_name<K: ConfigKey>(&self, key: &K) -> String {
        format!("{}_{}", self.prefix, key).to_uppercase()
    }

    pub fn get<K: ConfigKey>(&self, key: K) -> Result<K::Value, EnvConfigError> {
        let var = self.var_name(&key);
        let value = match std::env::var(&var) {
            Ok(raw) => parse_value::<K>(&var, raw)?,
            Err(_) => match <K as ConfigKey>::fallback() {
                Some(value) => value,
                None => return Err(EnvConfigError::KeyNotFound(key.to_string())),
            },
        };

        Ok(value)
    }

    /// Like [`EnvConfig::get`] but missing keys without fallback become `None`
    pub fn get_opt<K: ConfigKey>(&self, key: K) -> Result<Option<K::Value>, EnvConfigError> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(EnvConfigError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// Values are JSON, bare strings are accepted for string-valued keys
fn parse_value<K: ConfigKey>(var: &str, raw: String) -> Result<K::Value, EnvConfigError> {
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(source) => {
            serde_json::from_value(serde_json::Value::String(raw)).map_err(|_| {
                log::warn!("invalid value for {var}");
                EnvConfigError::Parse {
                    var: var.to_string(),
                    source,
                }
            })
        }
    }
}
