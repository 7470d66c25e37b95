use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use platform_authz::Role;
use products_directory::IdStrategy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    /// Role for requests that present no recognised token.
    pub default_caller_role: Role,
    pub admin_tokens: Vec<String>,
    pub id_strategy: IdStrategy,
    pub strict_validation: bool,
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: Vec::new(),
            default_caller_role: Role::Employee,
            admin_tokens: Vec::new(),
            id_strategy: IdStrategy::default(),
            strict_validation: false,
            seed_file: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cors_allowed_origins = split_list(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());
        let admin_tokens = split_list(&lookup("ADMIN_TOKENS").unwrap_or_default());

        let default_caller_role = match lookup("DEFAULT_CALLER_ROLE") {
            Some(raw) => raw.parse().context("invalid DEFAULT_CALLER_ROLE")?,
            None => Role::Employee,
        };

        let id_strategy = match lookup("DIRECTORY_ID_STRATEGY") {
            Some(raw) => raw.parse().context("invalid DIRECTORY_ID_STRATEGY")?,
            None => IdStrategy::default(),
        };

        let strict_validation = match lookup("DIRECTORY_STRICT_VALIDATION") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("invalid DIRECTORY_STRICT_VALIDATION `{}`", raw))?,
            None => false,
        };

        let seed_file = lookup("DIRECTORY_SEED_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            cors_allowed_origins,
            default_caller_role,
            admin_tokens,
            id_strategy,
            strict_validation,
            seed_file,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_are_unprivileged() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.default_caller_role, Role::Employee);
        assert!(config.admin_tokens.is_empty());
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.id_strategy, IdStrategy::Count);
        assert!(!config.strict_validation);
        assert_eq!(config.seed_file, None);
    }

    #[test]
    fn lists_and_flags_are_parsed() {
        let config = config_from(&[
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, ,https://hr.example.com"),
            ("ADMIN_TOKENS", "alpha,beta"),
            ("DEFAULT_CALLER_ROLE", "admin"),
            ("DIRECTORY_ID_STRATEGY", "sequence"),
            ("DIRECTORY_STRICT_VALIDATION", "yes"),
            ("DIRECTORY_SEED_FILE", "./seed.json"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            ["http://localhost:5173", "https://hr.example.com"]
        );
        assert_eq!(config.admin_tokens, ["alpha", "beta"]);
        assert_eq!(config.default_caller_role, Role::Admin);
        assert_eq!(config.id_strategy, IdStrategy::Sequence);
        assert!(config.strict_validation);
        assert_eq!(config.seed_file, Some(PathBuf::from("./seed.json")));
    }

    #[test]
    fn bad_values_fail_loudly() {
        assert!(config_from(&[("DEFAULT_CALLER_ROLE", "root")]).is_err());
        assert!(config_from(&[("DIRECTORY_ID_STRATEGY", "random")]).is_err());
        assert!(config_from(&[("DIRECTORY_STRICT_VALIDATION", "maybe")]).is_err());
    }
}
