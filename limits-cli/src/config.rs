//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub rules_path: PathBuf,
    pub ledger_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `LIMITS_RULES_PATH` and `LIMITS_LEDGER_PATH`.
    /// Paths given on the command line take precedence.
    pub fn from_env(
        rules_path: Option<PathBuf>,
        ledger_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        Self::from_lookup(rules_path, ledger_path, |key| env::var(key).ok())
    }

    fn from_lookup(
        rules_path: Option<PathBuf>,
        ledger_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        };

        let rules_path = rules_path
            .or_else(|| var("LIMITS_RULES_PATH"))
            .ok_or_else(|| {
                anyhow::anyhow!("LIMITS_RULES_PATH environment variable or --rules is required")
            })?;

        let ledger_path = ledger_path.or_else(|| var("LIMITS_LEDGER_PATH"));

        Ok(Self {
            rules_path,
            ledger_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_reads_paths_from_environment() {
        let config = Config::from_lookup(
            None,
            None,
            lookup_in(&[
                ("LIMITS_RULES_PATH", "/etc/limits/rules.json"),
                ("LIMITS_LEDGER_PATH", "/var/lib/limits/ledger.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.rules_path, PathBuf::from("/etc/limits/rules.json"));
        assert_eq!(
            config.ledger_path,
            Some(PathBuf::from("/var/lib/limits/ledger.json"))
        );
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = Config::from_lookup(
            Some(PathBuf::from("rules.json")),
            Some(PathBuf::from("ledger.json")),
            lookup_in(&[
                ("LIMITS_RULES_PATH", "/etc/limits/rules.json"),
                ("LIMITS_LEDGER_PATH", "/var/lib/limits/ledger.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.rules_path, PathBuf::from("rules.json"));
        assert_eq!(config.ledger_path, Some(PathBuf::from("ledger.json")));
    }

    #[test]
    fn test_missing_rules_path_fails() {
        let err = Config::from_lookup(None, None, lookup_in(&[])).unwrap_err();
        assert!(err.to_string().contains("LIMITS_RULES_PATH"));

        let blank = lookup_in(&[("LIMITS_RULES_PATH", "  ")]);
        assert!(Config::from_lookup(None, None, blank).is_err());
    }

    #[test]
    fn test_blank_ledger_path_means_no_ledger() {
        let config = Config::from_lookup(
            None,
            None,
            lookup_in(&[
                ("LIMITS_RULES_PATH", "rules.json"),
                ("LIMITS_LEDGER_PATH", ""),
            ]),
        )
        .unwrap();

        assert!(config.ledger_path.is_none());
    }
}
