//! Generator configuration, loaded from TOML.

use crate::{diagnostic::Severity, engine::EngineTag, synth::RenderOptions};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Environment variable naming the configuration file read by [`GeneratorConfig::from_env`].
pub const CONFIG_ENV: &str = "CONTRACTGEN_CONFIG";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("duplicate engine '{0}' in engines")]
    DuplicateEngine(EngineTag),

    #[error("at least one engine must be enabled")]
    NoEngines,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

///
/// GeneratorConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Enabled engines, in dispatch order.
    pub engines: Vec<EngineTag>,
    pub settings_member: SettingsMemberConfig,
    pub output: RenderOptions,
    pub cache: CacheConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            engines: vec![EngineTag::Json, EngineTag::Xml],
            settings_member: SettingsMemberConfig::default(),
            output: RenderOptions::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Load the file named by `CONTRACTGEN_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engines.is_empty() {
            return Err(ConfigError::NoEngines);
        }

        let mut seen = BTreeSet::new();
        for tag in &self.engines {
            if !seen.insert(*tag) {
                return Err(ConfigError::DuplicateEngine(*tag));
            }
        }

        Ok(())
    }
}

///
/// SettingsMemberConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsMemberConfig {
    pub unresolved: UnresolvedPolicy,
}

///
/// UnresolvedPolicy
///
/// What to do when a marker names a settings member that no direct member
/// satisfies. The unit always falls back to default construction unless
/// the policy is `Deny`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    Allow,
    #[default]
    Warn,
    Deny,
}

impl UnresolvedPolicy {
    /// Severity of the reported diagnostic, if one is reported.
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Allow => None,
            Self::Warn => Some(Severity::Warning),
            Self::Deny => Some(Severity::Error),
        }
    }
}

///
/// CacheConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(GeneratorConfig::from_toml_str("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn full_document_parses() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            engines = ["xml"]

            [settings_member]
            unresolved = "deny"

            [output]
            indent = "    "
            doc_comments = false
            auto_generated_header = false

            [cache]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.engines, [EngineTag::Xml]);
        assert_eq!(config.settings_member.unresolved, UnresolvedPolicy::Deny);
        assert_eq!(config.output.indent, "    ");
        assert!(!config.output.doc_comments);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GeneratorConfig::from_toml_str("[output]\ncolour = true\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn engine_list_is_validated() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("engines = []"),
            Err(ConfigError::NoEngines)
        ));
        assert!(matches!(
            GeneratorConfig::from_toml_str(r#"engines = ["json", "json"]"#),
            Err(ConfigError::DuplicateEngine(EngineTag::Json))
        ));
    }

    #[test]
    fn policy_maps_to_severity() {
        assert_eq!(UnresolvedPolicy::Allow.severity(), None);
        assert_eq!(UnresolvedPolicy::Warn.severity(), Some(Severity::Warning));
        assert_eq!(UnresolvedPolicy::Deny.severity(), Some(Severity::Error));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings_member]\nunresolved = \"allow\"").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.settings_member.unresolved, UnresolvedPolicy::Allow);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            GeneratorConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
