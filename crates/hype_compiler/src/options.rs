//! hype.json parsing and compiler options.

use hype_checker::RegistrationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Options accepted under `compilerOptions` in hype.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// How long a `this.member` reference waits for its member, in milliseconds.
    pub member_wait_timeout_ms: Option<u64>,
    pub allow_member_redefinition: Option<bool>,
}

impl From<&CompilerOptions> for RegistrationOptions {
    fn from(options: &CompilerOptions) -> Self {
        let defaults = RegistrationOptions::default();
        Self {
            member_wait_timeout: options
                .member_wait_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.member_wait_timeout),
            allow_member_redefinition: options
                .allow_member_redefinition
                .unwrap_or(defaults.allow_member_redefinition),
        }
    }
}

/// The hype.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub compiler_options: Option<CompilerOptions>,
    /// AST files to compile, relative to the directory holding hype.json.
    pub files: Option<Vec<String>>,
}

impl ProjectConfig {
    /// The configured options, or the defaults when none are given.
    pub fn options(&self) -> CompilerOptions {
        self.compiler_options.clone().unwrap_or_default()
    }
}

/// Parse a hype.json document from a string.
pub fn parse_config(content: &str) -> Result<ProjectConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse a hype.json file.
pub fn parse_config_file(path: &Path) -> Result<ProjectConfig, crate::CompileError> {
    let content = std::fs::read_to_string(path).map_err(|source| crate::CompileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| crate::CompileError::Config {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(RegistrationOptions::from(&config.options()), RegistrationOptions::default());
    }

    #[test]
    fn test_camel_case_options() {
        let config = parse_config(
            r#"{
                "compilerOptions": {"memberWaitTimeoutMs": 250, "allowMemberRedefinition": true},
                "files": ["main.json"]
            }"#,
        )
        .unwrap();
        let options = RegistrationOptions::from(&config.options());
        assert_eq!(options.member_wait_timeout, Duration::from_millis(250));
        assert!(options.allow_member_redefinition);
        assert_eq!(config.files, Some(vec!["main.json".to_string()]));
    }

    #[test]
    fn test_partial_options_keep_other_defaults() {
        let config =
            parse_config(r#"{"compilerOptions": {"allowMemberRedefinition": true}}"#).unwrap();
        let options = RegistrationOptions::from(&config.options());
        assert_eq!(options.member_wait_timeout, RegistrationOptions::DEFAULT_MEMBER_WAIT_TIMEOUT);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_config(r#"{"compilerOptions": {"memberWaitTimeoutMs": "soon"}}"#).is_err());
    }
}
