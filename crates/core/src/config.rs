use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::backend::ToolCommand;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".solidity-guard.toml";

/// Project-level configuration loaded from [`CONFIG_FILE`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for the per-analysis source file; system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    pub tools: ToolsConfig,
    pub compiler: ToolConfig,
    pub summary: SummaryConfig,
    #[serde(default)]
    pub detectors: HashMap<String, DetectorConfig>,
    #[serde(default)]
    pub suppressions: SuppressionConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub security: ToolConfig,
    pub lint: ToolConfig,
}

/// Overrides for one external command; unset fields keep the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    pub files: Vec<String>,
}

struct ToolDefaults {
    command: &'static str,
    args: &'static [&'static str],
    timeout_secs: u64,
}

const SECURITY_TOOL: ToolDefaults = ToolDefaults {
    command: "slither",
    args: &["{file}", "--json", "-"],
    timeout_secs: 30,
};

const LINT_TOOL: ToolDefaults = ToolDefaults {
    command: "solhint",
    args: &["-f", "json", "{file}"],
    timeout_secs: 15,
};

const COMPILER: ToolDefaults = ToolDefaults {
    command: "solc",
    args: &["--combined-json", "abi", "{file}"],
    timeout_secs: 30,
};

const SUMMARY_TIMEOUT_SECS: u64 = 60;

impl ToolConfig {
    fn resolve(&self, defaults: &ToolDefaults) -> Option<ToolCommand> {
        if self.enabled == Some(false) {
            return None;
        }
        Some(ToolCommand {
            program: self
                .command
                .clone()
                .unwrap_or_else(|| defaults.command.to_string()),
            args: self
                .args
                .clone()
                .unwrap_or_else(|| defaults.args.iter().map(|a| a.to_string()).collect()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(defaults.timeout_secs)),
        })
    }
}

impl Config {
    /// Load config from a TOML file path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// External security analyzer, unless disabled
    pub fn security_tool(&self) -> Option<ToolCommand> {
        self.tools.security.resolve(&SECURITY_TOOL)
    }

    /// External linter, unless disabled
    pub fn lint_tool(&self) -> Option<ToolCommand> {
        self.tools.lint.resolve(&LINT_TOOL)
    }

    /// Compiler used for interface synthesis, unless disabled
    pub fn compiler(&self) -> Option<ToolCommand> {
        self.compiler.resolve(&COMPILER)
    }

    /// Summarizer command; only present when one is configured.
    pub fn summarizer(&self) -> Option<ToolCommand> {
        let program = self.summary.command.clone()?;
        Some(ToolCommand {
            program,
            args: self.summary.args.clone(),
            timeout: Duration::from_secs(self.summary.timeout_secs.unwrap_or(SUMMARY_TIMEOUT_SECS)),
        })
    }

    /// Check if a heuristic detector is enabled according to config.
    pub fn is_detector_enabled(&self, name: &str) -> bool {
        self.detectors
            .get(name)
            .and_then(|d| d.enabled)
            .unwrap_or(true)
    }

    /// Check if a file path should be excluded based on suppression glob patterns.
    pub fn is_file_excluded(&self, file_path: &Path) -> bool {
        let path_str = file_path.to_string_lossy();
        self.suppressions
            .files
            .iter()
            .any(|pattern| glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&path_str)))
    }

    /// Generate default config file content.
    pub fn default_toml() -> &'static str {
        r#"# solidity-guard configuration
# See: https://github.com/safestackai/solidity-guard

# Directory for the temporary copy of each analyzed source handed to the
# external tools. Defaults to the system temp directory.
# temp_dir = "/var/tmp/solidity-guard"

# External security analyzer. `{file}` is replaced with the source path.
# When it is missing, fails, times out or finds nothing, the built-in
# heuristic security detectors are used instead.
[tools.security]
enabled = true
command = "slither"
args = ["{file}", "--json", "-"]
timeout_secs = 30

# External linter; falls back to the built-in style detectors the same way.
[tools.lint]
enabled = true
command = "solhint"
args = ["-f", "json", "{file}"]
timeout_secs = 15

# Compiler used to build the ABI; falls back to heuristic extraction.
[compiler]
enabled = true
command = "solc"
args = ["--combined-json", "abi", "{file}"]
timeout_secs = 30

# Optional narrative summary. The command receives a JSON request on stdin
# and prints the summary on stdout. Used only with `--summary`.
[summary]
# command = "my-summarizer"
# args = []
# timeout_secs = 60

# Per-detector overrides for the built-in heuristics
# [detectors.timestamp-dependence]
# enabled = false

[suppressions]
# Glob patterns for files to skip when analyzing a directory
files = ["test/**", "node_modules/**", "lib/**"]
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.is_detector_enabled("any-detector"));

        let security = config.security_tool().unwrap();
        assert_eq!(security.program, "slither");
        assert_eq!(security.timeout, Duration::from_secs(30));
        assert_eq!(config.lint_tool().unwrap().timeout, Duration::from_secs(15));
        assert_eq!(config.compiler().unwrap().program, "solc");
        assert!(config.summarizer().is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[tools.security]
timeout_secs = 5

[tools.lint]
enabled = false

[summary]
command = "summarize"

[detectors.timestamp-dependence]
enabled = false

[suppressions]
files = ["test/**"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let security = config.security_tool().unwrap();
        assert_eq!(security.program, "slither");
        assert_eq!(security.timeout, Duration::from_secs(5));
        assert!(config.lint_tool().is_none());
        assert_eq!(
            config.summarizer().unwrap().timeout,
            Duration::from_secs(SUMMARY_TIMEOUT_SECS)
        );
        assert!(!config.is_detector_enabled("timestamp-dependence"));
        assert!(config.is_detector_enabled("tx-origin"));
        assert!(config.is_file_excluded(Path::new("test/Vault.t.sol")));
        assert!(!config.is_file_excluded(Path::new("src/Vault.sol")));
    }

    #[test]
    fn test_default_toml_parses_to_defaults() {
        let config: Config = toml::from_str(Config::default_toml()).unwrap();
        assert_eq!(config.security_tool(), Config::default().security_tool());
        assert_eq!(config.lint_tool(), Config::default().lint_tool());
        assert_eq!(config.compiler(), Config::default().compiler());
        assert!(config.summarizer().is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/.solidity-guard.toml")).unwrap();
        assert!(config.suppressions.files.is_empty());
    }

    #[test]
    fn test_temp_dir() {
        assert!(Config::default().temp_dir.is_none());
        let config: Config = toml::from_str("temp_dir = \"/var/tmp/sg\"\n[tools.lint]\nenabled = false\n").unwrap();
        assert_eq!(config.temp_dir, Some(PathBuf::from("/var/tmp/sg")));
        assert!(config.lint_tool().is_none());
    }
}
