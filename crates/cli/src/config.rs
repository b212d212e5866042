//! Configuration loading for the composition root.
//!
//! Precedence, lowest first: built-in defaults, `.squad/config.toml` (or the
//! file named by `--config`), command-line flags. Credentials come only from
//! the lookup passed in, which `main` points at the process environment
//! layered over a `.env` file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pipeline::{ArtifactPath, ConfigOverrides, Credentials, SquadConfig, SquadError};
use tracing::debug;

/// Config file read when `--config` is not given. Its absence is fine.
pub const DEFAULT_CONFIG_FILE: &str = ".squad/config.toml";

/// Credential file read from the working directory. Its absence is fine.
pub const ENV_FILE: &str = ".env";

/// The command-line inputs that affect configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Explicit config file; must exist if given.
    pub config_file: Option<PathBuf>,
    /// Report path override.
    pub output: Option<String>,
    /// Template directory override.
    pub templates: Option<String>,
}

/// Builds the run configuration.
///
/// # Errors
///
/// [`SquadError::ConfigurationError`] if an explicit config file is missing,
/// any config file is unreadable or invalid, or a flag value is empty.
pub fn load<F>(options: &ConfigOptions, lookup: F) -> Result<SquadConfig, SquadError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = SquadConfig::new(Credentials::from_lookup(lookup));

    let (path, required) = match &options.config_file {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(overrides) = read_overrides(&path, required)? {
        config.apply(overrides);
    }

    if let Some(output) = &options.output {
        config.report_path = flag_path("--output", output)?;
    }
    if let Some(templates) = &options.templates {
        config.template_dir = flag_path("--templates", templates)?;
    }

    debug!(
        credentials = ?config.credentials,
        bindings = ?config.bindings,
        report_path = %config.report_path,
        template_dir = %config.template_dir,
        "configuration loaded"
    );
    Ok(config)
}

/// Reads the variables of a dotenv file without touching the process
/// environment. A missing file yields no variables.
///
/// # Errors
///
/// [`SquadError::ConfigurationError`] if the file is unreadable or malformed.
pub fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, SquadError> {
    let invalid = |e: dotenvy::Error| SquadError::ConfigurationError {
        message: format!("invalid {}: {e}", path.display()),
    };

    let vars = match dotenvy::from_path_iter(path) {
        Ok(vars) => vars,
        Err(e) if e.not_found() => return Ok(BTreeMap::new()),
        Err(e) => return Err(invalid(e)),
    };
    let vars = vars.collect::<Result<BTreeMap<_, _>, _>>().map_err(invalid)?;

    debug!(path = %path.display(), count = vars.len(), "env file read");
    Ok(vars)
}

/// Layers `process` over `file_vars`: a variable set in the process wins.
pub fn with_env_file<F>(
    process: F,
    file_vars: BTreeMap<String, String>,
) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |name: &str| process(name).or_else(|| file_vars.get(name).cloned())
}

fn read_overrides(path: &Path, required: bool) -> Result<Option<ConfigOverrides>, SquadError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => return Ok(None),
        Err(e) => {
            return Err(SquadError::ConfigurationError {
                message: format!("cannot read {}: {e}", path.display()),
            })
        }
    };

    toml::from_str(&text)
        .map(Some)
        .map_err(|e| SquadError::ConfigurationError {
            message: format!("invalid {}: {e}", path.display()),
        })
}

fn flag_path(flag: &str, value: &str) -> Result<ArtifactPath, SquadError> {
    ArtifactPath::new(value).ok_or_else(|| SquadError::ConfigurationError {
        message: format!("{flag} must not be empty"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{ProviderKind, Role, DEFAULT_REPORT_PATH};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_with_empty_file_and_no_flags() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConfigOptions {
            config_file: Some(write(&dir, "c.toml", "")),
            ..Default::default()
        };

        let config = load(&options, no_env).unwrap();

        assert_eq!(config.report_path.as_str(), DEFAULT_REPORT_PATH);
        assert_eq!(config.credentials.present().count(), 0);
    }

    #[test]
    fn optional_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = read_overrides(&dir.path().join("config.toml"), false).unwrap();
        assert!(overrides.is_none());
    }

    #[test]
    fn credentials_come_from_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConfigOptions {
            config_file: Some(write(&dir, "c.toml", "")),
            ..Default::default()
        };

        let config = load(&options, |name| {
            (name == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();

        assert_eq!(config.credentials.get(ProviderKind::OpenAi), Some("sk-test"));
        assert_eq!(config.credentials.get(ProviderKind::Anthropic), None);
    }

    #[test]
    fn file_then_flags_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(
            &dir,
            "squad.toml",
            r#"
            report_path = "from-file.md"
            template_dir = "file-prompts"

            [bindings]
            auditor = "gemini"
            "#,
        );
        let options = ConfigOptions {
            config_file: Some(file),
            output: Some("from-flag.md".into()),
            templates: None,
        };

        let config = load(&options, no_env).unwrap();

        assert_eq!(config.report_path.as_str(), "from-flag.md");
        assert_eq!(config.template_dir.as_str(), "file-prompts");
        assert_eq!(
            config.bindings.provider_for(Role::Auditor),
            Some(ProviderKind::Gemini)
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConfigOptions {
            config_file: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };

        let err = load(&options, no_env).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: cannot read"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConfigOptions {
            config_file: Some(write(&dir, "bad.toml", "[bindings]\nplanner = \"nobody\"\n")),
            ..Default::default()
        };

        let err = load(&options, no_env).unwrap_err();
        assert!(matches!(err, SquadError::ConfigurationError { .. }));
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn empty_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConfigOptions {
            config_file: Some(write(&dir, "c.toml", "")),
            output: Some(String::new()),
            templates: None,
        };

        let err = load(&options, no_env).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: --output must not be empty"
        );
    }

    #[test]
    fn env_file_supplies_credentials_the_process_lacks() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = write(
            &dir,
            ".env",
            "# keys\nANTHROPIC_API_KEY=file-anthropic\nOPENAI_API_KEY=\"file-openai\"\n",
        );
        let options = ConfigOptions {
            config_file: Some(write(&dir, "c.toml", "")),
            ..Default::default()
        };

        let file_vars = read_env_file(&env_file).unwrap();
        let process = |name: &str| (name == "OPENAI_API_KEY").then(|| "process-openai".to_string());
        let config = load(&options, with_env_file(process, file_vars)).unwrap();

        assert_eq!(
            config.credentials.get(ProviderKind::Anthropic),
            Some("file-anthropic")
        );
        assert_eq!(
            config.credentials.get(ProviderKind::OpenAi),
            Some("process-openai")
        );
        assert_eq!(config.credentials.get(ProviderKind::Gemini), None);
    }

    #[test]
    fn missing_env_file_yields_no_variables() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join(ENV_FILE)).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = write(&dir, ".env", "OPENAI_API_KEY='unterminated\n");

        let err = read_env_file(&env_file).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: invalid"));
    }

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
