#![allow(clippy::multiple_crate_versions)]

use crowdcontrol::Credentials;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

pub const APP_NAME: &str = "crowd";

/// Where the Crowd application password comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppPassword {
    /// Used verbatim: surrounding spaces may be part of the password.
    Literal(String),
    Env { env: String },
    Cmd { cmd: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrowdConfig {
    /// Crowd base URL, e.g. `http://localhost:8095/crowd`
    pub base_url: Option<String>,
    /// Application name registered in Crowd
    pub app_name: Option<String>,
    /// Application password registered in Crowd
    pub app_password: Option<AppPassword>,
    /// Per-request timeout; the HTTP client default applies when unset
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum CrowdConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid Crowd settings in config: {0}")]
    Credentials(#[from] crowdcontrol::Error),
    #[error("app_password in config is empty")]
    EmptyAppPassword,
    #[error("environment variable '{env}' not found")]
    MissingEnv { env: String },
    #[error("app_password command failed: {cmd}: {message}")]
    CommandFailed { cmd: String, message: String },
    #[error("failed to execute app_password command '{cmd}': {source}")]
    CommandExec { cmd: String, source: io::Error },
    #[error("app_password command returned empty output: {cmd}")]
    CommandEmpty { cmd: String },
    #[error(
        "Crowd settings required but stdin is not interactive; set `base_url`, `app_name` and `app_password` in {path}",
        path = .path.display()
    )]
    NonInteractive { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, CrowdConfigError>;

impl CrowdConfig {
    /// Loads the config file from the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or deserialized.
    pub fn load() -> Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Loads config or walks the user through entering missing Crowd settings.
    ///
    /// # Errors
    /// Returns an error if the config cannot be loaded, the password cannot be
    /// resolved, or onboarding fails (including non-interactive stdin).
    pub fn load_or_onboard() -> Result<Self> {
        let config = Self::load()?;
        if config.is_complete() {
            return Ok(config);
        }
        config.onboard()
    }

    /// Stores the config to the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn store(&self) -> Result<()> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }

    /// Path of the config file in the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the OS config directory cannot be determined.
    pub fn path() -> Result<PathBuf> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Resolves the password source and validates everything into [`Credentials`].
    ///
    /// # Errors
    /// Returns [`CrowdConfigError::Credentials`] wrapping
    /// [`crowdcontrol::Error::NullInput`] for a missing setting, or an error if
    /// the password source cannot be resolved.
    pub fn credentials(&self) -> Result<Credentials> {
        let mut builder = Credentials::builder();
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url.trim());
        }
        if let Some(app_name) = &self.app_name {
            builder = builder.with_app_name(app_name.trim());
        }
        if let Some(app_password) = &self.app_password {
            builder = builder.with_app_password(app_password.resolve()?);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn is_complete(&self) -> bool {
        is_filled(self.base_url.as_deref())
            && is_filled(self.app_name.as_deref())
            && self.app_password.as_ref().is_some_and(AppPassword::is_set)
    }

    fn onboard(mut self) -> Result<Self> {
        let config_path = Self::path()?;
        if !io::stdin().is_terminal() {
            return Err(CrowdConfigError::NonInteractive { path: config_path });
        }

        if !config_path.as_os_str().is_empty() {
            eprintln!(
                "Crowd config not found or incomplete. It will be stored at: {}",
                config_path.display()
            );
        }

        if !is_filled(self.base_url.as_deref()) {
            self.base_url = Some(prompt("Crowd base URL (e.g. http://localhost:8095/crowd): ")?);
        }
        if !is_filled(self.app_name.as_deref()) {
            self.app_name = Some(prompt("Crowd application name: ")?);
        }
        if !self.app_password.as_ref().is_some_and(AppPassword::is_set) {
            self.app_password = Some(AppPassword::Literal(prompt("Crowd application password: ")?));
        }

        self.credentials()?;
        self.store()?;
        Ok(self)
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

impl AppPassword {
    /// A blank literal counts as unset so onboarding asks for it again.
    fn is_set(&self) -> bool {
        match self {
            Self::Literal(value) => !value.is_empty(),
            Self::Env { .. } | Self::Cmd { .. } => true,
        }
    }

    fn resolve(&self) -> Result<String> {
        match self {
            Self::Literal(value) => {
                if value.is_empty() {
                    return Err(CrowdConfigError::EmptyAppPassword);
                }
                Ok(value.clone())
            }
            Self::Env { env } => {
                let value = std::env::var(env)
                    .map_err(|_| CrowdConfigError::MissingEnv { env: env.clone() })?;
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(CrowdConfigError::EmptyAppPassword);
                }
                Ok(trimmed.to_string())
            }
            Self::Cmd { cmd } => {
                let output = Command::new("sh")
                    .arg("-c")
                    .arg(cmd)
                    .output()
                    .map_err(|e| CrowdConfigError::CommandExec {
                        cmd: cmd.clone(),
                        source: e,
                    })?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(CrowdConfigError::CommandFailed {
                        cmd: cmd.clone(),
                        message: stderr.trim().to_string(),
                    });
                }

                let stdout = String::from_utf8_lossy(&output.stdout);
                let trimmed = stdout.trim();
                if trimmed.is_empty() {
                    return Err(CrowdConfigError::CommandEmpty { cmd: cmd.clone() });
                }
                Ok(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppPassword, CrowdConfig, CrowdConfigError};
    use std::time::Duration;

    fn complete() -> CrowdConfig {
        CrowdConfig {
            base_url: Some("http://localhost:8095/crowd/".to_string()),
            app_name: Some("crowdline".to_string()),
            app_password: Some(AppPassword::Literal("secret".to_string())),
            timeout_secs: Some(10),
        }
    }

    #[test]
    fn resolves_literal_password() {
        let password = AppPassword::Literal(" spaced ".to_string());
        assert_eq!(password.resolve().unwrap(), " spaced ");
    }

    #[test]
    fn resolves_env_password() {
        let var = format!("CROWDCONFIG_TEST_PASSWORD_{}", std::process::id());
        std::env::set_var(&var, "envvalue\n");
        let password = AppPassword::Env { env: var.clone() };
        assert_eq!(password.resolve().unwrap(), "envvalue");
        std::env::remove_var(&var);
    }

    #[test]
    fn missing_env_is_error() {
        let password = AppPassword::Env {
            env: "CROWDCONFIG_TEST_SURELY_UNSET".to_string(),
        };
        let err = password.resolve().unwrap_err();
        assert!(matches!(err, CrowdConfigError::MissingEnv { .. }));
    }

    #[test]
    fn resolves_cmd_password() {
        let password = AppPassword::Cmd {
            cmd: "printf 'cmdvalue'".to_string(),
        };
        assert_eq!(password.resolve().unwrap(), "cmdvalue");
    }

    #[test]
    fn cmd_empty_output_is_error() {
        let password = AppPassword::Cmd {
            cmd: "printf ''".to_string(),
        };
        let err = password.resolve().unwrap_err();
        assert!(matches!(err, CrowdConfigError::CommandEmpty { .. }));
    }

    #[test]
    fn failing_cmd_is_error() {
        let password = AppPassword::Cmd {
            cmd: "exit 3".to_string(),
        };
        let err = password.resolve().unwrap_err();
        assert!(matches!(err, CrowdConfigError::CommandFailed { .. }));
    }

    #[test]
    fn complete_config_builds_credentials() {
        let config = complete();
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.base_url(), "http://localhost:8095/crowd");
        assert_eq!(credentials.app_name(), "crowdline");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert!(config.is_complete());
    }

    #[test]
    fn missing_base_url_is_null_input() {
        let config = CrowdConfig {
            base_url: None,
            ..complete()
        };
        let err = config.credentials().unwrap_err();
        assert!(matches!(
            err,
            CrowdConfigError::Credentials(crowdcontrol::Error::NullInput("base_url"))
        ));
        assert!(!config.is_complete());
    }

    #[test]
    fn blank_literal_password_is_incomplete() {
        let config = CrowdConfig {
            app_password: Some(AppPassword::Literal(String::new())),
            ..complete()
        };
        assert!(!config.is_complete());
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, CrowdConfigError::EmptyAppPassword));

        let config = CrowdConfig {
            app_password: Some(AppPassword::Env {
                env: "CROWDCONFIG_TEST_SURELY_UNSET".to_string(),
            }),
            ..complete()
        };
        assert!(config.is_complete());
    }

    #[test]
    fn missing_app_password_is_null_input() {
        let config = CrowdConfig {
            app_password: None,
            ..complete()
        };
        let err = config.credentials().unwrap_err();
        assert!(matches!(
            err,
            CrowdConfigError::Credentials(crowdcontrol::Error::NullInput("app_password"))
        ));
    }

    #[test]
    fn empty_app_name_is_invalid_argument() {
        let config = CrowdConfig {
            app_name: Some(String::new()),
            ..complete()
        };
        let err = config.credentials().unwrap_err();
        assert!(matches!(
            err,
            CrowdConfigError::Credentials(crowdcontrol::Error::InvalidArgument(_))
        ));
    }
}
