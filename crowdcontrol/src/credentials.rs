use crate::Error;
use std::fmt;

/// Where Crowd lives and how this application identifies itself to it.
///
/// The application name and password are the ones registered for the calling
/// application in Crowd, not those of the end user being checked.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    app_name: String,
    app_password: String,
}

impl Credentials {
    /// Validates and bundles the connection settings.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if any value is empty.
    pub fn new(
        base_url: impl Into<String>,
        app_name: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = base_url.into();
        let app_name = app_name.into();
        let app_password = app_password.into();

        if base_url.trim().is_empty() {
            return Err(Error::InvalidArgument("base_url cannot be empty".to_string()));
        }
        if app_name.is_empty() {
            return Err(Error::InvalidArgument("app_name cannot be empty".to_string()));
        }
        if app_password.is_empty() {
            return Err(Error::InvalidArgument(
                "app_password cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_name,
            app_password,
        })
    }

    #[must_use]
    pub fn builder() -> CredentialsBuilder {
        CredentialsBuilder::default()
    }

    /// Base URL without a trailing slash, e.g. `http://localhost:8095/crowd`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn app_password(&self) -> &str {
        &self.app_password
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("app_name", &self.app_name)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// Collects connection settings that may be missing, e.g. from a config file.
#[derive(Default)]
pub struct CredentialsBuilder {
    base_url: Option<String>,
    app_name: Option<String>,
    app_password: Option<String>,
}

impl CredentialsBuilder {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    #[must_use]
    pub fn with_app_password(mut self, app_password: impl Into<String>) -> Self {
        self.app_password = Some(app_password.into());
        self
    }

    /// Builds the credentials.
    ///
    /// # Errors
    /// Returns [`Error::NullInput`] if a value was never supplied, or
    /// [`Error::InvalidArgument`] if one is empty.
    pub fn build(self) -> Result<Credentials, Error> {
        let base_url = self.base_url.ok_or(Error::NullInput("base_url"))?;
        let app_name = self.app_name.ok_or(Error::NullInput("app_name"))?;
        let app_password = self.app_password.ok_or(Error::NullInput("app_password"))?;
        Credentials::new(base_url, app_name, app_password)
    }
}
