use crate::types::{AuthenticationError, AuthenticationRequest, AuthenticationResponse};
use crate::{Connection, Credentials, Either, Error};
use reqwest::Client;
use tracing::debug;

const AUTHENTICATION_PATH: &str = "rest/usermanagement/latest/authentication";

/// Authenticates a user against Crowd by password.
#[derive(Debug, Clone)]
pub struct AuthenticationInteractor {
    connection: Connection,
}

impl AuthenticationInteractor {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::from_connection(Connection::new(Client::new(), credentials))
    }

    /// Creates an interactor from raw connection settings.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if any value is empty.
    pub fn connect(
        base_url: impl Into<String>,
        app_name: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(Self::new(Credentials::new(base_url, app_name, app_password)?))
    }

    pub(crate) const fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Authenticates `username` with `password`.
    ///
    /// Crowd rejecting the credentials is not an error here: it comes back as
    /// [`Either::Error`] carrying Crowd's reason.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Either<AuthenticationResponse, AuthenticationError>, Error> {
        debug!(username, "authenticating user");
        let body = AuthenticationRequest::new(password);
        self.connection
            .post(AUTHENTICATION_PATH, &[("username", username)], &body)
            .await
    }
}
