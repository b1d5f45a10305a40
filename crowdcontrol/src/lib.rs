//! Client for the Atlassian Crowd usermanagement REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), crowdcontrol::Error> {
//! use crowdcontrol::{Credentials, CrowdClient, Either};
//!
//! let credentials = Credentials::new("http://localhost:8095/crowd", "appName", "appPass")?;
//! let client = CrowdClient::new(credentials);
//!
//! match client.authenticate("userName", "userPass").await? {
//!     Either::Value(user) => println!("{}", user.display_name),
//!     Either::Error(error) => println!("{error}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod authentication;
pub mod credentials;
pub mod either;
pub mod group;
pub mod types;

pub use crate::authentication::AuthenticationInteractor;
pub use crate::credentials::{Credentials, CredentialsBuilder};
pub use crate::either::Either;
pub use crate::group::GroupInteractor;

use crate::types::{AuthenticationError, AuthenticationResponse, GroupError, GroupResponse};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} cannot be absent")]
    NullInput(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode Crowd response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pooled HTTP client plus the application credentials every request carries.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    client: Client,
    credentials: Credentials,
}

impl Connection {
    pub(crate) const fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub(crate) async fn get<T, E, Q>(&self, path: &str, query: &Q) -> Result<Either<T, E>, Error>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let endpoint = self.credentials.endpoint(path);
        debug!(method = "GET", %endpoint, "sending request to Crowd");
        let request = self.client.get(&endpoint).query(query);
        self.exchange(&endpoint, request).await
    }

    pub(crate) async fn post<T, E, Q, B>(
        &self,
        path: &str,
        query: &Q,
        body: &B,
    ) -> Result<Either<T, E>, Error>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let endpoint = self.credentials.endpoint(path);
        debug!(method = "POST", %endpoint, "sending request to Crowd");
        let request = self.client.post(&endpoint).query(query).json(body);
        self.exchange(&endpoint, request).await
    }

    /// Sends the request and decodes the body by status: 200 is a value,
    /// anything else is Crowd's error body.
    async fn exchange<T, E>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Either<T, E>, Error>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let response = request
            .basic_auth(
                self.credentials.app_name(),
                Some(self.credentials.app_password()),
            )
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        debug!(%endpoint, status = status.as_u16(), "Crowd responded");

        let body = response.bytes().await?;
        if status == StatusCode::OK {
            // A bare 200 confirms membership without a payload; only errors must carry one.
            let body = if body.iter().all(u8::is_ascii_whitespace) {
                b"{}".as_slice()
            } else {
                &body[..]
            };
            decode(endpoint, status, body).map(Either::Value)
        } else {
            decode(endpoint, status, &body).map(Either::Error)
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, status: StatusCode, body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(%endpoint, status = status.as_u16(), error = %err, "undecodable Crowd response");
        Error::Json(err)
    })
}

/// Entry point that hands out interactors sharing one connection pool.
#[derive(Debug, Clone)]
pub struct CrowdClient {
    connection: Connection,
}

impl CrowdClient {
    /// Creates a new `CrowdClient` with a default HTTP client.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            connection: Connection::new(Client::new(), credentials),
        }
    }

    /// Replaces the underlying HTTP client, e.g. to configure proxies or TLS.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.connection.client = client;
        self
    }

    /// Rebuilds the HTTP client with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.connection.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.connection.credentials
    }

    /// Creates an authentication interactor sharing this client's pool.
    #[must_use]
    pub fn authentication(&self) -> AuthenticationInteractor {
        AuthenticationInteractor::from_connection(self.connection.clone())
    }

    /// Creates a group-membership interactor sharing this client's pool.
    #[must_use]
    pub fn group(&self) -> GroupInteractor {
        GroupInteractor::from_connection(self.connection.clone())
    }

    /// Authenticates a user by password.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Either<AuthenticationResponse, AuthenticationError>, Error> {
        self.authentication().execute(username, password).await
    }

    /// Checks whether a user is a direct member of a group.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn direct_membership(
        &self,
        username: &str,
        groupname: &str,
    ) -> Result<Either<GroupResponse, GroupError>, Error> {
        self.group().execute(username, groupname).await
    }
}
