use crate::types::{GroupError, GroupResponse};
use crate::{Connection, Credentials, Either, Error};
use reqwest::Client;
use tracing::debug;

const DIRECT_MEMBERSHIP_PATH: &str = "rest/usermanagement/latest/group/user/direct";

/// Determines whether a user is a direct member of a group.
#[derive(Debug, Clone)]
pub struct GroupInteractor {
    connection: Connection,
}

impl GroupInteractor {
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

    /// Looks up the direct membership of `username` in `groupname`.
    ///
    /// Membership yields [`Either::Value`]. A user outside the group yields
    /// [`Either::Error`] with reason `MEMBERSHIP_NOT_FOUND`, as do unknown users
    /// and groups with their own reasons.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn execute(
        &self,
        username: &str,
        groupname: &str,
    ) -> Result<Either<GroupResponse, GroupError>, Error> {
        debug!(username, groupname, "checking direct group membership");
        self.connection
            .get(
                DIRECT_MEMBERSHIP_PATH,
                &[("groupname", groupname), ("username", username)],
            )
            .await
    }
}
