//! Login, logout and application token handling (`/json/system/...`).

use crate::api::{Endpoint, Envelope, Query, Transport};
use crate::config::DEFAULT_USER;
use crate::error::{DssError, Result};
use crate::session::SessionToken;
use crate::DssClient;

/// Exchanges the answer of a login request for a session token.
async fn session_token(transport: &Transport, endpoint: Endpoint, query: Query) -> Result<SessionToken> {
    let envelope = transport
        .get(endpoint, &query)
        .await
        .map_err(|err| DssError::AuthenticationFailed(err.to_string()))?;
    if !envelope.ok {
        return Err(DssError::AuthenticationFailed(
            envelope
                .message
                .unwrap_or_else(|| "login rejected".to_string()),
        ));
    }
    let token = envelope.into_string_field("token")?;
    if token.is_empty() {
        return Err(DssError::AuthenticationFailed(
            "server returned an empty session token".to_string(),
        ));
    }
    debug!("new session token with {} chars", token.len());
    Ok(SessionToken::new(token))
}

/// User and password travel as query parameters, that is how the dSS expects them.
pub(crate) async fn login_user(transport: &Transport, user: &str, password: &str) -> Result<SessionToken> {
    let query = Query::new().param("user", user).param("password", password);
    session_token(transport, Endpoint::Login, query).await
}

pub(crate) async fn login_application(transport: &Transport, app_token: &str) -> Result<SessionToken> {
    let query = Query::new().param("loginToken", app_token);
    session_token(transport, Endpoint::LoginApplication, query).await
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// Requests on application tokens. These only read the session of the
/// client, see [`SystemMut`] for login and logout.
pub struct System<'a> {
    client: &'a DssClient,
}

impl<'a> System<'a> {
    pub(crate) fn new(client: &'a DssClient) -> Self {
        System { client }
    }

    /// Requests a new application token named `name`. Works without a session.
    /// The token only becomes usable after a user approved it, see
    /// [`System::enable_token`].
    pub async fn get_token(&self, name: &str) -> Result<String> {
        let query = Query::new().param("applicationName", name);
        self.client
            .transport()?
            .get(Endpoint::RequestApplicationToken, &query)
            .await?
            .into_string_field("applicationToken")
    }

    /// Approves `app_token` using the current session.
    pub async fn enable_token(&self, app_token: &str) -> Result<Envelope> {
        self.token_request(Endpoint::EnableToken, app_token).await
    }

    /// Revokes `app_token` using the current session.
    ///
    /// Sends `applicationToken` followed by the session `token`.
    pub async fn revoke_token(&self, app_token: &str) -> Result<Envelope> {
        self.token_request(Endpoint::RevokeToken, app_token).await
    }

    async fn token_request(&self, endpoint: Endpoint, app_token: &str) -> Result<Envelope> {
        let token = self.client.session().token().ok_or(DssError::NotConnected)?;
        let query = Query::new()
            .param("applicationToken", app_token)
            .param("token", token.as_str());
        self.client.transport()?.get(endpoint, &query).await
    }
}

/// Login and logout. These replace or clear the session of the client.
pub struct SystemMut<'a> {
    client: &'a mut DssClient,
}

impl<'a> SystemMut<'a> {
    pub(crate) fn new(client: &'a mut DssClient) -> Self {
        SystemMut { client }
    }

    /// Creates a new session with user credentials and makes it the session
    /// of the client. `user` defaults to `dssadmin`.
    pub async fn login_user(&mut self, password: &str, user: Option<&str>) -> Result<String> {
        let transport = self.client.transport()?;
        let token = login_user(transport, user.unwrap_or(DEFAULT_USER), password).await?;
        let raw = token.as_str().to_string();
        self.client.set_session(token);
        Ok(raw)
    }

    /// Destroys the session. The local token is dropped before the request is
    /// sent, so the client counts as disconnected even when the request fails.
    pub async fn logout_user(&mut self) -> Result<Envelope> {
        let token = self
            .client
            .session_mut()
            .take()
            .ok_or(DssError::NotConnected)?;
        let transport = self.client.transport()?;
        let query = Query::new().param("token", token.as_str());
        transport.get(Endpoint::Logout, &query).await.map_err(|err| {
            warn!("logout request failed, local session is cleared anyway: {err}");
            err
        })
    }

    /// Creates a new session from an approved application token and makes it
    /// the session of the client.
    pub async fn login_application(&mut self, app_token: &str) -> Result<String> {
        let transport = self.client.transport()?;
        let token = login_application(transport, app_token).await?;
        let raw = token.as_str().to_string();
        self.client.set_session(token);
        Ok(raw)
    }
}
