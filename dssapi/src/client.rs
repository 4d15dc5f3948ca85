use crate::api::{Endpoint, Envelope, Query, Transport};
use crate::apartment::Apartment;
use crate::config::{ConnectionConfig, Credentials};
use crate::device::Device;
use crate::error::{DssError, Result};
use crate::session::{Session, SessionToken};
use crate::state::State;
use crate::system::{self, System, SystemMut};
use crate::zone::Zone;

/// The main interface to a digitalSTROM server.
///
/// A client starts disconnected. [`DssClient::connect`] logs in and keeps the
/// session token, which every other request then carries. Requests that need
/// a session fail with [`DssError::NotConnected`] before anything is sent when
/// there is none.
#[derive(Debug, Default)]
pub struct DssClient {
    config: Option<ConnectionConfig>,
    transport: Option<Transport>,
    session: Session,
}

impl DssClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client bound to the server of `config` without logging in. Enough
    /// for requests that need no session, like [`System::get_token`].
    pub fn with_config(config: ConnectionConfig) -> Result<Self> {
        let transport = Transport::new(&config)?;
        Ok(DssClient {
            config: Some(config),
            transport: Some(transport),
            session: Session::default(),
        })
    }

    /// Logs in with the application token of `config` or, without one, with
    /// its password. Returns the new session token.
    ///
    /// The URL is checked before the credentials and both before any request
    /// goes out. On failure the client keeps its previous connection.
    pub async fn connect(&mut self, config: ConnectionConfig) -> Result<String> {
        let transport = Transport::new(&config)?;
        let token = match config.credentials()? {
            Credentials::ApplicationToken(app_token) => {
                system::login_application(&transport, app_token).await?
            }
            Credentials::Password { user, password } => {
                system::login_user(&transport, user, password).await?
            }
        };
        info!("connected to {}", config.url());

        let raw = token.as_str().to_string();
        self.transport = Some(transport);
        self.config = Some(config);
        self.session.replace(token);
        Ok(raw)
    }

    /// Logs the session out, see [`SystemMut::logout_user`].
    pub async fn disconnect(&mut self) -> Result<Envelope> {
        self.system_mut().logout_user().await
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_active()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session.token().map(SessionToken::as_str)
    }

    /// Configuration the client is bound to.
    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    pub fn system(&self) -> System<'_> {
        System::new(self)
    }

    /// Login and logout, which change the session of the client.
    pub fn system_mut(&mut self) -> SystemMut<'_> {
        SystemMut::new(self)
    }

    pub fn apartment(&self) -> Apartment<'_> {
        Apartment::new(self)
    }

    pub fn zone(&self) -> Zone<'_> {
        Zone::new(self)
    }

    pub fn device(&self) -> Device<'_> {
        Device::new(self)
    }

    pub fn state(&self) -> State<'_> {
        State::new(self)
    }

    // -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

    pub(crate) fn transport(&self) -> Result<&Transport> {
        self.transport.as_ref().ok_or_else(|| {
            DssError::InvalidConfiguration("no server configured, call `connect` first".to_string())
        })
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub(crate) fn set_session(&mut self, token: SessionToken) {
        self.session.replace(token);
    }

    /// Sends `endpoint` with the session token as first parameter followed by
    /// `params`.
    pub(crate) async fn request(&self, endpoint: Endpoint, params: Query) -> Result<Envelope> {
        let token = self.session.require()?;
        let transport = self.transport()?;
        let mut query = Query::new().param("token", token);
        for (key, value) in params.pairs() {
            query = query.param(*key, value);
        }
        transport.get(endpoint, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    #[traced_test]
    async fn credentials_never_reach_the_log() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/system/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"token": "feedbeef"}})),
            )
            .mount(&server)
            .await;

        let mut client = DssClient::new();
        client
            .connect(ConnectionConfig::new(server.uri()).with_password("hunter2"))
            .await
            .unwrap();

        assert!(logs_contain("password=***"));
        assert!(logs_contain("[dss api] system/login status: 200"));
        assert!(!logs_contain("hunter2"));
        assert!(!logs_contain("feedbeef"));
    }

    #[test]
    fn starts_disconnected() {
        let client = DssClient::new();
        assert!(!client.is_connected());
        assert!(client.session_token().is_none());
        assert!(client.config().is_none());
        assert!(matches!(
            client.transport(),
            Err(DssError::InvalidConfiguration(_))
        ));
    }
}
