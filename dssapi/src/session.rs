use std::fmt;

use crate::error::{DssError, Result};

/// Token identifying a logged in session. The dSS hands out 64 character
/// hex strings. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        SessionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(*** {} chars)", self.0.len())
    }
}

/// The session state of a [`crate::DssClient`]: either no token or the token
/// of the last successful login.
#[derive(Debug, Default, Clone)]
pub struct Session {
    token: Option<SessionToken>,
}

impl Session {
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn replace(&mut self, token: SessionToken) {
        self.token = Some(token);
    }

    pub(crate) fn take(&mut self) -> Option<SessionToken> {
        self.token.take()
    }

    /// Token for an authenticated request, [`DssError::NotConnected`] without one.
    pub(crate) fn require(&self) -> Result<&str> {
        self.token
            .as_ref()
            .map(SessionToken::as_str)
            .ok_or(DssError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut session = Session::default();
        assert!(!session.is_active());
        assert!(matches!(session.require(), Err(DssError::NotConnected)));

        session.replace(SessionToken::new("a".repeat(64)));
        assert!(session.is_active());
        assert_eq!(session.require().unwrap().len(), 64);

        let token = session.take().unwrap();
        assert_eq!(token.as_str(), "a".repeat(64));
        assert!(!session.is_active());
        assert!(session.take().is_none());
    }

    #[test]
    fn debug_hides_token() {
        let token = SessionToken::new("f00dfeed");
        assert_eq!(format!("{token:?}"), "SessionToken(*** 8 chars)");
    }
}
