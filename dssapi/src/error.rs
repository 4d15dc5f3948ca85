#[derive(thiserror::Error, Debug)]
pub enum DssError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no credentials given, need an application token or a password")]
    MissingCredentials,

    #[error("dss login failed: `{0}`")]
    AuthenticationFailed(String),

    #[error("request to dss failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dss responded with status {status}: `{}`", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response shape: `{0}` is missing")]
    UnexpectedResponseShape(String),

    #[error("request rejected by dss: `{0}`")]
    Rejected(String),

    #[error("not connected. Call `connect` or log in before sending requests")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, DssError>;
