use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConnectionConfig;
use crate::error::{DssError, Result};

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// Replaces the values of credential query parameters with `***`.
pub(crate) fn redact(url: &str) -> Cow<'_, str> {
    lazy_static! {
        static ref SECRET: Regex =
            Regex::new(r"([?&](?:password|token|loginToken|applicationToken)=)[^&#]*").unwrap();
    }
    SECRET.replace_all(url, "${1}***")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Login,
    Logout,
    RequestApplicationToken,
    EnableToken,
    RevokeToken,
    LoginApplication,
    ApartmentGetName,
    ApartmentCallScene,
    ApartmentUndoScene,
    ApartmentGetStructure,
    ApartmentGetDevices,
    ApartmentSetValue,
    ZoneCallScene,
    DeviceCallScene,
    DeviceSetValue,
    DeviceBlink,
    StateGet,
    StateSet,
}

impl Endpoint {
    /// `<resource>/<action>` below `/json/`.
    pub(crate) fn path(self) -> &'static str {
        use Endpoint::*;
        match self {
            Login => "system/login",
            Logout => "system/logout",
            RequestApplicationToken => "system/requestApplicationToken",
            EnableToken => "system/enableToken",
            RevokeToken => "system/revokeToken",
            LoginApplication => "system/loginApplication",
            ApartmentGetName => "apartment/getName",
            ApartmentCallScene => "apartment/callScene",
            ApartmentUndoScene => "apartment/undoScene",
            ApartmentGetStructure => "apartment/getStructure",
            ApartmentGetDevices => "apartment/getDevices",
            ApartmentSetValue => "apartment/setValue",
            ZoneCallScene => "zone/callScene",
            DeviceCallScene => "device/callScene",
            DeviceSetValue => "device/setValue",
            DeviceBlink => "device/blink",
            StateGet => "state/get",
            StateSet => "state/set",
        }
    }
}

/// Ordered query parameters. Optional parameters are only added when present,
/// a `None` never shows up as an empty key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub(crate) fn optional(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub(crate) fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// The `{ "ok": ..., "result": ... }` wrapper around every dSS answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    fn rejection(&self) -> DssError {
        DssError::Rejected(
            self.message
                .clone()
                .unwrap_or_else(|| "ok=false without message".to_string()),
        )
    }

    /// The whole `result` object of a successful answer.
    pub(crate) fn into_result(self) -> Result<Value> {
        if !self.ok {
            return Err(self.rejection());
        }
        self.result
            .ok_or_else(|| DssError::UnexpectedResponseShape("result".to_string()))
    }

    /// `result.<name>` of a successful answer.
    pub(crate) fn into_field(self, name: &str) -> Result<Value> {
        match self.into_result()? {
            Value::Object(mut result) => result
                .remove(name)
                .ok_or_else(|| DssError::UnexpectedResponseShape(format!("result.{name}"))),
            _ => Err(DssError::UnexpectedResponseShape(format!("result.{name}"))),
        }
    }

    /// `result.<name>` of a successful answer, which must be a string.
    pub(crate) fn into_string_field(self, name: &str) -> Result<String> {
        match self.into_field(name)? {
            Value::String(val) => Ok(val),
            _ => Err(DssError::UnexpectedResponseShape(format!(
                "result.{name} (as string)"
            ))),
        }
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// HTTP client bound to the base URL of one dSS.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(config: &ConnectionConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accepts_invalid_certs());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Transport {
            http: builder.build()?,
            base_url,
        })
    }

    pub(crate) fn url(&self, endpoint: Endpoint, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/json/{}",
            url.path().trim_end_matches('/'),
            endpoint.path()
        );
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        if !query.pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        url
    }

    /// Sends a GET request and parses the envelope. Non-2xx answers become
    /// [`DssError::Status`]; an envelope with `ok=false` is returned as is.
    pub(crate) async fn get(&self, endpoint: Endpoint, query: &Query) -> Result<Envelope> {
        let url = self.url(endpoint, query);
        debug!("GET {}", redact(url.as_str()));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        info!(
            "[dss api] {} status: {:?} {:?}",
            endpoint.path(),
            status,
            status.canonical_reason().unwrap_or_default()
        );

        if !status.is_success() {
            let message = response
                .json::<Envelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.message);
            return Err(DssError::Status { status, message });
        }

        let envelope: Envelope = response.json().await?;
        if !envelope.ok {
            warn!(
                "[dss api] {} answered ok=false: {}",
                endpoint.path(),
                envelope.message.as_deref().unwrap_or_default()
            );
        }
        Ok(envelope)
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
