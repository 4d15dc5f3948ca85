use serde_json::Value;

use crate::api::{Endpoint, Envelope, Query};
use crate::error::Result;
use crate::DssClient;

/// System wide named states like `presence` (`/json/state/...`).
///
/// `addon` names the owner of a state, e.g.
/// `system-addon-user-defined-states`. Whether every server version honors
/// it on `get` is unconfirmed; it is only sent when given.
pub struct State<'a> {
    client: &'a DssClient,
}

impl<'a> State<'a> {
    pub(crate) fn new(client: &'a DssClient) -> Self {
        State { client }
    }

    pub async fn get_state(&self, name: &str, addon: Option<&str>) -> Result<Value> {
        let query = Query::new().param("name", name).optional("addon", addon);
        self.client
            .request(Endpoint::StateGet, query)
            .await?
            .into_field("value")
    }

    pub async fn set_state(&self, name: &str, value: &str, addon: Option<&str>) -> Result<Envelope> {
        let query = Query::new()
            .param("name", name)
            .param("value", value)
            .optional("addon", addon);
        self.client.request(Endpoint::StateSet, query).await
    }
}
