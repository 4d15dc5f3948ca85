use crate::api::{Endpoint, Envelope, Query};
use crate::apartment::GroupFilter;
use crate::error::Result;
use crate::DssClient;

/// Requests addressing a single zone (`/json/zone/...`).
pub struct Zone<'a> {
    client: &'a DssClient,
}

impl<'a> Zone<'a> {
    pub(crate) fn new(client: &'a DssClient) -> Self {
        Zone { client }
    }

    pub async fn call_scene(
        &self,
        id: u16,
        scene: u8,
        group: &GroupFilter,
        force: Option<bool>,
    ) -> Result<Envelope> {
        let query = group
            .apply(Query::new().param("id", id).param("sceneNumber", scene))
            .optional("force", force);
        self.client.request(Endpoint::ZoneCallScene, query).await
    }
}
