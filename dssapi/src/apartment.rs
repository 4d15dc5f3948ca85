use serde_json::Value;

use crate::api::{Endpoint, Envelope, Query};
use crate::error::Result;
use crate::DssClient;

/// Restricts a scene call or value change to one group, selected by id,
/// name or both. The default targets no particular group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    pub id: Option<u8>,
    pub name: Option<String>,
}

impl GroupFilter {
    pub fn by_id(id: u8) -> Self {
        GroupFilter {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        GroupFilter {
            id: None,
            name: Some(name.into()),
        }
    }

    pub(crate) fn apply(&self, query: Query) -> Query {
        query
            .optional("groupID", self.id)
            .optional("groupName", self.name.as_deref())
    }
}

/// Apartment wide requests (`/json/apartment/...`).
pub struct Apartment<'a> {
    client: &'a DssClient,
}

impl<'a> Apartment<'a> {
    pub(crate) fn new(client: &'a DssClient) -> Self {
        Apartment { client }
    }

    pub async fn get_name(&self) -> Result<String> {
        self.client
            .request(Endpoint::ApartmentGetName, Query::new())
            .await?
            .into_string_field("name")
    }

    pub async fn call_scene(&self, scene: u8, group: &GroupFilter, force: Option<bool>) -> Result<Envelope> {
        let query = group
            .apply(Query::new().param("sceneNumber", scene))
            .optional("force", force);
        self.client.request(Endpoint::ApartmentCallScene, query).await
    }

    pub async fn undo_scene(&self, scene: u8, group: &GroupFilter) -> Result<Envelope> {
        let query = group.apply(Query::new().param("sceneNumber", scene));
        self.client.request(Endpoint::ApartmentUndoScene, query).await
    }

    /// Zones, groups, floors, clusters and devices of the apartment.
    pub async fn get_structure(&self) -> Result<Value> {
        self.client
            .request(Endpoint::ApartmentGetStructure, Query::new())
            .await?
            .into_field("apartment")
    }

    pub async fn get_devices(&self) -> Result<Value> {
        self.client
            .request(Endpoint::ApartmentGetDevices, Query::new())
            .await?
            .into_result()
    }

    /// Sets the output value of all devices in `group`. Prefer scenes.
    pub async fn set_group_value(&self, value: u8, group: &GroupFilter) -> Result<Envelope> {
        let query = group.apply(Query::new().param("value", value));
        self.client.request(Endpoint::ApartmentSetValue, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_filter_params() {
        let keys = |filter: &GroupFilter| -> Vec<&'static str> {
            filter.apply(Query::new()).pairs().iter().map(|(key, _)| *key).collect()
        };
        assert!(keys(&GroupFilter::default()).is_empty());
        assert_eq!(keys(&GroupFilter::by_id(1)), ["groupID"]);
        assert_eq!(keys(&GroupFilter::by_name("yellow")), ["groupName"]);

        let both = GroupFilter {
            id: Some(0),
            name: Some("broadcast".to_string()),
        };
        assert_eq!(
            both.apply(Query::new()).pairs(),
            [
                ("groupID", "0".to_string()),
                ("groupName", "broadcast".to_string())
            ]
        );
    }
}
