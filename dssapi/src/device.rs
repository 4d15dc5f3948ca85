use crate::api::{Endpoint, Envelope, Query};
use crate::error::Result;
use crate::DssClient;

/// Requests addressing a single device by its dSID (`/json/device/...`).
pub struct Device<'a> {
    client: &'a DssClient,
}

impl<'a> Device<'a> {
    pub(crate) fn new(client: &'a DssClient) -> Self {
        Device { client }
    }

    pub async fn call_scene(&self, dsid: &str, scene: u8, force: Option<bool>) -> Result<Envelope> {
        let query = Query::new()
            .param("dsid", dsid)
            .param("sceneNumber", scene)
            .optional("force", force);
        self.client.request(Endpoint::DeviceCallScene, query).await
    }

    /// Sets the 8 bit output value of the device.
    pub async fn set_value(&self, dsid: &str, value: u8) -> Result<Envelope> {
        let query = Query::new().param("dsid", dsid).param("value", value);
        self.client.request(Endpoint::DeviceSetValue, query).await
    }

    /// Lets the device blink, handy to find it.
    pub async fn blink(&self, dsid: &str) -> Result<Envelope> {
        let query = Query::new().param("dsid", dsid);
        self.client.request(Endpoint::DeviceBlink, query).await
    }
}
