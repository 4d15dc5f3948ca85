use dssapi::{DssClient, Envelope, GroupFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTarget {
    Apartment,
    Zone(u16),
    Device(String),
}

impl SceneTarget {
    pub fn new(zone: Option<u16>, device: Option<String>) -> anyhow::Result<Self> {
        match (zone, device) {
            (None, None) => Ok(SceneTarget::Apartment),
            (Some(zone), None) => Ok(SceneTarget::Zone(zone)),
            (None, Some(dsid)) => Ok(SceneTarget::Device(dsid)),
            (Some(_), Some(_)) => Err(anyhow::anyhow!("use either --zone or --device, not both")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    Call { force: Option<bool> },
    Undo,
}

pub async fn run(
    client: &DssClient,
    target: &SceneTarget,
    scene: u8,
    group: &GroupFilter,
    action: SceneAction,
) -> anyhow::Result<Envelope> {
    let grouped = group.id.is_some() || group.name.is_some();
    let envelope = match (target, action) {
        (SceneTarget::Apartment, SceneAction::Call { force }) => {
            client.apartment().call_scene(scene, group, force).await?
        }
        (SceneTarget::Apartment, SceneAction::Undo) => client.apartment().undo_scene(scene, group).await?,
        (SceneTarget::Zone(id), SceneAction::Call { force }) => {
            client.zone().call_scene(*id, scene, group, force).await?
        }
        (SceneTarget::Device(dsid), SceneAction::Call { force }) => {
            if grouped {
                warn!("group options are ignored for device scenes");
            }
            client.device().call_scene(dsid, scene, force).await?
        }
        (_, SceneAction::Undo) => {
            return Err(anyhow::anyhow!("undo is only supported for apartment scenes"));
        }
    };
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_from_options() {
        assert_eq!(SceneTarget::new(None, None).unwrap(), SceneTarget::Apartment);
        assert_eq!(SceneTarget::new(Some(10), None).unwrap(), SceneTarget::Zone(10));
        assert_eq!(
            SceneTarget::new(None, Some("303505d7f8000000000004d9".into())).unwrap(),
            SceneTarget::Device("303505d7f8000000000004d9".into())
        );
        assert!(SceneTarget::new(Some(10), Some("303505d7f8000000000004d9".into())).is_err());
    }
}
