use prettytable::{format, Cell, Row, Table};
use serde_json::Value;

pub(crate) async fn list(client: &dssapi::DssClient) -> anyhow::Result<()> {
    let devices = client.apartment().get_devices().await?;
    let devices = match devices.as_array() {
        Some(devices) => devices,
        None => {
            return Err(anyhow::anyhow!("getDevices did not return a list: {devices}"));
        }
    };

    info!("found {} devices", devices.len());
    print_device_table(devices);

    Ok(())
}

fn create_table() -> Table {
    let mut table = Table::new();
    let fmt = format::FormatBuilder::new()
        .padding(1, 1)
        .separator(
            format::LinePosition::Title,
            format::LineSeparator::new('-', '+', '+', '+'),
        )
        .column_separator('|')
        .build();
    table.set_format(fmt);
    table
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// Columns shown per device: dSID, name, zone, on, present.
fn device_row(device: &Value) -> [String; 5] {
    let text = |key: &str| match device.get(key) {
        Some(Value::String(val)) => val.clone(),
        Some(Value::Null) | None => String::new(),
        Some(val) => val.to_string(),
    };
    let flag = |key: &str| match device.get(key).and_then(Value::as_bool) {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => String::new(),
    };
    [text("id"), text("name"), text("zoneID"), flag("on"), flag("isPresent")]
}

fn print_device_table(devices: &[Value]) {
    let mut table = create_table();
    table.set_titles(Row::new(
        ["dsid", "name", "zone", "on", "present"]
            .iter()
            .map(|title| Cell::new_align(title, format::Alignment::CENTER))
            .collect(),
    ));

    for device in devices {
        table.add_row(Row::new(
            device_row(device).iter().map(|val| Cell::new(val)).collect(),
        ));
    }
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_columns() {
        let device = json!({
            "id": "303505d7f8000000000004d9",
            "name": "Ceiling",
            "zoneID": 10,
            "on": true,
            "isPresent": false,
        });
        assert_eq!(
            device_row(&device),
            ["303505d7f8000000000004d9", "Ceiling", "10", "yes", "no"]
        );
    }

    #[test]
    fn device_columns_with_missing_fields() {
        let device = json!({ "id": "303505d7f8000000000004d9", "name": null });
        assert_eq!(
            device_row(&device),
            ["303505d7f8000000000004d9", "", "", "", ""]
        );
    }
}
