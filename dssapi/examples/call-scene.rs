//! Calls a scene in a zone and undoes it again.
//!
//! Reads `DSS_URL` and `DSS_TOKEN` from the environment.

use dssapi::{ConnectionConfig, DssClient, GroupFilter};

#[tokio::main]
async fn main() -> dssapi::Result<()> {
    let url = std::env::var("DSS_URL").unwrap_or_default();
    let token = std::env::var("DSS_TOKEN").unwrap_or_default();

    let mut client = DssClient::new();
    client
        .connect(
            ConnectionConfig::new(url)
                .with_app_token(token)
                .accept_invalid_certs(true),
        )
        .await?;
    println!("connected to {}", client.apartment().get_name().await?);

    // lights (group 1) of zone 10 to preset 1
    let lights = GroupFilter::by_id(1);
    let answer = client.zone().call_scene(10, 5, &lights, None).await?;
    println!("callScene ok={}", answer.ok);

    let answer = client.apartment().undo_scene(5, &lights).await?;
    println!("undoScene ok={}", answer.ok);

    client.disconnect().await?;
    Ok(())
}
