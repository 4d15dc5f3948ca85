#[macro_use]
extern crate tracing;

use clap::{Parser, Subcommand};
use dssapi::{DssClient, Envelope, GroupFilter};
use std::process::exit;
use tracing_subscriber::prelude::*;

mod config;
mod list;
mod scene;

use config::EnvConfig;
use scene::{SceneAction, SceneTarget};

#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(short, long, action)]
    verbose: bool,
    #[clap(flatten)]
    env: EnvConfig,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the name of the apartment.
    Name,
    /// Prints zones, groups and devices as JSON.
    Structure,
    /// Lists all devices.
    Devices,
    /// Calls (or undoes) a scene for the apartment, a zone or a device.
    Scene {
        scene: u8,
        #[clap(long)]
        zone: Option<u16>,
        #[clap(long, conflicts_with = "zone")]
        device: Option<String>,
        #[clap(long)]
        group_id: Option<u8>,
        #[clap(long)]
        group_name: Option<String>,
        #[clap(long, help = "true or false, omitted when not given")]
        force: Option<bool>,
        #[clap(long, action, conflicts_with = "force")]
        undo: bool,
    },
    /// Sets the output value of a device or of a group of the apartment.
    Value {
        value: u8,
        #[clap(long)]
        device: Option<String>,
        #[clap(long, conflicts_with = "device")]
        group_id: Option<u8>,
        #[clap(long, conflicts_with = "device")]
        group_name: Option<String>,
    },
    /// Lets a device blink.
    Blink { dsid: String },
    /// Reads or writes a system state.
    #[clap(subcommand)]
    State(StateCommand),
    /// Registers application tokens.
    #[clap(subcommand)]
    Token(TokenCommand),
}

#[derive(Subcommand)]
enum StateCommand {
    Get {
        name: String,
        #[clap(long)]
        addon: Option<String>,
    },
    Set {
        name: String,
        value: String,
        #[clap(long)]
        addon: Option<String>,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Requests a new application token. Needs no login, the token has to be
    /// enabled before use.
    Request { name: String },
    Enable { app_token: String },
    Revoke { app_token: String },
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn check(envelope: Envelope) -> anyhow::Result<()> {
    if envelope.ok {
        return Ok(());
    }
    Err(anyhow::anyhow!(
        "dss rejected the request: {}",
        envelope.message.as_deref().unwrap_or("no message")
    ))
}

async fn run(client: &mut DssClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Name => println!("{}", client.apartment().get_name().await?),
        Command::Structure => print_json(&client.apartment().get_structure().await?)?,
        Command::Devices => list::list(client).await?,
        Command::Scene {
            scene,
            zone,
            device,
            group_id,
            group_name,
            force,
            undo,
        } => {
            let target = SceneTarget::new(zone, device)?;
            let group = GroupFilter {
                id: group_id,
                name: group_name,
            };
            let action = if undo {
                SceneAction::Undo
            } else {
                SceneAction::Call { force }
            };
            check(scene::run(client, &target, scene, &group, action).await?)?;
        }
        Command::Value {
            value,
            device: Some(dsid),
            ..
        } => check(client.device().set_value(&dsid, value).await?)?,
        Command::Value {
            value,
            device: None,
            group_id,
            group_name,
        } => {
            let group = GroupFilter {
                id: group_id,
                name: group_name,
            };
            check(client.apartment().set_group_value(value, &group).await?)?;
        }
        Command::Blink { dsid } => check(client.device().blink(&dsid).await?)?,
        Command::State(StateCommand::Get { name, addon }) => {
            print_json(&client.state().get_state(&name, addon.as_deref()).await?)?
        }
        Command::State(StateCommand::Set { name, value, addon }) => {
            check(client.state().set_state(&name, &value, addon.as_deref()).await?)?
        }
        Command::Token(TokenCommand::Request { name }) => {
            println!("{}", client.system().get_token(&name).await?)
        }
        Command::Token(TokenCommand::Enable { app_token }) => {
            check(client.system().enable_token(&app_token).await?)?
        }
        Command::Token(TokenCommand::Revoke { app_token }) => {
            check(client.system().revoke_token(&app_token).await?)?
        }
    };
    Ok(())
}

async fn main_async(cli: Cli) -> anyhow::Result<()> {
    let config = cli.env.connection();

    // requesting a token is how an application without credentials starts out
    if let Command::Token(TokenCommand::Request { .. }) = cli.command {
        let mut client = DssClient::with_config(config)?;
        return run(&mut client, cli.command).await;
    }

    let mut client = DssClient::new();
    client.connect(config).await?;
    let result = run(&mut client, cli.command).await;
    if let Err(err) = client.disconnect().await {
        warn!("logout failed: {err}");
    }
    result
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "info,dssapi=trace,reqwest=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().parse_lossy(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = main_async(cli).await {
        eprintln!("{err:#}");
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["dssctrl", "--url", "https://dss.local:8080", "--token", "abc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn scene_options() {
        let cli = parse(&["scene", "5", "--zone", "10", "--force", "false"]);
        match cli.command {
            Command::Scene {
                scene,
                zone,
                force,
                undo,
                group_id,
                ..
            } => {
                assert_eq!(scene, 5);
                assert_eq!(zone, Some(10));
                assert_eq!(force, Some(false));
                assert_eq!(group_id, None);
                assert!(!undo);
            }
            _ => panic!("expected scene command"),
        }
    }

    #[test]
    fn zone_and_device_conflict() {
        let argv = [
            "dssctrl", "--url", "https://dss", "--token", "abc", "scene", "5", "--zone", "1",
            "--device", "303505d7f8000000000004d9",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn connection_from_args() {
        let cli = parse(&["--insecure", "--user", "installer", "name"]);
        let config = cli.env.connection();
        assert_eq!(config.url(), "https://dss.local:8080");
        assert_eq!(config.app_token(), Some("abc"));
        assert_eq!(config.user(), "installer");
        assert!(config.accepts_invalid_certs());
    }

    #[test]
    fn state_set() {
        let cli = parse(&["state", "set", "presence", "absent", "--addon", "user"]);
        match cli.command {
            Command::State(StateCommand::Set { name, value, addon }) => {
                assert_eq!(name, "presence");
                assert_eq!(value, "absent");
                assert_eq!(addon.as_deref(), Some("user"));
            }
            _ => panic!("expected state set"),
        }
    }

    #[test]
    fn rejected_envelope_is_an_error() {
        let envelope = Envelope {
            ok: false,
            result: None,
            message: Some("nope".to_string()),
        };
        assert!(check(envelope).unwrap_err().to_string().contains("nope"));
    }
}
