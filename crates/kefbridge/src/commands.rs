//! Direct speaker control commands.

use kefbridge_api::SpeakerClient;

use crate::cli::{Command, GlobalOpts, Switch};
use crate::error::CliError;
use crate::serve;

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Serve => serve::run(global).await,
        Command::Status => status(global).await,
        Command::Power { state } => power(global, state).await,
        Command::Volume { level } => volume(global, level).await,
        Command::Mute { state } => mute(global, state).await,
        Command::Source { source } => set_source(global, &source).await,
        Command::Play => play(global).await,
    }
}

fn client(global: &GlobalOpts) -> Result<SpeakerClient, CliError> {
    let host = global.host.as_deref().ok_or(CliError::NoHost)?;
    Ok(SpeakerClient::new(host)?)
}

async fn status(global: &GlobalOpts) -> Result<(), CliError> {
    let client = client(global)?;

    let power = client.status().await;
    println!("power:   {}", if power.is_on() { "on" } else { "standby" });

    let player = client.player_status().await?;
    println!("volume:  {}", player.volume.unwrap_or(0));
    println!(
        "source:  {}",
        player.source.as_deref().unwrap_or("unknown")
    );
    println!(
        "playing: {}",
        player.state.as_deref() == Some("playing")
    );
    Ok(())
}

async fn power(global: &GlobalOpts, state: Switch) -> Result<(), CliError> {
    let client = client(global)?;
    if state.is_on() {
        client.power_on().await?;
    } else {
        client.shutdown().await?;
    }
    Ok(())
}

async fn volume(global: &GlobalOpts, level: Option<i64>) -> Result<(), CliError> {
    let client = client(global)?;
    match level {
        Some(level) => client.set_volume(level).await?,
        None => println!("{}", client.volume().await?),
    }
    Ok(())
}

async fn mute(global: &GlobalOpts, state: Switch) -> Result<(), CliError> {
    let client = client(global)?;
    if state.is_on() {
        client.mute().await?;
    } else {
        client.unmute().await?;
    }
    Ok(())
}

async fn set_source(global: &GlobalOpts, source: &str) -> Result<(), CliError> {
    let client = client(global)?;
    client.set_source(source).await?;
    Ok(())
}

async fn play(global: &GlobalOpts) -> Result<(), CliError> {
    let client = client(global)?;
    client.toggle_play_pause().await?;
    Ok(())
}
