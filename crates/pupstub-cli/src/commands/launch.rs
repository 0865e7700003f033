use anyhow::{Context, Result};
use pupstub_core::{ChildLauncher, Config};
use pupstub_responder::{Operator, Responder};

pub async fn run(config: Config, client_id: String) -> Result<()> {
    let operator = Operator::console(config.prompt.marker.clone());
    let mut responder = Responder::bind(&config, operator)
        .await
        .context("Failed to bind reply socket")?;

    let mut launcher = ChildLauncher::from_config(&config, client_id)
        .context("Failed to resolve client log path")?;
    responder
        .announce(&mut launcher)
        .context("Failed to launch add-on")?;

    eprintln!(
        "Listening on port {} ({})",
        responder.port(),
        config.launcher.command.join(" ")
    );

    responder.run().await.context("Responder stopped")?;
    Ok(())
}
