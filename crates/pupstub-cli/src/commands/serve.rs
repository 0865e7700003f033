use anyhow::{Context, Result};
use pupstub_core::{Config, StdoutAnnouncer};
use pupstub_responder::{Operator, Responder};

pub async fn run(config: Config) -> Result<()> {
    let operator = Operator::console(config.prompt.marker.clone());
    let mut responder = Responder::bind(&config, operator)
        .await
        .context("Failed to bind reply socket")?;

    responder
        .announce(&mut StdoutAnnouncer::stdout())
        .context("Failed to announce port")?;

    responder.run().await.context("Responder stopped")?;
    Ok(())
}
