mod app;
mod config;
mod error;
mod headless;
mod logging;
mod ui;

use importer::Client;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    if let Some(path) = config.file.clone() {
        logging::init_stderr(&config)?;
        let client = Client::new(&config.base_url, config.timeout())?;
        return headless::run(&client, config.target()?, &path).await;
    }

    logging::init_file(&config)?;
    tracing::info!(base_url = %config.base_url, "starting csv importer");
    let mut app = app::App::new(&config)?;
    app.run().await?;
    Ok(())
}
