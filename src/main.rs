mod actions;
mod app;
mod config;
mod editor;
mod logging;
mod request;
mod response;
mod state;
mod sync;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&config.logging);

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let app_result = app.run(terminal).await;
    ratatui::restore();
    app_result
}
