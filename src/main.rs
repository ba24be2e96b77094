mod api;
mod app;
mod config;
mod controller;
mod dialogs;
mod format;
mod logging;
mod model;
mod state;

use app::{App, AppProps};

fn main() {
    let config = config::load_config();
    logging::init(config.level_filter());
    log::info!("menu board starting, api base {:?}", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
