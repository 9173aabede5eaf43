mod app;
mod config;
mod fetch;
mod layout;
mod loader;
mod manifest;
mod scroll;
mod theme;
mod ticker;
mod util;
mod views;
mod visibility;
mod wheel;

use env_logger::{Builder, Target};
use log::LevelFilter;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("folio", LevelFilter::Debug)
        .init();
}

fn main() -> iced::Result {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = config::load();
    app::run(config)
}
