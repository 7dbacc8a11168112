//! Dream Machine - orb photo effect editor
//! Built with iced; the orb is drawn by a wgpu shader or a rayon CPU renderer

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod features;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbe=info")),
        )
        .init();

    let config = features::OrbConfig::load();
    let window_size = iced::Size::new(config.window_width, config.window_height);

    iced::application(
        move || app::App::new(config.clone()),
        app::App::update,
        app::App::view,
    )
    .title(app::App::title)
    .theme(app::App::theme)
    .subscription(app::App::subscription)
    .window_size(window_size)
    .antialiasing(true)
    .run()
}
