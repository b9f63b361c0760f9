use std::io::{self, IsTerminal};
use std::sync::Arc;

use glyphfall_config::Settings;
use glyphfall_core::ControlState;

mod app;
mod help;
mod listener;
mod logging;

use app::{App, Shutdown};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _logging = logging::init();

    let settings = load_settings();
    tracing::info!(
        theme = %settings.theme,
        tick_ms = settings.tick_ms,
        max_drops = settings.rain.max_drops,
        "starting"
    );

    let control = Arc::new(ControlState::with_tuning(settings.theme, settings.tuning()));
    let piped = !io::stdin().is_terminal();

    let terminal = ratatui::init();
    listener::spawn(control.clone(), piped);
    let result = App::new(&settings, control).run(terminal);
    ratatui::restore();

    match result? {
        Shutdown::Quit => tracing::info!("bye"),
        Shutdown::Overflow => tracing::warn!("exited through the drop limit"),
    }
    Ok(())
}

/// Load settings, falling back to defaults when the file is unusable.
fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "using default settings");
            Settings::default()
        }
    }
}
