mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use tracing_subscriber::EnvFilter;

use crate::config::{default_webview_data_dir, AppConfig};

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter `{filter}`: {err}; falling back to `info`");
        EnvFilter::new("info")
    });
    // The desktop runtime may already have installed a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    init_tracing(&config.log_filter);
    if let Some(err) = config_error {
        tracing::warn!(error = %format!("{err:#}"), "invalid configuration, using defaults");
    }

    let webview_data_dir = default_webview_data_dir()?;
    tracing::info!(web_name = %config.web_name, per_page = config.per_page, "starting");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title(config.web_name.clone()),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(app::App);
    Ok(())
}
