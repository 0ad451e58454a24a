use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use egui::ViewportBuilder;
use std::sync::Arc;

mod app;
mod theme;

use hacker_stories::config::{Cli, Settings};
use hacker_stories::{logging, Fetcher, HackerNewsClient};

use crate::app::HackerStoriesApp;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli).context("failed to load configuration")?;

    logging::init(settings.log_file.as_deref()).context("failed to set up logging")?;
    tracing::info!(endpoint = %settings.endpoint, term = %settings.initial_term, "starting");

    let client = HackerNewsClient::with_options(
        settings.endpoint.clone(),
        settings.timeout,
        &settings.user_agent,
    )
    .context("failed to create HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Hacker Stories"),
        ..Default::default()
    };

    eframe::run_native(
        "Hacker Stories",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            // Wake the UI as soon as a search result lands
            let fetcher = Fetcher::new(Arc::new(client)).with_notifier(move || ctx.request_repaint());
            Ok(Box::new(HackerStoriesApp::new(
                fetcher,
                &settings.initial_term,
                settings.dark_mode,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}
