use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::ClientSettings;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::ReminderWindow;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{AssignmentDeskApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Post assignments, collect submissions and send deadline reminders")]
struct Args {
    /// Base URL of the assignment API; overrides settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file to read instead of ./assignment_desk.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial reminder window in hours (1, 6, 12, 24 or 48).
    #[arg(long)]
    window: Option<ReminderWindow>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = ClientSettings::load_from(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let client_config = settings
        .client_config()
        .context("assignment API base URL is not usable")?;
    let reminder_window = args.window.unwrap_or(settings.default_window);
    tracing::info!(
        base_url = %client_config.base_url(),
        window = %reminder_window,
        "starting assignment desk"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(client_config, settings.reminder_recipient, cmd_rx, ui_tx);

    let startup = StartupConfig {
        api_base_url: settings.api_base_url,
        reminder_window,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Assignment Desk")
            .with_inner_size([880.0, 760.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Assignment Desk",
        options,
        Box::new(move |_cc| Ok(Box::new(AssignmentDeskApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
