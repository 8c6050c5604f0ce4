mod app;
mod app_dir;
mod image_worker;
mod preferences;
mod ui;

use eframe::egui;
use tracing::{error, info};

use orbitlens_core::constants::TRACE_COLOR;
use orbitlens_core::{hex_to_rgb, Rgb, Session};
use orbitlens_render::backdrop::{BACKDROP_HEIGHT, BACKDROP_WIDTH};
use orbitlens_render::{palette_hex, period_palette, RasterSnapshot};

use crate::app::OrbitlensApp;
use crate::preferences::AppPreferences;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Orbitlens");

    // The swatches are the backdrop's own period colors. A bad palette is
    // unrecoverable, so stop before opening a window.
    let (session, trace_color) = match startup_state() {
        Ok(state) => state,
        Err(e) => {
            error!("Invalid startup colors: {e}");
            std::process::exit(1);
        }
    };

    let prefs = AppPreferences::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Orbitlens")
            .with_inner_size([prefs.window_width, prefs.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Orbitlens",
        options,
        Box::new(move |cc| {
            Ok(Box::new(OrbitlensApp::new(
                &cc.egui_ctx,
                session,
                trace_color,
                prefs,
            )))
        }),
    )
}

fn startup_state() -> orbitlens_core::Result<(Session<RasterSnapshot>, Rgb)> {
    let palette = palette_hex(&period_palette());
    let session = Session::new(
        &palette,
        f64::from(BACKDROP_WIDTH),
        f64::from(BACKDROP_HEIGHT),
    )?;
    Ok((session, hex_to_rgb(TRACE_COLOR)?))
}
