use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tracing::{debug, info, warn};

use orbitlens_core::{Complex, Rgb, Session};
use orbitlens_render::backdrop::AA_SAMPLES;
use orbitlens_render::{ExportMetadata, RasterSnapshot, RenderBuffer, RenderCancel};

use crate::app_dir;
use crate::image_worker::{spawn_image_worker, ImageRequest, ImageResponse, ImageSource};
use crate::preferences::AppPreferences;
use crate::ui::swatch_strip::{draw_swatch_strip, to_color32};

const TRACE_WIDTH: f32 = 1.0;
const PROGRESS_REPAINT: Duration = Duration::from_millis(100);

/// The image being shown, at its natural size.
struct Displayed {
    buffer: RenderBuffer,
    source: ImageSource,
    texture: egui::TextureHandle,
}

pub(crate) struct OrbitlensApp {
    session: Session<RasterSnapshot>,
    trace_color: Rgb,
    displayed: Option<Displayed>,

    /// Canvas-relative pointer position and canvas size of the last
    /// pointer-move, so a frame without movement does not re-trace.
    last_pointer: Option<(egui::Vec2, egui::Vec2)>,
    /// Plane point under the pointer, recorded for export metadata.
    hovered_c: Option<Complex>,

    cancel: Arc<RenderCancel>,
    requests: mpsc::Sender<ImageRequest>,
    responses: mpsc::Receiver<ImageResponse>,
    rendering: bool,
    status: String,

    preferences: AppPreferences,
}

impl OrbitlensApp {
    pub(crate) fn new(
        ctx: &egui::Context,
        session: Session<RasterSnapshot>,
        trace_color: Rgb,
        preferences: AppPreferences,
    ) -> Self {
        let cancel = Arc::new(RenderCancel::new());
        let (requests, responses) = spawn_image_worker(ctx.clone(), Arc::clone(&cancel));

        let mut app = Self {
            session,
            trace_color,
            displayed: None,
            last_pointer: None,
            hovered_c: None,
            cancel,
            requests,
            responses,
            rendering: false,
            status: String::new(),
            preferences,
        };
        app.request_backdrop();
        app
    }

    fn request_backdrop(&mut self) {
        let cache = app_dir::backdrop_cache_path();
        debug!("Requesting backdrop from {}", cache.display());
        let generation = self.cancel.generation();
        self.send(ImageRequest::Generate { cache, generation });
        self.rendering = true;
        self.status = "Preparing backdrop\u{2026}".to_string();
    }

    fn send(&mut self, request: ImageRequest) {
        if self.requests.send(request).is_err() {
            warn!("Image worker is gone; request dropped");
            self.status = "Image worker unavailable".to_string();
        }
    }

    fn poll_responses(&mut self, ctx: &egui::Context) {
        while let Ok(response) = self.responses.try_recv() {
            match response {
                ImageResponse::Loaded { buffer, source } => {
                    self.rendering = false;
                    self.install_image(ctx, buffer, source);
                }
                ImageResponse::Cancelled => {
                    self.rendering = false;
                    self.status = "Backdrop render cancelled. Press O to open a picture.".into();
                }
                ImageResponse::Exported { path } => {
                    self.status = format!("Saved {}", path.display());
                }
                ImageResponse::Failed { message } => {
                    warn!("{message}");
                    self.rendering = false;
                    self.status = message;
                }
            }
        }
    }

    fn install_image(&mut self, ctx: &egui::Context, buffer: RenderBuffer, source: ImageSource) {
        let snapshot = match RasterSnapshot::from_buffer(&buffer) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Cannot sample loaded image: {e}");
                self.status = format!("Cannot sample loaded image: {e}");
                return;
            }
        };
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [buffer.width as usize, buffer.height as usize],
            &buffer.pixels,
        );
        let texture = ctx.load_texture("displayed-image", image, egui::TextureOptions::LINEAR);

        self.status = match &source {
            ImageSource::Cache => "Backdrop loaded from cache".to_string(),
            ImageSource::Rendered => "Backdrop rendered".to_string(),
            ImageSource::File(path) => format!("Showing {}", path.display()),
        };
        info!(width = buffer.width, height = buffer.height, "{}", self.status);

        self.session.on_image_loaded(snapshot);
        self.displayed = Some(Displayed {
            buffer,
            source,
            texture,
        });
        // Re-match under the pointer against the new pixels.
        self.last_pointer = None;
    }

    // -----------------------------------------------------------------------
    // Keyboard actions
    // -----------------------------------------------------------------------

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (open, export, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::O),
                i.key_pressed(egui::Key::E),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if escape && self.rendering {
            info!("Cancelling backdrop render");
            self.cancel.cancel();
        }
        if open {
            self.open_picture();
        }
        if export {
            self.export_trace();
        }
    }

    fn open_picture(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Open picture")
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
            .pick_file();
        let Some(path) = picked else {
            return;
        };
        if self.rendering {
            self.cancel.cancel();
        }
        self.status = format!("Opening {}\u{2026}", path.display());
        self.send(ImageRequest::Open { path });
    }

    /// Burn the current trace into a copy of the displayed image and hand it
    /// to the worker for writing.
    fn export_trace(&mut self) {
        let Some(displayed) = &self.displayed else {
            self.status = "Nothing to export yet".to_string();
            return;
        };
        let viewport = self.session.viewport();
        let sx = f64::from(displayed.buffer.width) / viewport.width;
        let sy = f64::from(displayed.buffer.height) / viewport.height;
        let natural: Vec<(f64, f64)> = self
            .session
            .current_trace()
            .iter()
            .map(|&(x, y)| (x * sx, y * sy))
            .collect();

        let mut buffer = displayed.buffer.clone();
        buffer.draw_polyline(&natural, self.trace_color);
        let metadata = ExportMetadata {
            trace_c: self.hovered_c.filter(|_| !natural.is_empty()),
            trace_points: natural.len(),
            aa_samples: if displayed.source.is_backdrop() {
                AA_SAMPLES
            } else {
                0
            },
        };
        let path = app_dir::next_export_path(&app_dir::images_directory());
        debug!(points = natural.len(), "Exporting trace to {}", path.display());
        self.send(ImageRequest::Export {
            buffer,
            path,
            metadata,
        });
    }

    // -----------------------------------------------------------------------
    // Panels
    // -----------------------------------------------------------------------

    fn draw_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.rendering {
                    let (done, total) = self.cancel.progress();
                    let fraction = if total == 0 {
                        0.0
                    } else {
                        done as f32 / total as f32
                    };
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .desired_width(220.0)
                            .show_percentage(),
                    );
                }
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("O open \u{b7} E export \u{b7} Esc cancel");
                });
            });
        });
    }

    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let Some(displayed) = &self.displayed else {
                    ui.centered_and_justified(|ui| {
                        ui.label("No image yet");
                    });
                    return;
                };
                let rect = fit_rect(ui.max_rect(), displayed.texture.size_vec2());
                let texture_id = displayed.texture.id();
                let response = ui.allocate_rect(rect, egui::Sense::hover());

                if let Err(e) = self
                    .session
                    .resize(f64::from(rect.width()), f64::from(rect.height()))
                {
                    debug!("Canvas not usable: {e}");
                    return;
                }

                let painter = ui.painter_at(rect);
                painter.image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                match response.hover_pos() {
                    Some(pos) => self.pointer_moved(pos - rect.min, rect.size()),
                    None => self.pointer_left(),
                }

                let points: Vec<egui::Pos2> = self
                    .session
                    .current_trace()
                    .iter()
                    .map(|&(x, y)| rect.min + egui::vec2(x as f32, y as f32))
                    .collect();
                if points.len() >= 2 {
                    painter.add(egui::Shape::line(
                        points,
                        egui::Stroke::new(TRACE_WIDTH, to_color32(self.trace_color)),
                    ));
                }
            });
    }

    fn pointer_moved(&mut self, relative: egui::Vec2, canvas: egui::Vec2) {
        if self.last_pointer == Some((relative, canvas)) {
            return;
        }
        self.last_pointer = Some((relative, canvas));
        let (x, y) = (f64::from(relative.x), f64::from(relative.y));
        self.hovered_c = Some(self.session.viewport().to_plane(x, y));
        let frame = self.session.on_pointer_move(x, y);
        if frame.change.cleared != frame.change.set {
            debug!(
                cleared = ?frame.change.cleared,
                set = ?frame.change.set,
                points = frame.trace.len(),
                "Highlight changed"
            );
        }
    }

    fn pointer_left(&mut self) {
        if self.last_pointer.take().is_some() {
            self.hovered_c = None;
            let change = self.session.on_pointer_leave();
            debug!(cleared = ?change.cleared, "Pointer left canvas");
        }
    }

    fn remember_window_size(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.preferences.window_width = rect.width();
            self.preferences.window_height = rect.height();
        }
    }
}

impl eframe::App for OrbitlensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.poll_responses(ctx);
        self.handle_keys(ctx);
        self.remember_window_size(ctx);

        self.draw_status_bar(ctx);
        egui::TopBottomPanel::bottom("swatches").show(ctx, |ui| {
            ui.add_space(4.0);
            draw_swatch_strip(ui, self.session.swatches(), self.session.highlight());
            ui.add_space(4.0);
        });
        self.draw_canvas(ctx);

        if self.rendering {
            ctx.request_repaint_after(PROGRESS_REPAINT);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.cancel.cancel();
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

/// Largest rect with the aspect ratio of `image` centred inside `available`.
pub(crate) fn fit_rect(available: egui::Rect, image: egui::Vec2) -> egui::Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Rect::from_center_size(available.center(), egui::Vec2::ZERO);
    }
    let scale = (available.width() / image.x).min(available.height() / image.y);
    egui::Rect::from_center_size(available.center(), image * scale)
}
