use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;
use tracing::{debug, error, info, warn};

use orbitlens_render::backdrop::{AA_SAMPLES, BACKDROP_HEIGHT, BACKDROP_WIDTH};
use orbitlens_render::{
    export_png, load_png, period_palette, render_backdrop_for, ExportMetadata, RenderBuffer,
    RenderCancel,
};

/// Where a displayed image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImageSource {
    /// Read back from the backdrop cache.
    Cache,
    /// Rendered just now.
    Rendered,
    /// Picked by the user.
    File(PathBuf),
}

impl ImageSource {
    pub(crate) fn is_backdrop(&self) -> bool {
        matches!(self, Self::Cache | Self::Rendered)
    }
}

/// Request sent from the UI thread to the image worker.
pub(crate) enum ImageRequest {
    /// Load the cached backdrop at `cache`, rendering and writing it if absent.
    /// `generation` is the cancel generation when the request was sent; a
    /// cancel after that point abandons the request.
    Generate { cache: PathBuf, generation: u64 },
    /// Decode an arbitrary picture.
    Open { path: PathBuf },
    /// Write `buffer` to `path` as PNG, creating parent dirs.
    Export {
        buffer: RenderBuffer,
        path: PathBuf,
        metadata: ExportMetadata,
    },
}

/// Response sent from the image worker back to the UI thread.
pub(crate) enum ImageResponse {
    Loaded {
        buffer: RenderBuffer,
        source: ImageSource,
    },
    /// The backdrop render was cancelled before it finished.
    Cancelled,
    Exported { path: PathBuf },
    Failed { message: String },
}

/// Spawn the image worker thread.
///
/// Every response is followed by a repaint request so the UI picks it up
/// without waiting for input. The thread runs until the request sender is
/// dropped.
pub(crate) fn spawn_image_worker(
    ctx: egui::Context,
    cancel: Arc<RenderCancel>,
) -> (mpsc::Sender<ImageRequest>, mpsc::Receiver<ImageResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<ImageRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<ImageResponse>();

    let spawned = std::thread::Builder::new()
        .name("image-worker".into())
        .spawn(move || {
            debug!("Image worker thread started");
            while let Ok(request) = req_rx.recv() {
                let response = match request {
                    ImageRequest::Generate { cache, generation } => {
                        generate_backdrop(&cache, &cancel, generation)
                    }
                    ImageRequest::Open { path } => open_picture(path),
                    ImageRequest::Export {
                        buffer,
                        path,
                        metadata,
                    } => export(&buffer, path, &metadata),
                };
                if resp_tx.send(response).is_err() {
                    break;
                }
                ctx.request_repaint();
            }
            debug!("Image worker thread exiting");
        });
    if let Err(e) = spawned {
        error!("Failed to spawn image worker: {e}");
    }

    (req_tx, resp_rx)
}

fn generate_backdrop(cache: &Path, cancel: &RenderCancel, generation: u64) -> ImageResponse {
    if cancel.generation() != generation {
        info!("Backdrop request cancelled before it started");
        return ImageResponse::Cancelled;
    }
    if cache.exists() {
        match load_png(cache) {
            Ok(buffer) => {
                info!("Loaded cached backdrop from {}", cache.display());
                return ImageResponse::Loaded {
                    buffer,
                    source: ImageSource::Cache,
                };
            }
            Err(e) => warn!("Ignoring unreadable backdrop cache {}: {e}", cache.display()),
        }
    }

    let palette = period_palette();
    match render_backdrop_for(
        generation,
        BACKDROP_WIDTH,
        BACKDROP_HEIGHT,
        AA_SAMPLES,
        &palette,
        cancel,
    ) {
        Ok(Some(buffer)) => {
            let metadata = ExportMetadata {
                aa_samples: AA_SAMPLES,
                ..Default::default()
            };
            match export_png(&buffer, cache, &metadata) {
                Ok(()) => info!("Cached backdrop to {}", cache.display()),
                Err(e) => warn!("Could not cache backdrop to {}: {e}", cache.display()),
            }
            ImageResponse::Loaded {
                buffer,
                source: ImageSource::Rendered,
            }
        }
        Ok(None) => {
            info!("Backdrop render cancelled");
            ImageResponse::Cancelled
        }
        Err(e) => ImageResponse::Failed {
            message: format!("Backdrop render failed: {e}"),
        },
    }
}

fn open_picture(path: PathBuf) -> ImageResponse {
    match decode_picture(&path) {
        Ok(buffer) => {
            info!(
                width = buffer.width,
                height = buffer.height,
                "Opened {}",
                path.display()
            );
            ImageResponse::Loaded {
                buffer,
                source: ImageSource::File(path),
            }
        }
        Err(message) => ImageResponse::Failed { message },
    }
}

/// Decode any supported picture into an RGBA buffer.
pub(crate) fn decode_picture(path: &Path) -> Result<RenderBuffer, String> {
    let rgba = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    RenderBuffer::from_rgba(width, height, rgba.into_raw())
        .map_err(|e| format!("Unusable image {}: {e}", path.display()))
}

fn export(buffer: &RenderBuffer, path: PathBuf, metadata: &ExportMetadata) -> ImageResponse {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return ImageResponse::Failed {
                message: format!("Failed to create {}: {e}", parent.display()),
            };
        }
    }
    match export_png(buffer, &path, metadata) {
        Ok(()) => {
            info!("Exported trace to {}", path.display());
            ImageResponse::Exported { path }
        }
        Err(e) => ImageResponse::Failed {
            message: format!("Export to {} failed: {e}", path.display()),
        },
    }
}
