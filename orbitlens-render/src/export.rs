//! PNG export with embedded metadata (tEXt chunks), and PNG loading for the
//! backdrop cache.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use orbitlens_core::Complex;

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

const SOFTWARE: &str = "Orbitlens";

/// What went into an exported image.
#[derive(Debug, Clone, Default)]
pub struct ExportMetadata {
    /// Parameter of the burned-in trace, if any.
    pub trace_c: Option<Complex>,
    /// Number of points in that trace.
    pub trace_points: usize,
    /// Sub-pixel samples per backdrop pixel (0 when the backdrop was not
    /// generated here).
    pub aa_samples: u32,
}

/// Write `buffer` as an 8-bit RGBA PNG with `metadata` in tEXt chunks.
pub fn export_png(
    buffer: &RenderBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), SOFTWARE.to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(buffer, metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

fn build_description(buffer: &RenderBuffer, meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "Period backdrop {}x{}, re [-2.5, 1], im [-1, 1]",
        buffer.width, buffer.height
    );
    if let Some(c) = meta.trace_c {
        desc.push_str(&format!(", orbit of {c} ({} points)", meta.trace_points));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let mut pairs = vec![("Orbitlens.AASamples".to_string(), meta.aa_samples.to_string())];
    if let Some(c) = meta.trace_c {
        pairs.push(("Orbitlens.TraceRe".into(), c.re.to_string()));
        pairs.push(("Orbitlens.TraceIm".into(), c.im.to_string()));
        pairs.push(("Orbitlens.TracePoints".into(), meta.trace_points.to_string()));
    }
    pairs
}

/// Decode an 8-bit (or expandable) PNG into an RGBA buffer.
pub fn load_png(path: &Path) -> crate::Result<RenderBuffer> {
    let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut raw = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw)?;
    let bytes = &raw[..info.buffer_size()];

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::Png("indexed PNG was not expanded".into()));
        }
    };
    debug!("Loaded PNG {}x{} from {}", info.width, info.height, path.display());
    RenderBuffer::from_rgba(info.width, info.height, rgba)
}
