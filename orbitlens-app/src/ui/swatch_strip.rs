use eframe::egui;

use orbitlens_core::{Highlight, Rgb, SwatchSet};

const SWATCH_SIZE: f32 = 26.0;
const SWATCH_ROUNDING: f32 = 3.0;
const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 200, 40);

pub(crate) fn to_color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Black on light swatches, white on dark ones (Rec. 601 luma).
pub(crate) fn label_color(rgb: Rgb) -> egui::Color32 {
    let luma = 299 * u32::from(rgb.r) + 587 * u32::from(rgb.g) + 114 * u32::from(rgb.b);
    if luma >= 128_000 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

/// Row of numbered swatches; the highlighted one gets an accent outline.
pub(crate) fn draw_swatch_strip(ui: &mut egui::Ui, swatches: &SwatchSet, highlight: Highlight) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
        for swatch in swatches {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
            let painter = ui.painter();
            painter.rect_filled(rect, SWATCH_ROUNDING, to_color32(swatch.color));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                (swatch.id.index() + 1).to_string(),
                egui::FontId::proportional(11.0),
                label_color(swatch.color),
            );
            if highlight.is_highlighted(swatch.id) {
                painter.rect_stroke(
                    rect,
                    SWATCH_ROUNDING,
                    egui::Stroke::new(3.0, ACCENT),
                    egui::StrokeKind::Outside,
                );
            }
            response.on_hover_text(&swatch.hex);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_contrast_with_swatch() {
        assert_eq!(label_color(Rgb::WHITE), egui::Color32::BLACK);
        assert_eq!(label_color(Rgb::BLACK), egui::Color32::WHITE);
        assert_eq!(label_color(Rgb::new(0, 0, 255)), egui::Color32::WHITE);
        assert_eq!(label_color(Rgb::new(255, 255, 0)), egui::Color32::BLACK);
    }
}
