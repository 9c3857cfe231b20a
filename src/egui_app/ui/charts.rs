use eframe::egui::{self, Pos2, Rect, Stroke, StrokeKind};

use super::style;

const BAR_HEIGHT: f32 = 12.0;
const FACTOR_BAR_WIDTH: f32 = 140.0;
const TREND_HEIGHT: f32 = 48.0;

/// Horizontal bar filled to `fraction` of the available width.
pub(super) fn probability_bar(ui: &mut egui::Ui, fraction: f32) {
    let palette = style::palette();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), BAR_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.bg_tertiary);
    let mut filled = rect;
    filled.set_width(rect.width() * fraction.clamp(0.0, 1.0));
    painter.rect_filled(filled, 0.0, palette.accent_ice);
    painter.rect_stroke(rect, 0.0, style::section_stroke(), StrokeKind::Inside);
}

/// Bar for one factor, scaled against the largest magnitude shown.
pub(super) fn factor_bar(ui: &mut egui::Ui, value: f32, peak: f32) {
    let palette = style::palette();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(FACTOR_BAR_WIDTH, BAR_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.grid_soft);
    if peak <= f32::EPSILON {
        return;
    }
    let width = rect.width() * (value.abs() / peak).clamp(0.0, 1.0);
    let bar = Rect::from_min_size(rect.min, egui::vec2(width, rect.height()));
    painter.rect_filled(bar, 0.0, style::factor_color(value));
}

/// Probability trend with a point per run, oldest on the left.
pub(super) fn trend_line(ui: &mut egui::Ui, points: &[f32]) {
    let palette = style::palette();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), TREND_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.bg_primary);
    let mid_y = rect.center().y;
    painter.line_segment(
        [Pos2::new(rect.left(), mid_y), Pos2::new(rect.right(), mid_y)],
        Stroke::new(1.0, palette.grid_soft),
    );
    let positions = trend_positions(rect, points);
    if positions.len() > 1 {
        painter.add(egui::Shape::line(
            positions.clone(),
            Stroke::new(1.5, palette.accent_ice),
        ));
    }
    for pos in positions {
        painter.circle_filled(pos, 2.5, palette.accent_ice);
    }
}

fn trend_positions(rect: Rect, points: &[f32]) -> Vec<Pos2> {
    let step = if points.len() > 1 {
        rect.width() / (points.len() - 1) as f32
    } else {
        0.0
    };
    points
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let x = if points.len() > 1 {
                rect.left() + step * index as f32
            } else {
                rect.center().x
            };
            let y = rect.bottom() - rect.height() * value.clamp(0.0, 1.0);
            Pos2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_spans_rect_and_maps_probability_to_height() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(100.0, 50.0));
        let positions = trend_positions(rect, &[0.0, 0.5, 1.0]);
        assert_eq!(positions[0], Pos2::new(0.0, 50.0));
        assert_eq!(positions[1], Pos2::new(50.0, 25.0));
        assert_eq!(positions[2], Pos2::new(100.0, 0.0));
    }

    #[test]
    fn single_point_is_centered() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(80.0, 40.0));
        assert_eq!(trend_positions(rect, &[0.25]), vec![Pos2::new(40.0, 30.0)]);
    }
}
