// K6LogView - ui/theme.rs
//
// Colour scheme, level colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Foreground colour for a normalised level string.
///
/// Levels outside the four k6 levels (including the empty level) use the
/// regular text colour of the active theme.
pub fn level_colour(level: &str, dark_mode: bool) -> Color32 {
    match (level, dark_mode) {
        ("ERROR", true) => Color32::from_rgb(248, 113, 113), // Red 400
        ("ERROR", false) => Color32::from_rgb(185, 28, 28),  // Red 700
        ("WARN", true) => Color32::from_rgb(251, 191, 36),   // Amber 400
        ("WARN", false) => Color32::from_rgb(180, 83, 9),    // Amber 700
        ("INFO", true) => Color32::from_rgb(96, 165, 250),   // Blue 400
        ("INFO", false) => Color32::from_rgb(29, 78, 216),   // Blue 700
        ("DEBUG", true) => Color32::from_rgb(156, 163, 175), // Gray 400
        ("DEBUG", false) => Color32::from_rgb(75, 85, 99),   // Gray 600
        (_, dark) => row_text_colour(dark),
    }
}

/// Body text colour for record rows.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Apply theme and font size to the egui context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.4,
                egui::TextStyle::Small => font_size * 0.75,
                _ => font_size,
            };
        }
    });
}

/// Row height for the record table at a given font size.
pub fn row_height(font_size: f32) -> f32 {
    (font_size * 1.5).round()
}

/// Layout constants (record table column widths, points).
pub const TIME_COLUMN_WIDTH: f32 = 160.0;
pub const LEVEL_COLUMN_WIDTH: f32 = 70.0;
pub const VU_COLUMN_WIDTH: f32 = 60.0;
pub const ITER_COLUMN_WIDTH: f32 = 60.0;

/// Width of the VU / ITER filter inputs.
pub const NUMBER_INPUT_WIDTH: f32 = 70.0;

/// Width of the message filter input.
pub const MESSAGE_INPUT_WIDTH: f32 = 240.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels_get_distinct_colours() {
        let colours: Vec<_> = ["ERROR", "WARN", "INFO", "DEBUG"]
            .iter()
            .map(|l| level_colour(l, true))
            .collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_level_uses_text_colour() {
        assert_eq!(level_colour("", false), row_text_colour(false));
        assert_eq!(level_colour("TRACE", true), row_text_colour(true));
    }
}
