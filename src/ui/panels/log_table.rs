// K6LogView - ui/panels/log_table.rs
//
// Virtual-scrolling record table.
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows currently
// visible in the viewport, so cost is independent of the record count.
// Columns: TimeStamp | Level | Message | VU | ITER. Only the level cell is
// coloured; everything else uses the theme's row text colour.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::RichText;

/// Render the record table (central area).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    if !state.is_file_loaded() {
        ui.centered_and_justified(|ui| {
            if state.loading {
                ui.spinner();
            } else {
                ui.label(
                    "No log file loaded.\nOpen one via File \u{2192} Open Log\u{2026} or drop it here.",
                );
            }
        });
        return;
    }

    let row_height = theme::row_height(state.font_size);
    let spacing = ui.spacing().item_spacing.x;

    header(ui, row_height, spacing);
    ui.separator();

    let visible = state.filtered_indices.len();
    if visible == 0 {
        ui.centered_and_justified(|ui| {
            if state.records.is_empty() {
                ui.label("The file contains no valid log lines.");
            } else {
                ui.label("No logs match the current filters.");
            }
        });
        return;
    }

    let body_colour = theme::row_text_colour(state.dark_mode);

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, visible, |ui, row_range| {
            for display_idx in row_range {
                let Some(record) = state
                    .filtered_indices
                    .get(display_idx)
                    .and_then(|&i| state.records.get(i))
                else {
                    continue;
                };

                let message_width = message_column_width(ui.available_width(), spacing);
                ui.horizontal(|ui| {
                    cell(
                        ui,
                        theme::TIME_COLUMN_WIDTH,
                        row_height,
                        RichText::new(&record.time).monospace().color(body_colour),
                    );
                    cell(
                        ui,
                        theme::LEVEL_COLUMN_WIDTH,
                        row_height,
                        RichText::new(&record.level)
                            .monospace()
                            .strong()
                            .color(theme::level_colour(&record.level, state.dark_mode)),
                    );
                    cell(
                        ui,
                        message_width,
                        row_height,
                        RichText::new(record.message_text()).color(body_colour),
                    );
                    cell(
                        ui,
                        theme::VU_COLUMN_WIDTH,
                        row_height,
                        RichText::new(record.vu_text()).monospace().color(body_colour),
                    );
                    cell(
                        ui,
                        theme::ITER_COLUMN_WIDTH,
                        row_height,
                        RichText::new(record.iter_text()).monospace().color(body_colour),
                    );
                });
            }
        });
}

fn header(ui: &mut egui::Ui, row_height: f32, spacing: f32) {
    let message_width = message_column_width(ui.available_width(), spacing);
    ui.horizontal(|ui| {
        cell(ui, theme::TIME_COLUMN_WIDTH, row_height, RichText::new("TimeStamp").strong());
        cell(ui, theme::LEVEL_COLUMN_WIDTH, row_height, RichText::new("Level").strong());
        cell(ui, message_width, row_height, RichText::new("Message").strong());
        cell(ui, theme::VU_COLUMN_WIDTH, row_height, RichText::new("VU").strong());
        cell(ui, theme::ITER_COLUMN_WIDTH, row_height, RichText::new("ITER").strong());
    });
}

/// Message takes whatever the fixed columns leave over.
fn message_column_width(available: f32, spacing: f32) -> f32 {
    let fixed = theme::TIME_COLUMN_WIDTH
        + theme::LEVEL_COLUMN_WIDTH
        + theme::VU_COLUMN_WIDTH
        + theme::ITER_COLUMN_WIDTH
        + spacing * 4.0;
    (available - fixed).max(100.0)
}

/// Fixed-width, single-line, truncating table cell.
fn cell(ui: &mut egui::Ui, width: f32, height: f32, text: RichText) {
    ui.allocate_ui_with_layout(
        egui::vec2(width, height),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.set_width(width);
            ui.add(egui::Label::new(text).truncate());
        },
    );
}
