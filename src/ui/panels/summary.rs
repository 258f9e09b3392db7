// K6LogView - ui/panels/summary.rs
//
// Load summary window: line counts for the current file, the retained
// parse diagnostics, and session warnings.

use crate::app::state::AppState;

/// Render the load summary dialog (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Load Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let Some(ref summary) = state.load_summary else {
                ui.label("No file has been loaded yet.");
                return;
            };

            ui.strong(summary.path.display().to_string());
            egui::Grid::new("load_summary_overview")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Lines read:");
                    ui.label(summary.lines_processed.to_string());
                    ui.end_row();

                    ui.label("Records:");
                    ui.label(summary.records.to_string());
                    ui.end_row();

                    ui.label("Invalid lines skipped:");
                    let dropped_colour = if summary.lines_dropped > 0 {
                        egui::Color32::from_rgb(248, 113, 113)
                    } else {
                        ui.style().visuals.text_color()
                    };
                    ui.colored_label(dropped_colour, summary.lines_dropped.to_string());
                    ui.end_row();

                    ui.label("Missing/invalid timestamps:");
                    ui.label(summary.timestamp_fallbacks.to_string());
                    ui.end_row();

                    ui.label("Parse time:");
                    ui.label(format!("{:.3}s", summary.duration.as_secs_f64()));
                    ui.end_row();
                });

            if !summary.diagnostics.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Diagnostics ({})", summary.diagnostics.len()));
                egui::ScrollArea::vertical()
                    .id_salt("summary_diagnostics")
                    .max_height(200.0)
                    .show(ui, |ui| {
                        for line in &summary.diagnostics {
                            ui.label(egui::RichText::new(line).monospace().small());
                        }
                    });
            }

            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Warnings ({})", state.warnings.len()));
                egui::ScrollArea::vertical()
                    .id_salt("summary_warnings")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for w in &state.warnings {
                            ui.label(egui::RichText::new(w).small());
                        }
                    });
            }
        });

    if !open {
        state.show_summary = false;
    }
}
