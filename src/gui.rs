// K6LogView - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels and manages the file-load lifecycle.

use crate::app::load::LoadManager;
use crate::app::state::AppState;
use crate::core::export;
use crate::core::model::LoadProgress;
use crate::ui;
use crate::util::constants;
use crate::util::error::{K6LogViewError, Result};
use std::path::{Path, PathBuf};

/// The K6LogView application.
pub struct K6LogViewApp {
    pub state: AppState,
    pub load_manager: LoadManager,
}

impl K6LogViewApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
        }
    }

    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("k6 logs", constants::LOG_FILE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.state.pending_load = Some(path);
        }
    }

    fn close_file(&mut self) {
        self.load_manager.cancel();
        self.state.close();
    }

    /// Export the visible records through a save dialog.
    fn export(&mut self, format: ExportFormat) {
        let (label, ext) = match format {
            ExportFormat::Csv => ("CSV", "csv"),
            ExportFormat::Json => ("JSON", "json"),
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(label, &[ext])
            .set_file_name(format!("k6-logs.{ext}"))
            .save_file()
        else {
            return;
        };

        self.state.status_message = match write_export(&self.state, &dest, format) {
            Ok(n) => format!("Exported {n} records to {label}."),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("{label} export failed: {e}")
            }
        };
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

fn write_export(
    state: &AppState,
    dest: &Path,
    format: ExportFormat,
) -> Result<usize> {
    let file = std::fs::File::create(dest).map_err(|e| K6LogViewError::Io {
        path: dest.to_path_buf(),
        operation: "create export file",
        source: e,
    })?;
    let visible = state.visible_records();
    let count = match format {
        ExportFormat::Csv => export::export_csv(&visible, file, dest)?,
        ExportFormat::Json => export::export_json(&visible, file, dest)?,
    };
    Ok(count)
}

impl eframe::App for K6LogViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for completed reads. Stale generations are already filtered out.
        for msg in self.load_manager.poll_progress() {
            match msg {
                LoadProgress::Loaded { path, text, .. } => {
                    self.state.load_text(&path, &text);
                }
                LoadProgress::Failed { path, error, .. } => {
                    self.state.load_failed(&path, &error);
                }
            }
        }
        self.state.loading = self.load_manager.is_loading();
        if self.state.loading {
            ctx.request_repaint();
        }

        // Drag-and-drop: one file at a time.
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(first) = dropped.first() {
            if dropped.len() > 1 {
                self.state.push_warning(format!(
                    "{} files dropped; only '{}' was opened.",
                    dropped.len(),
                    first.display()
                ));
            }
            self.state.pending_load = Some(first.clone());
        }

        // pending_load: set by the CLI, the open dialog, or a drop.
        if let Some(path) = self.state.pending_load.take() {
            self.state.status_message = format!("Loading {}\u{2026}", path.display());
            self.load_manager.start_load(path);
            self.state.loading = true;
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Log\u{2026}").clicked() {
                        ui.close_menu();
                        self.open_dialog();
                    }
                    let loaded = self.state.is_file_loaded();
                    if ui.add_enabled(loaded, egui::Button::new("Close")).clicked() {
                        ui.close_menu();
                        self.close_file();
                    }
                    ui.separator();
                    let has_visible = !self.state.filtered_indices.is_empty();
                    ui.add_enabled_ui(has_visible, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export CSV\u{2026}").clicked() {
                                ui.close_menu();
                                self.export(ExportFormat::Csv);
                            }
                            if ui.button("Export JSON\u{2026}").clicked() {
                                ui.close_menu();
                                self.export(ExportFormat::Json);
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Load Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    let theme_label = if self.state.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(theme_label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui::theme::apply(ctx, self.state.dark_mode, self.state.font_size);
                        ui.close_menu();
                    }
                });
            });
        });

        // Filter bar (hidden until a file is loaded)
        if self.state.is_file_loaded() {
            egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
                ui.add_space(4.0);
                ui::panels::filters::render(ui, &mut self.state);
                ui.add_space(4.0);
            });
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.loading {
                    ui.spinner();
                }
                ui.label(&self.state.status_message);
                if self.state.debug_mode {
                    ui.weak("[debug]");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(summary) = self.state.count_summary() {
                        ui.label(summary);
                    }
                });
            });
        });

        // Central panel (records)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::log_table::render(ui, &self.state);
        });

        ui::panels::summary::render(ctx, &mut self.state);
    }
}
