// K6LogView - ui/panels/filters.rs
//
// Filter controls bar: level drop-down, message text, VU and ITER numbers,
// Clear button. Each edited field is written through an AppState setter,
// which recomputes the visible set immediately.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::{ALL_LEVELS_LABEL, LEVEL_CHOICES};

/// Render the filter controls. Hidden while no file is loaded.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if !state.is_file_loaded() {
        return;
    }

    ui.horizontal(|ui| {
        // Level
        let mut level = state.filter_state.level_filter.clone();
        let selected = if level.is_empty() {
            ALL_LEVELS_LABEL.to_string()
        } else {
            level.clone()
        };
        egui::ComboBox::from_id_salt("level_filter")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut level, String::new(), ALL_LEVELS_LABEL);
                for choice in LEVEL_CHOICES {
                    ui.selectable_value(&mut level, (*choice).to_string(), *choice);
                }
            });
        if level != state.filter_state.level_filter {
            state.set_level_filter(level);
        }

        // Message
        let mut msg = state.filter_state.msg_filter.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut msg)
                .hint_text("Filter by message")
                .desired_width(theme::MESSAGE_INPUT_WIDTH),
        );
        if response.changed() {
            state.set_msg_filter(msg);
        }

        // VU
        let mut vu = state.filter_state.vu_filter.clone();
        if number_input(ui, &mut vu, "VU") {
            state.set_vu_filter(vu);
        }

        // ITER
        let mut iter = state.filter_state.iter_filter.clone();
        if number_input(ui, &mut iter, "ITER") {
            state.set_iter_filter(iter);
        }

        let has_filters = !state.filter_state.is_empty();
        if ui
            .add_enabled(has_filters, egui::Button::new("Clear"))
            .clicked()
        {
            state.clear_filters();
        }
    });
}

/// Single-line numeric input. Non-digit characters are stripped as typed.
/// Returns true when the value changed.
fn number_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> bool {
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(theme::NUMBER_INPUT_WIDTH),
    );
    if response.changed() {
        value.retain(|c| c.is_ascii_digit());
        return true;
    }
    false
}
