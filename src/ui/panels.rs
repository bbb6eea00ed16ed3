use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the year selector, theme toggle, and export button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🌍 World Happiness Dashboard");
    ui.add_space(4.0);
    ui.hyperlink_to(
        "World Happiness Report Dataset",
        "https://www.kaggle.com/datasets/unsdsn/world-happiness/data",
    );
    ui.separator();

    if state.catalog.is_empty() {
        ui.label("No cleaned_<YEAR>.csv files found in the data directory.");
        return;
    }

    // ---- Year selector ----
    ui.strong("Select a year");
    let years: Vec<_> = state.catalog.years().collect();
    let current = state.selected_year;
    let selected_text = current.map(|y| y.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            for year in years {
                if ui
                    .selectable_label(current == Some(year), year.to_string())
                    .clicked()
                {
                    state.select_year(year);
                }
            }
        });
    ui.separator();

    // ---- Theme toggle ----
    ui.strong("Select theme");
    let mut theme = state.theme;
    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut theme, Theme::Dark, Theme::Dark.label());
        ui.radio_value(&mut theme, Theme::Light, Theme::Light.label());
    });
    state.set_theme(theme);
    ui.separator();

    // ---- Export ----
    let export_enabled = state.snapshot.is_some();
    if ui
        .add_enabled(
            export_enabled,
            egui::Button::new("Download Data for the Selected Year"),
        )
        .clicked()
    {
        save_export_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let enabled = state.snapshot.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(snapshot) = &state.snapshot {
            ui.label(format!(
                "{} countries loaded for {}",
                snapshot.len(),
                snapshot.year
            ));
        }

        if let Some(msg) = &state.render_error {
            ui.separator();
            ui.label(
                RichText::new(msg).color(state.theme.palette().negative.to_color32()),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

fn save_export_dialog(state: &mut AppState) {
    let Some((filename, bytes)) = state.export_payload() else {
        return;
    };

    let target = rfd::FileDialog::new()
        .set_title("Save dataset as CSV")
        .set_file_name(&filename)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        match std::fs::write(&path, &bytes) {
            Ok(()) => log::info!("exported {} bytes to {}", bytes.len(), path.display()),
            Err(e) => {
                log::error!("failed to write export: {e}");
                state.render_error = Some(format!("Export failed: {e}"));
            }
        }
    }
}
