use eframe::egui;

use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::{panels, render};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HappyAtlasApp {
    pub state: AppState,
}

impl HappyAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HappyAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_theme(ctx, self.state.theme);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year + theme selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            render::dashboard_panel(ui, &self.state);
        });
    }
}

/// Resolve the theme token into egui visuals. The token itself stays the
/// single source of truth; no style state lives anywhere else.
fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let palette = theme.palette();
    let mut visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    visuals.panel_fill = palette.background.to_color32();
    visuals.window_fill = palette.panel.to_color32();
    visuals.hyperlink_color = palette.accent.to_color32();
    ctx.set_visuals(visuals);
}
