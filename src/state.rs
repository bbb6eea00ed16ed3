use crate::charts::builder::build_dashboard;
use crate::charts::spec::DashboardView;
use crate::config::DashboardConfig;
use crate::data::catalog::DatasetCatalog;
use crate::data::export;
use crate::data::loader::load_year;
use crate::data::model::{Snapshot, YearLabel};
use crate::error::Result;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. One synchronous rebuild per
/// user interaction (year or theme change); nothing is shared across
/// render cycles.
pub struct AppState {
    /// Years discovered at startup; never rescanned.
    pub catalog: DatasetCatalog,

    pub selected_year: Option<YearLabel>,
    pub theme: Theme,

    /// Snapshot for the selected year (None while the current selection is
    /// in an error state).
    pub snapshot: Option<Snapshot>,

    /// Charts and summaries built from the snapshot.
    pub dashboard: Option<DashboardView>,

    /// Error shown in the UI when the current render cycle is blocked.
    pub render_error: Option<String>,
}

impl AppState {
    /// Scan the catalog and load the most recent year. A missing data
    /// directory is the one session-fatal error.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let catalog = DatasetCatalog::scan(&config)?;
        let mut state = Self {
            selected_year: catalog.latest(),
            catalog,
            theme: Theme::Dark,
            snapshot: None,
            dashboard: None,
            render_error: None,
        };
        state.rebuild();
        Ok(state)
    }

    /// Switch the year and run one load + build pass.
    pub fn select_year(&mut self, year: YearLabel) {
        if self.selected_year == Some(year) {
            return;
        }
        self.selected_year = Some(year);
        self.rebuild();
    }

    /// Switch the theme. The snapshot is reused; only the specs are rebuilt.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        match &self.snapshot {
            Some(snapshot) => match build_dashboard(snapshot, self.theme) {
                Ok(view) => self.dashboard = Some(view),
                Err(e) => self.fail(e),
            },
            None => self.rebuild(),
        }
    }

    /// CSV bytes plus suggested filename for the export button.
    pub fn export_payload(&self) -> Option<(String, Vec<u8>)> {
        let snapshot = self.snapshot.as_ref()?;
        match export::write_csv(snapshot) {
            Ok(bytes) => Some((export::export_filename(snapshot), bytes)),
            Err(e) => {
                log::error!("export failed: {e}");
                None
            }
        }
    }

    fn rebuild(&mut self) {
        self.snapshot = None;
        self.dashboard = None;
        self.render_error = None;

        let Some(year) = self.selected_year else {
            return;
        };
        match load_year(self.catalog.directory(), year)
            .and_then(|snapshot| Ok((build_dashboard(&snapshot, self.theme)?, snapshot)))
        {
            Ok((view, snapshot)) => {
                self.snapshot = Some(snapshot);
                self.dashboard = Some(view);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: crate::error::DashboardError) {
        // Terminal for this render cycle only; another selection may succeed.
        log::error!("render cycle blocked: {e}");
        self.snapshot = None;
        self.dashboard = None;
        self.render_error = Some(e.to_string());
    }
}
