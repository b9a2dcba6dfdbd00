use jma_forecast::view::{
    detail_pane, region_tree, search_offices, subdivision_tree, CenterNode, DetailPane,
    OfficeMatch, OfficeNode, SubdivisionNode,
};
use jma_forecast::{AppError, AreaCatalog};
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::AppActions;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    /// Centers and offices on the left, forecast on the right
    Regions,
    /// Class10 areas on the left, their class15 children on the right
    Subdivisions,
}

/// One line of the region list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRow {
    Center(usize),
    Office { center: usize, office: usize },
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub catalog: AreaCatalog,
    pub catalog_error: Option<String>,
    pub centers: Vec<CenterNode>,
    pub expanded: Vec<bool>,
    pub selected_row: usize,
    pub subdivisions: Vec<SubdivisionNode>,
    pub selected_subdivision: usize,
    pub search_active: bool,
    pub search_query: String,
    pub search_results: Vec<OfficeMatch>,
    pub detail: DetailPane,
    pub pending_office: Option<String>,
    pub loading_office: Option<String>,
    pub status_message: String,
    pub throbber_state: ThrobberState,
    pub actions: AppActions,
}

impl App {
    pub fn new(actions: AppActions) -> Self {
        Self {
            running: true,
            screen: AppScreen::Regions,
            show_help: false,
            catalog: AreaCatalog::default(),
            catalog_error: None,
            centers: Vec::new(),
            expanded: Vec::new(),
            selected_row: 0,
            subdivisions: Vec::new(),
            selected_subdivision: 0,
            search_active: false,
            search_query: String::new(),
            search_results: Vec::new(),
            detail: DetailPane::Placeholder,
            pending_office: None,
            loading_office: None,
            status_message: String::new(),
            throbber_state: ThrobberState::default(),
            actions,
        }
    }

    /// Loads the area catalog; a failure leaves an empty list and an error message.
    pub async fn load_catalog(&mut self) {
        match self.actions.load_catalog().await {
            Ok(catalog) => self.set_catalog(catalog),
            Err(e) => {
                tracing::error!(error = %e, source = %self.actions.config.area_source, "area catalog unavailable");
                self.catalog_error = Some(e.user_message());
                self.status_message = "Error: region list could not be loaded".to_string();
            }
        }
    }

    pub fn set_catalog(&mut self, catalog: AreaCatalog) {
        self.centers = region_tree(&catalog);
        self.expanded = vec![false; self.centers.len()];
        self.subdivisions = subdivision_tree(&catalog);
        self.catalog = catalog;
        self.catalog_error = None;
        self.selected_row = 0;
        self.selected_subdivision = 0;
    }

    /// Rows currently shown in the region pane.
    pub fn visible_rows(&self) -> Vec<RegionRow> {
        if self.search_active {
            return self
                .search_results
                .iter()
                .map(|hit| RegionRow::Office {
                    center: hit.center,
                    office: hit.office,
                })
                .collect();
        }

        let mut rows = Vec::new();
        for (center, node) in self.centers.iter().enumerate() {
            rows.push(RegionRow::Center(center));
            if self.expanded.get(center).copied().unwrap_or(false) {
                rows.extend((0..node.offices.len()).map(|office| RegionRow::Office { center, office }));
            }
        }
        rows
    }

    pub fn selected_region_row(&self) -> Option<RegionRow> {
        self.visible_rows().get(self.selected_row).copied()
    }

    pub fn office_node(&self, center: usize, office: usize) -> Option<&OfficeNode> {
        self.centers.get(center)?.offices.get(office)
    }

    pub fn set_expanded(&mut self, center: usize, expanded: bool) {
        if let Some(flag) = self.expanded.get_mut(center) {
            *flag = expanded;
        }
        self.clamp_selection();
    }

    /// Enter on a center toggles it; on an office it queues a forecast fetch.
    pub fn activate_selected(&mut self) {
        match self.selected_region_row() {
            Some(RegionRow::Center(center)) => {
                let expanded = self.expanded.get(center).copied().unwrap_or(false);
                self.set_expanded(center, !expanded);
            }
            Some(RegionRow::Office { center, office }) => {
                if let Some(node) = self.office_node(center, office) {
                    self.pending_office = Some(node.id.clone());
                }
            }
            None => {}
        }
    }

    /// Collapses the center that owns the selection and moves onto it.
    pub fn collapse_selected(&mut self) {
        let center = match self.selected_region_row() {
            Some(RegionRow::Center(center) | RegionRow::Office { center, .. }) => center,
            None => return,
        };
        self.set_expanded(center, false);
        if let Some(index) = self
            .visible_rows()
            .iter()
            .position(|row| *row == RegionRow::Center(center))
        {
            self.selected_row = index;
        }
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
        self.update_search();
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.search_results.clear();
        self.selected_row = 0;
    }

    pub fn update_search(&mut self) {
        self.search_results = search_offices(&self.centers, &self.search_query);
        self.selected_row = 0;
    }

    /// Display title for an office code, falling back to the code itself.
    pub fn office_title(&self, office_code: &str) -> String {
        self.catalog
            .office(office_code)
            .map_or_else(|| office_code.to_string(), jma_forecast::area::AreaNode::label)
    }

    /// Fetches, renders and stores the forecast for one office.
    ///
    /// The detail pane reflects the fetch result either way; a store failure
    /// only changes the status line.
    pub async fn show_forecast(&mut self, office_code: &str) -> Result<usize, AppError> {
        let title = self.office_title(office_code);
        let result = self.actions.fetch_forecast(office_code).await;
        self.detail = detail_pane(office_code, &title, result.as_deref());

        let days = result?;
        match self.actions.store_forecast(office_code, &days).await {
            Ok(Some(stored)) => {
                self.status_message =
                    format!("{title}: {} days, {stored} rows stored", days.len());
            }
            Ok(None) => {
                self.status_message = format!("{title}: {} days", days.len());
            }
            Err(e) => {
                tracing::warn!(error = %e, office_code, "forecast not persisted");
                self.status_message = e.user_message();
            }
        }

        Ok(days.len())
    }

    pub fn selected_subdivision_node(&self) -> Option<&SubdivisionNode> {
        self.subdivisions.get(self.selected_subdivision)
    }

    fn clamp_selection(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= total {
            self.selected_row = total - 1;
        }
    }
}
