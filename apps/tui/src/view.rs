//! View model for the two panes, built from the catalog and fetch results.
//!
//! Everything here is a pure function of its inputs; the terminal layer
//! owns selection and expansion state and re-renders from these values.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::area::AreaCatalog;
use crate::domain::ForecastDay;
use crate::error::AppError;

pub const PLACEHOLDER_TEXT: &str = "Select an office to see its forecast.";
pub const NO_CLASS15_TEXT: &str = "No class15 subdivisions.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterNode {
    pub id: String,
    pub label: String,
    pub offices: Vec<OfficeNode>,
}

/// Centers in catalog order, each with its resolvable offices.
pub fn region_tree(catalog: &AreaCatalog) -> Vec<CenterNode> {
    catalog
        .centers()
        .map(|center| CenterNode {
            id: center.id.clone(),
            label: center.name.clone(),
            offices: catalog
                .offices_of(&center.id)
                .into_iter()
                .map(|office| OfficeNode {
                    id: office.id.clone(),
                    label: office.label(),
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdivisionNode {
    pub id: String,
    pub label: String,
    pub class15s: Vec<String>,
}

/// Class10 areas with their class15 children, for the secondary view.
pub fn subdivision_tree(catalog: &AreaCatalog) -> Vec<SubdivisionNode> {
    catalog
        .class10s()
        .map(|class10| SubdivisionNode {
            id: class10.id.clone(),
            label: format!("{} ({})", class10.name, class10.id),
            class15s: catalog
                .class15_of(&class10.id)
                .into_iter()
                .map(|node| format!("{} (code: {})", node.name, node.id))
                .collect(),
        })
        .collect()
}

/// One office matched by the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeMatch {
    pub center: usize,
    pub office: usize,
    pub score: i64,
}

/// Offices whose label or id fuzzy-match `pattern`, best match first.
///
/// An empty pattern matches every office in tree order.
pub fn search_offices(tree: &[CenterNode], pattern: &str) -> Vec<OfficeMatch> {
    let pattern = pattern.trim();
    let matcher = SkimMatcherV2::default();

    let mut matches: Vec<OfficeMatch> = tree
        .iter()
        .enumerate()
        .flat_map(|(center, node)| {
            node.offices
                .iter()
                .enumerate()
                .map(move |(office, office_node)| (center, office, office_node))
        })
        .filter_map(|(center, office, office_node)| {
            let score = if pattern.is_empty() {
                0
            } else {
                let by_label = matcher.fuzzy_match(&office_node.label, pattern);
                let by_id = matcher.fuzzy_match(&office_node.id, pattern);
                by_label.max(by_id)?
            };
            Some(OfficeMatch {
                center,
                office,
                score,
            })
        })
        .collect();

    // stable sort keeps tree order among equal scores
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub date: String,
    pub icon: String,
    pub text: String,
    pub code: String,
}

impl From<&ForecastDay> for WeatherCard {
    fn from(day: &ForecastDay) -> Self {
        Self {
            date: day.display_date(),
            icon: day.icon().to_string(),
            text: day.text().into_owned(),
            code: day.weather_code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailPane {
    #[default]
    Placeholder,
    Forecast {
        office_code: String,
        title: String,
        cards: Vec<WeatherCard>,
    },
    Error(String),
}

/// Detail pane for the outcome of one forecast fetch.
pub fn detail_pane(
    office_code: &str,
    title: &str,
    result: Result<&[ForecastDay], &AppError>,
) -> DetailPane {
    match result {
        Ok(days) => DetailPane::Forecast {
            office_code: office_code.to_string(),
            title: title.to_string(),
            cards: days.iter().map(WeatherCard::from).collect(),
        },
        Err(error) => DetailPane::Error(error.user_message()),
    }
}
