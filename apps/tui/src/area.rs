//! The JMA area hierarchy (`centers`, `offices`, `class10s`, `class15s`).
//!
//! The catalog is loaded once at startup and read-only afterwards. Every
//! mapping keeps the key order of the source document, which is also the
//! display order.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::AppError;

/// Published JMA area document.
pub const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";

/// Top-level grouping of offices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub en_name: String,
    #[serde(default)]
    pub office_name: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Node shape shared by offices, class10 and class15 areas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaNode {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub en_name: String,
    #[serde(default)]
    pub office_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl AreaNode {
    /// `name (enName)`, or just the name when there is no English name.
    pub fn label(&self) -> String {
        if self.en_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.en_name)
        }
    }
}

/// Forecast-issuing region; `parent` is a center id.
pub type Office = AreaNode;
/// Secondary subdivision level.
pub type Class10 = AreaNode;
/// Finer subdivision; `parent` is a class10 id.
pub type Class15 = AreaNode;

/// Where the area document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaSource {
    File(PathBuf),
    Url(String),
}

impl AreaSource {
    /// `http(s)://` values are URLs, anything else is a local path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for AreaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AreaDocument {
    #[serde(default)]
    centers: IndexMap<String, Center>,
    #[serde(default)]
    offices: IndexMap<String, Office>,
    #[serde(default)]
    class10s: IndexMap<String, Class10>,
    #[serde(default)]
    class15s: IndexMap<String, Class15>,
}

#[derive(Debug, Clone, Default)]
pub struct AreaCatalog {
    centers: IndexMap<String, Center>,
    offices: IndexMap<String, Office>,
    class10s: IndexMap<String, Class10>,
    class15s: IndexMap<String, Class15>,
}

impl AreaCatalog {
    /// Reads and parses the area document from a file or over HTTP.
    #[tracing::instrument(level = "info")]
    pub async fn load(source: &AreaSource) -> Result<Self, AppError> {
        let body = match source {
            AreaSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::DataUnavailable(format!("{}: {e}", path.display())))?,
            AreaSource::Url(url) => fetch_document(url).await?,
        };

        let catalog = Self::from_json(&body)?;
        tracing::info!(
            centers = catalog.centers.len(),
            offices = catalog.offices.len(),
            class10s = catalog.class10s.len(),
            class15s = catalog.class15s.len(),
            "area catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses an in-memory area document. Absent top-level keys are empty.
    pub fn from_json(body: &str) -> Result<Self, AppError> {
        let document: AreaDocument = serde_json::from_str(body).map_err(AppError::MalformedData)?;

        Ok(Self {
            centers: with_ids(document.centers, |center, id| center.id = id),
            offices: with_ids(document.offices, |office, id| office.id = id),
            class10s: with_ids(document.class10s, |node, id| node.id = id),
            class15s: with_ids(document.class15s, |node, id| node.id = id),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
            && self.offices.is_empty()
            && self.class10s.is_empty()
            && self.class15s.is_empty()
    }

    /// Centers in document order.
    pub fn centers(&self) -> impl Iterator<Item = &Center> {
        self.centers.values()
    }

    pub fn center(&self, id: &str) -> Option<&Center> {
        self.centers.get(id)
    }

    pub fn office(&self, id: &str) -> Option<&Office> {
        self.offices.get(id)
    }

    /// Class10 areas in document order.
    pub fn class10s(&self) -> impl Iterator<Item = &Class10> {
        self.class10s.values()
    }

    /// Offices of a center in `children` order.
    ///
    /// Child ids missing from `offices` are skipped without error; an
    /// unknown center yields an empty list.
    pub fn offices_of(&self, center_id: &str) -> Vec<&Office> {
        self.centers.get(center_id).map_or_else(Vec::new, |center| {
            center
                .children
                .iter()
                .filter_map(|child| self.offices.get(child))
                .collect()
        })
    }

    /// Class15 areas whose parent is `class10_id`, in document order.
    pub fn class15_of(&self, class10_id: &str) -> Vec<&Class15> {
        self.class15s
            .values()
            .filter(|node| node.parent.as_deref() == Some(class10_id))
            .collect()
    }
}

fn with_ids<T>(
    mut entries: IndexMap<String, T>,
    assign: impl Fn(&mut T, String),
) -> IndexMap<String, T> {
    for (id, entry) in &mut entries {
        assign(entry, id.clone());
    }
    entries
}

async fn fetch_document(url: &str) -> Result<String, AppError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::DataUnavailable(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::DataUnavailable(format!("{url}: HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::DataUnavailable(format!("{url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE: &str = r#"{
        "centers": {
            "010300": {
                "name": "東北地方",
                "enName": "Tohoku",
                "officeName": "仙台管区気象台",
                "children": ["040000", "XX", "020000", "030000"]
            },
            "010100": {
                "name": "北海道地方",
                "enName": "Hokkaido",
                "children": ["011000"]
            }
        },
        "offices": {
            "011000": {"name": "宗谷地方", "enName": "Soya", "parent": "010100", "children": ["011000"]},
            "020000": {"name": "青森県", "enName": "Aomori", "parent": "010300", "children": []},
            "030000": {"name": "岩手県", "enName": "Iwate", "parent": "010300", "children": []},
            "040000": {"name": "宮城県", "enName": "Miyagi", "parent": "010300", "children": []}
        },
        "class10s": {
            "040010": {"name": "東部", "enName": "Eastern", "parent": "040000", "children": ["040011"]},
            "040020": {"name": "西部", "enName": "Western", "parent": "040000", "children": []}
        },
        "class15s": {
            "040012": {"name": "仙台地域", "enName": "Sendai", "parent": "040010", "children": []},
            "040013": {"name": "石巻地域", "enName": "Ishinomaki", "parent": "040010", "children": []},
            "040021": {"name": "白石地域", "enName": "Shiroishi", "parent": "040020", "children": []}
        }
    }"#;

    #[test]
    fn test_offices_of_keeps_children_order_and_skips_unknown() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(SAMPLE)?;

        let ids: Vec<&str> = catalog
            .offices_of("010300")
            .iter()
            .map(|office| office.id.as_str())
            .collect();
        assert_eq!(ids, vec!["040000", "020000", "030000"]);
        Ok(())
    }

    #[test]
    fn test_offices_of_unknown_center_is_empty() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(SAMPLE)?;
        assert!(catalog.offices_of("999999").is_empty());
        Ok(())
    }

    #[test]
    fn test_centers_follow_document_order() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(SAMPLE)?;
        let names: Vec<&str> = catalog.centers().map(|c| c.en_name.as_str()).collect();
        assert_eq!(names, vec!["Tohoku", "Hokkaido"]);
        assert_eq!(
            catalog.center("010300").and_then(|c| c.office_name.as_deref()),
            Some("仙台管区気象台")
        );
        Ok(())
    }

    #[test]
    fn test_class15_of_filters_by_parent() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(SAMPLE)?;

        let eastern: Vec<&str> = catalog
            .class15_of("040010")
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(eastern, vec!["040012", "040013"]);
        assert_eq!(catalog.class15_of("040020").len(), 1);
        assert!(catalog.class15_of("011000").is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_keys_default_to_empty() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(r#"{"offices": {}}"#)?;
        assert!(catalog.is_empty());
        assert_eq!(catalog.centers().count(), 0);
        Ok(())
    }

    #[test]
    fn test_office_label() -> Result<(), AppError> {
        let catalog = AreaCatalog::from_json(SAMPLE)?;
        let office = catalog.office("040000").ok_or(AppError::DataUnavailable("missing".into()))?;
        assert_eq!(office.label(), "宮城県 (Miyagi)");
        assert_eq!(office.parent.as_deref(), Some("010300"));
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = AreaCatalog::from_json("{\"centers\": [");
        assert!(matches!(result, Err(AppError::MalformedData(_))));
    }

    #[test]
    fn test_area_source_parse() {
        assert_eq!(
            AreaSource::parse(DEFAULT_AREA_URL),
            AreaSource::Url(DEFAULT_AREA_URL.to_string())
        );
        assert_eq!(
            AreaSource::parse("jma/area.json"),
            AreaSource::File(PathBuf::from("jma/area.json"))
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_data_unavailable() {
        let source = AreaSource::File(PathBuf::from("/nonexistent/jma/area.json"));
        let result = AreaCatalog::load(&source).await;
        assert!(matches!(result, Err(AppError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;

        let catalog = AreaCatalog::load(&AreaSource::File(file.path().to_path_buf())).await?;
        assert_eq!(catalog.offices_of("010100").len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_from_url() -> Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/common/const/area.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
            .mount(&mock_server)
            .await;

        let url = format!("{}/bosai/common/const/area.json", mock_server.uri());
        let catalog = AreaCatalog::load(&AreaSource::Url(url)).await?;
        assert_eq!(catalog.class10s().count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_from_url_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/area.json", mock_server.uri());
        let result = AreaCatalog::load(&AreaSource::Url(url)).await;
        assert!(matches!(result, Err(AppError::DataUnavailable(_))));
    }
}
