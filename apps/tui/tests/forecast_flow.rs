use jma_forecast::view::{detail_pane, region_tree, DetailPane};
use jma_forecast::{AppError, AreaCatalog, AreaSource, ForecastClient, ForecastStore};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AREA_DOCUMENT: &str = r#"{
    "centers": {
        "010400": {"name": "関東甲信地方", "enName": "Kanto Koshin", "children": ["130000", "999999", "140000"]}
    },
    "offices": {
        "140000": {"name": "神奈川県", "enName": "Kanagawa", "parent": "010400"},
        "130000": {"name": "東京都", "enName": "Tokyo", "parent": "010400"}
    }
}"#;

fn forecast_body() -> serde_json::Value {
    json!([{
        "publishingOffice": "気象庁",
        "timeSeries": [{
            "timeDefines": [
                "2024-05-01T17:00:00+09:00",
                "2024-05-02T00:00:00+09:00",
                "2024-05-03T00:00:00+09:00"
            ],
            "areas": [{
                "area": {"name": "東京地方", "code": "130010"},
                "weatherCodes": ["100", "300", "999"]
            }]
        }]
    }])
}

async fn load_catalog(dir: &tempfile::TempDir) -> Result<AreaCatalog, Box<dyn std::error::Error>> {
    let area_path = dir.path().join("area.json");
    std::fs::write(&area_path, AREA_DOCUMENT)?;
    Ok(AreaCatalog::load(&AreaSource::File(area_path)).await?)
}

#[tokio::test]
async fn test_select_fetch_render_and_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = load_catalog(&dir).await?;

    let tree = region_tree(&catalog);
    let office_ids: Vec<&str> = tree[0].offices.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(office_ids, vec!["130000", "140000"]);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ForecastClient::new(&mock_server.uri(), None)?;
    let store = ForecastStore::new(format!(
        "sqlite://{}",
        dir.path().join("weather.db").display()
    ));

    let office = &tree[0].offices[0];
    let days = client.fetch(&office.id).await?;
    let pane = detail_pane(&office.id, &office.label, Ok(days.as_slice()));

    let DetailPane::Forecast { title, cards, .. } = pane else {
        return Err("expected a forecast pane".into());
    };
    assert_eq!(title, "東京都 (Tokyo)");
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].date, "Wed, 1 May 2024");
    assert_eq!(cards[1].icon, "🌧️");
    assert!(cards[2].text.contains("999"));

    assert_eq!(store.append(&office.id, &days).await?, 3);

    // a second selection of the same office appends duplicates
    let days = client.fetch(&office.id).await?;
    store.append(&office.id, &days).await?;
    assert_eq!(store.count_rows().await?, 6);
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_shows_error_and_leaves_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ForecastStore::new(format!(
        "sqlite://{}",
        dir.path().join("weather.db").display()
    ));
    assert_eq!(store.count_rows().await?, 0);

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/140000.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ForecastClient::new(&mock_server.uri(), None)?;
    let result = client.fetch("140000").await;
    assert!(matches!(result, Err(AppError::FetchFailed(_))));

    let pane = detail_pane("140000", "神奈川県 (Kanagawa)", result.as_deref());
    assert!(matches!(&pane, DetailPane::Error(message) if message.contains("500")));

    assert_eq!(store.count_rows().await?, 0);
    Ok(())
}
