use jma_forecast::config::AppConfig;
use jma_forecast::{AppError, AreaCatalog, ForecastClient, ForecastDay, ForecastStore};

/// Side-effecting operations the UI triggers: catalog load, fetch and store.
#[derive(Debug)]
pub struct AppActions {
    pub config: AppConfig,
    client: ForecastClient,
    store: Option<ForecastStore>,
}

impl AppActions {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let client = ForecastClient::new(&config.forecast_base_url, config.forecast_timeout)?;
        let store = config
            .store_enabled
            .then(|| ForecastStore::new(config.database_url.clone()));

        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub async fn load_catalog(&self) -> Result<AreaCatalog, AppError> {
        AreaCatalog::load(&self.config.area_source).await
    }

    pub async fn fetch_forecast(&self, office_code: &str) -> Result<Vec<ForecastDay>, AppError> {
        self.client.fetch(office_code).await
    }

    /// Appends the days to the store; `None` when storing is disabled.
    pub async fn store_forecast(
        &self,
        office_code: &str,
        days: &[ForecastDay],
    ) -> Result<Option<u64>, AppError> {
        match &self.store {
            Some(store) => store.append(office_code, days).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn count_stored_rows(&self) -> Result<Option<i64>, AppError> {
        match &self.store {
            Some(store) => store.count_rows().await.map(Some),
            None => Ok(None),
        }
    }
}
