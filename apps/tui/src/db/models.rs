
use crate::domain::ForecastDay;

/// A forecast row as stored in `weather_data`; only tests read rows back.
#[cfg(test)]
#[derive(Debug, sqlx::FromRow, Clone, PartialEq, Eq)]
pub struct StoredForecastRow {
    pub id: i64,
    pub office_code: String,
    pub date: String,
    pub weather_code: String,
    pub weather_icon: String,
    pub weather_text: String,
}

/// Parameters for inserting one decorated forecast day
#[derive(Debug, Clone)]
pub struct ForecastRowParams {
    pub office_code: String,
    pub date: String,
    pub weather_code: String,
    pub weather_icon: String,
    pub weather_text: String,
}

impl ForecastRowParams {
    /// Copies a forecast day and adds its icon and label.
    pub fn decorate(office_code: &str, day: &ForecastDay) -> Self {
        Self {
            office_code: office_code.to_string(),
            date: day.stored_date(),
            weather_code: day.weather_code.clone(),
            weather_icon: day.icon().to_string(),
            weather_text: day.text().into_owned(),
        }
    }
}
