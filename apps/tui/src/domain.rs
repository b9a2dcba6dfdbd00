use chrono::NaiveDate;
use std::borrow::Cow;

use crate::weather_codes::{icon_of, text_of};

/// One date / weather code pair taken from a forecast response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weather_code: String,
}

impl ForecastDay {
    pub fn new(date: NaiveDate, weather_code: impl Into<String>) -> Self {
        Self {
            date,
            weather_code: weather_code.into(),
        }
    }

    /// Long form used on forecast cards, e.g. `Wed, 1 May 2024`.
    pub fn display_date(&self) -> String {
        self.date.format("%a, %-d %b %Y").to_string()
    }

    /// ISO form written to the store, e.g. `2024-05-01`.
    pub fn stored_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn icon(&self) -> &'static str {
        icon_of(&self.weather_code)
    }

    pub fn text(&self) -> Cow<'static, str> {
        text_of(&self.weather_code)
    }
}
