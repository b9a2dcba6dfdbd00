//! Static lookup of JMA three-digit weather codes.
//!
//! Codes missing from either table fall back to a sentinel; the tables are
//! never loaded or mutated at runtime.

use std::borrow::Cow;

/// Glyph returned for codes that have no icon.
pub const UNKNOWN_ICON: &str = "❓";

/// Emoji glyph for a weather code.
pub fn icon_of(code: &str) -> &'static str {
    match code {
        "100" => "☀️",
        "101" | "201" => "🌤️",
        "102" => "🌦️",
        "110" => "☀️☁️",
        "111" => "🌧️☀️",
        "112" => "🌧️❄️",
        "114" | "211" => "❄️☀️",
        "200" => "☁️",
        "202" | "214" => "☁️🌧️",
        "203" | "218" => "☁️❄️",
        "204" => "☁️❄️⚡️",
        "206" => "🌧️☁️",
        "207" => "☁️🌧️❄️",
        "212" | "270" | "402" => "❄️☁️",
        "300" => "🌧️",
        "302" | "400" => "❄️",
        "313" => "❄️🌧️",
        "314" => "🌧️→❄️",
        "317" => "🌧️❄️☁️",
        "413" => "❄️→🌧️",
        "500" => "⛈️",
        _ => UNKNOWN_ICON,
    }
}

/// Human readable label for a weather code.
pub fn text_of(code: &str) -> Cow<'static, str> {
    known_text(code).map_or_else(
        || Cow::Owned(format!("unknown weather (code: {code})")),
        Cow::Borrowed,
    )
}

fn known_text(code: &str) -> Option<&'static str> {
    let text = match code {
        "100" => "Sunny",
        "101" => "Sunny, occasionally cloudy",
        "102" => "Sunny, occasional rain",
        "110" => "Sunny, later occasionally cloudy",
        "111" => "Sunny, later cloudy",
        "112" => "Sunny, later occasional rain",
        "114" => "Sunny, later rain",
        "200" => "Cloudy",
        "201" => "Cloudy, occasionally sunny",
        "202" => "Cloudy, occasional rain",
        "203" => "Cloudy, sometimes rain",
        "204" => "Cloudy, occasional snow",
        "211" => "Cloudy, later sunny",
        "212" => "Cloudy, later occasional rain",
        "214" => "Cloudy, later rain",
        "300" => "Rain",
        "313" => "Rain, later cloudy",
        "314" => "Rain, later snow",
        "317" => "Rain or snow, later cloudy",
        "400" => "Snow",
        "402" => "Snow, occasionally cloudy",
        "413" => "Snow, later rain",
        "500" => "Thunderstorm",
        _ => return None,
    };
    Some(text)
}
