//! Weather summary display rule

use tracing::debug;

/// Shown when the backend sent no weather at all
pub const WEATHER_UNAVAILABLE: &str = "Unavailable";

/// Reduce the backend weather string to what the badge shows
///
/// The backend sends `"<condition>, <temperature>"` on success and a plain
/// message ("Weather service error.") otherwise. With a comma, the second
/// field is shown; without one, the string is shown as-is.
pub fn display_weather(weather: Option<&str>) -> String {
    debug!(?weather, "display_weather: called");
    match weather {
        None | Some("") => WEATHER_UNAVAILABLE.to_string(),
        Some(raw) if raw.contains(',') => raw.split(',').nth(1).unwrap_or_default().trim().to_string(),
        Some(raw) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_and_temperature() {
        assert_eq!(display_weather(Some("Clouds,28°C")), "28°C");
        assert_eq!(display_weather(Some("Light rain, 26.4°C")), "26.4°C");
    }

    #[test]
    fn test_no_comma_is_verbatim() {
        assert_eq!(display_weather(Some("RainError")), "RainError");
        assert_eq!(
            display_weather(Some("Forecast unavailable for date.")),
            "Forecast unavailable for date."
        );
    }

    #[test]
    fn test_missing_weather() {
        assert_eq!(display_weather(None), "Unavailable");
        assert_eq!(display_weather(Some("")), "Unavailable");
    }

    #[test]
    fn test_only_second_field_is_taken() {
        assert_eq!(display_weather(Some("Clear,31°C,humid")), "31°C");
        assert_eq!(display_weather(Some("Clear,")), "");
    }
}
