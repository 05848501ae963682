//! Weather widget: city list, forecast parsing and the phrases shown for a
//! temperature and condition code.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub static CITIES: [City; 9] = [
    City { name: "Toronto", latitude: 43.6532, longitude: -79.3832 },
    City { name: "Vancouver", latitude: 49.2827, longitude: -123.1207 },
    City { name: "Montreal", latitude: 45.5019, longitude: -73.5674 },
    City { name: "Calgary", latitude: 51.0447, longitude: -114.0719 },
    City { name: "Edmonton", latitude: 53.5461, longitude: -113.4938 },
    City { name: "Ottawa", latitude: 45.4215, longitude: -75.6972 },
    City { name: "Winnipeg", latitude: 49.8954, longitude: -97.1385 },
    City { name: "Quebec City", latitude: 46.8139, longitude: -71.208 },
    City { name: "Halifax", latitude: 44.6488, longitude: -63.5752 },
];

impl City {
    /// Forecast request for this city's current conditions
    pub fn forecast_url(&self) -> String {
        format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.latitude, self.longitude
        )
    }
}

/// Look a city up by name, ignoring case. Unknown names give the first city.
pub fn find_city(name: &str) -> &'static City {
    let name = name.trim();
    CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
        .unwrap_or(&CITIES[0])
}

pub fn condition_message(code: i32) -> &'static str {
    match code {
        0 => "Clear and sunny",
        1..=2 => "Partly cloudy",
        3 => "Cloudy",
        51..=67 => "Drizzling",
        71..=77 => "Snowing",
        80.. => "Rain showers",
        _ => "Weather conditions unknown",
    }
}

/// Clothing advice for a temperature in °C
pub fn temperature_advice(celsius: f64) -> &'static str {
    if celsius < -10.0 {
        "It's Bone-Cold! Wear Extra Layers"
    } else if celsius < 0.0 {
        "It's freezing! Keep Warm"
    } else if celsius < 10.0 {
        "Pretty Chilly Out there, Bring a Jacket"
    } else if celsius < 20.0 {
        "Mild Weather - Dress Comfy"
    } else if celsius < 30.0 {
        "Warm Day - Stay Hydrated"
    } else {
        "It's HOT! Drink Lots of Water"
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Forecast service unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed forecast response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Current conditions as reported by the forecast service
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    #[serde(rename = "weathercode")]
    pub weather_code: i32,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

impl CurrentWeather {
    /// Read the `current_weather` object out of a forecast response body
    pub fn from_response(body: &str) -> Result<Self, WeatherError> {
        let response: ForecastResponse = serde_json::from_str(body)?;
        Ok(response.current_weather)
    }
}

/// Something that can report the current weather for a city
pub trait ForecastSource {
    fn current_weather(&self, city: &City) -> Result<CurrentWeather, WeatherError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: &'static str,
    pub temperature: f64,
    pub condition: &'static str,
    pub advice: &'static str,
}

impl WeatherReport {
    pub fn new(city: &City, current: CurrentWeather) -> Self {
        Self {
            city: city.name,
            temperature: current.temperature,
            condition: condition_message(current.weather_code),
            advice: temperature_advice(current.temperature),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Loaded(WeatherReport),
    /// Shown inline; fetching again is the retry
    Failed { message: String },
}

pub fn fetch_weather(source: &dyn ForecastSource, city: &City) -> WeatherState {
    match source.current_weather(city) {
        Ok(current) => WeatherState::Loaded(WeatherReport::new(city, current)),
        Err(e) => {
            warn!(city = city.name, error = %e, "weather lookup failed");
            WeatherState::Failed {
                message: format!("Failed to load weather: {e}"),
            }
        }
    }
}
