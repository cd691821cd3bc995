//! Reshaping of OpenWeather documents into the facade schema.
//!
//! Every shaper returns `None` when the document lacks something it needs;
//! callers turn that into a not-found response.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{
    geo::round_to,
    model::{CityDetail, CitySummary, Coordinate, WeatherReport},
};

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

impl From<OwCoord> for Coordinate {
    fn from(c: OwCoord) -> Self {
        Coordinate::new(c.lat, c.lon)
    }
}

#[derive(Debug, Deserialize)]
struct OwListEntry {
    id: i64,
    name: String,
    #[serde(default)]
    coord: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    list: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct OwCityDoc {
    id: i64,
    name: String,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: Number,
    humidity: Number,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: Number,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeatherDoc {
    weather: Vec<OwCondition>,
    sys: OwSys,
    main: OwMain,
    clouds: OwClouds,
    wind: OwWind,
}

/// Project a "find" response onto `{id, name, coord}` per city.
///
/// Entries without an id or name are skipped; an entry whose coordinate is
/// missing or malformed is kept with `coord: None`.
pub fn shape_city_list(doc: &Value) -> Option<Vec<CitySummary>> {
    let parsed = OwFindResponse::deserialize(doc).ok()?;

    let cities = parsed
        .list
        .iter()
        .filter_map(|entry| OwListEntry::deserialize(entry).ok())
        .map(|entry| CitySummary {
            id: entry.id,
            name: entry.name,
            coord: entry
                .coord
                .and_then(|c| OwCoord::deserialize(&c).ok())
                .map(Coordinate::from),
        })
        .collect();

    Some(cities)
}

pub fn shape_city_detail(doc: &Value) -> Option<CityDetail> {
    let city = OwCityDoc::deserialize(doc).ok()?;

    Some(CityDetail {
        id: city.id,
        name: city.name,
        lat: city.coord.lat,
        lng: city.coord.lon,
    })
}

pub fn shape_city_weather(doc: &Value) -> Option<WeatherReport> {
    let parsed = OwWeatherDoc::deserialize(doc).ok()?;
    let condition = parsed.weather.into_iter().next()?;

    Some(WeatherReport {
        kind: condition.main,
        type_description: condition.description,
        sunrise: unix_to_utc(parsed.sys.sunrise)?,
        sunset: unix_to_utc(parsed.sys.sunset)?,
        temp: kelvin_to_celsius(parsed.main.temp),
        temp_min: kelvin_to_celsius(parsed.main.temp_min),
        temp_max: kelvin_to_celsius(parsed.main.temp_max),
        pressure: parsed.main.pressure,
        humidity: parsed.main.humidity,
        clouds_percent: parsed.clouds.all,
        wind_speed: parsed.wind.speed,
    })
}

/// Kelvin to Celsius, rounded to 2 decimals.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    round_to(kelvin - 273.15, 2)
}

fn unix_to_utc(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(secs.checked_mul(1000)?)
}
