use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A point on the globe in decimal degrees.
///
/// Serialized with upstream's short keys (`lat`/`lon`) so an unfiltered city
/// list looks the same as what OpenWeather returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One entry of a "find near" search, before proximity filtering.
///
/// `coord` is `None` when upstream sent no usable location for the city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinate>,
}

/// A city that survived the proximity filter. Carries no location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyCity {
    pub id: i64,
    pub name: String,
}

impl From<CitySummary> for NearbyCity {
    fn from(city: CitySummary) -> Self {
        Self { id: city.id, name: city.name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDetail {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Current conditions for a single city. Temperatures are in °C.
///
/// Pressure, humidity, cloudiness and wind speed are passed through exactly
/// as upstream wrote them, integers included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub type_description: String,
    #[serde(serialize_with = "serialize_millis")]
    pub sunrise: DateTime<Utc>,
    #[serde(serialize_with = "serialize_millis")]
    pub sunset: DateTime<Utc>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: Number,
    pub humidity: Number,
    pub clouds_percent: Number,
    pub wind_speed: Number,
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2017-01-30T07:40:37.000Z`.
fn serialize_millis<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Whatever a facade operation produced, ready to be written as the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Shaped {
    Cities(Vec<CitySummary>),
    NearbyCities(Vec<NearbyCity>),
    City(CityDetail),
    Weather(WeatherReport),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinate_range_check() {
        assert!(Coordinate::new(52.37, 4.89).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn summary_without_coord_omits_the_field() {
        let city = CitySummary { id: 1, name: "Nowhere".into(), coord: None };
        assert_eq!(serde_json::to_value(&city).unwrap(), json!({"id": 1, "name": "Nowhere"}));
    }

    #[test]
    fn weather_report_uses_type_key() {
        let report = WeatherReport {
            kind: "Clear".into(),
            type_description: "clear sky".into(),
            sunrise: DateTime::from_timestamp(0, 0).unwrap(),
            sunset: DateTime::from_timestamp(60, 0).unwrap(),
            temp: 20.0,
            temp_min: 19.0,
            temp_max: 21.0,
            pressure: Number::from(1012),
            humidity: Number::from(40),
            clouds_percent: Number::from(0),
            wind_speed: Number::from_f64(1.5).unwrap(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["type"], "Clear");
        assert!(value.get("kind").is_none());
        assert_eq!(value["sunrise"], "1970-01-01T00:00:00.000Z");
        assert_eq!(value["sunset"], "1970-01-01T00:01:00.000Z");
        assert_eq!(serde_json::to_string(&value["pressure"]).unwrap(), "1012");
        assert_eq!(serde_json::to_string(&value["wind_speed"]).unwrap(), "1.5");
    }
}
