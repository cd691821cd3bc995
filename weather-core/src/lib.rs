//! Core library for the city weather facade.
//!
//! This crate defines:
//! - The facade's data model and its reshaping from OpenWeather documents
//! - Great-circle distance and the proximity filter built on it
//! - The upstream client abstraction and the request pipeline over it
//! - Configuration & credentials handling
//!
//! It is used by `weather-server`, but has no dependency on any HTTP server.

pub mod config;
pub mod error;
pub mod facade;
pub mod filter;
pub mod geo;
pub mod model;
pub mod shape;
pub mod upstream;

pub use config::{Config, SearchConfig, ServerConfig, UpstreamConfig};
pub use error::FacadeError;
pub use facade::{Facade, Operation};
pub use filter::filter_within_radius;
pub use geo::distance_km;
pub use model::{CityDetail, CitySummary, Coordinate, NearbyCity, Shaped, WeatherReport};
pub use upstream::{OpenWeatherClient, Upstream, upstream_from_config};
