//! Request orchestration: upstream fetch, shaping and proximity filtering.

use std::sync::Arc;

use serde_json::Value;
use tracing::{instrument, warn};

use crate::{
    config::{Config, SearchConfig},
    error::FacadeError,
    filter::filter_within_radius,
    model::{Coordinate, Shaped},
    shape::{shape_city_detail, shape_city_list, shape_city_weather},
    upstream::Upstream,
};

/// The three operations the facade exposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    CitiesAround { origin: Coordinate },
    CityDetail { id: u64 },
    CityWeather { id: u64 },
}

impl Operation {
    /// Upstream path, relative to the configured base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::CitiesAround { .. } => "find",
            Self::CityDetail { .. } | Self::CityWeather { .. } => "weather",
        }
    }

    pub fn query(&self, find_count: u32) -> Vec<(&'static str, String)> {
        match self {
            Self::CitiesAround { origin } => vec![
                ("lat", origin.latitude.to_string()),
                ("lon", origin.longitude.to_string()),
                ("cnt", find_count.to_string()),
            ],
            Self::CityDetail { id } | Self::CityWeather { id } => vec![("id", id.to_string())],
        }
    }

    fn shape(&self, doc: &Value) -> Result<Shaped, FacadeError> {
        match self {
            Self::CitiesAround { .. } => shape_city_list(doc)
                .map(Shaped::Cities)
                .ok_or(FacadeError::ShapingMiss("list")),
            Self::CityDetail { .. } => shape_city_detail(doc)
                .map(Shaped::City)
                .ok_or(FacadeError::ShapingMiss("id, name or coord")),
            Self::CityWeather { .. } => shape_city_weather(doc)
                .map(Shaped::Weather)
                .ok_or(FacadeError::ShapingMiss("weather, sys, main, clouds or wind")),
        }
    }
}

/// Stateless request pipeline over an injected upstream.
#[derive(Debug, Clone)]
pub struct Facade {
    upstream: Arc<dyn Upstream>,
    search: SearchConfig,
}

impl Facade {
    pub fn new(upstream: Arc<dyn Upstream>, search: SearchConfig) -> Self {
        Self { upstream, search }
    }

    pub fn from_config(upstream: Arc<dyn Upstream>, config: &Config) -> Self {
        Self::new(upstream, config.search.clone())
    }

    /// Run `op` against upstream and shape the result.
    ///
    /// When `origin` is given and the result is a city list, only cities
    /// within the configured radius survive. Single cities are never filtered.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_and_shape(
        &self,
        op: &Operation,
        origin: Option<Coordinate>,
    ) -> Result<Shaped, FacadeError> {
        let result = self.run(op, origin).await;

        if let Err(err) = &result {
            warn!(kind = err.kind(), operation = ?op, "request failed: {err}");
        }

        result
    }

    async fn run(&self, op: &Operation, origin: Option<Coordinate>) -> Result<Shaped, FacadeError> {
        let query = op.query(self.search.find_count);
        let doc = self.upstream.fetch(op.endpoint(), &query).await?;
        let shaped = op.shape(&doc)?;

        Ok(match (shaped, origin) {
            (Shaped::Cities(cities), Some(origin)) => {
                Shaped::NearbyCities(filter_within_radius(cities, origin, self.search.radius_km))
            }
            (shaped, _) => shaped,
        })
    }
}
