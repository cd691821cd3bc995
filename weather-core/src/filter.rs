use tracing::{debug, info};

use crate::{
    geo::{distance_km, round_to},
    model::{CitySummary, Coordinate, NearbyCity},
};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Keep the cities lying within `radius_km` of `origin`, in input order.
///
/// Distances are rounded to 3 decimals before the comparison, so the boundary
/// is inclusive at that precision. Cities without a usable location are
/// dropped. Survivors lose their coordinate.
pub fn filter_within_radius(
    cities: Vec<CitySummary>,
    origin: Coordinate,
    radius_km: f64,
) -> Vec<NearbyCity> {
    cities
        .into_iter()
        .filter_map(|city| {
            let Some(coord) = city.coord.filter(Coordinate::is_valid) else {
                debug!(id = city.id, name = %city.name, "skipping city without a valid location");
                return None;
            };

            let dist = round_to(
                distance_km(origin.latitude, origin.longitude, coord.latitude, coord.longitude),
                3,
            );

            if dist <= radius_km {
                info!("Distance to {} = {} km", city.name, dist);
                Some(NearbyCity::from(city))
            } else {
                None
            }
        })
        .collect()
}
