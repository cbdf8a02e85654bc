/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
///
/// NaN in any input yields NaN. Out-of-range degrees are not rejected.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Elementwise [`haversine_distance`] over parallel coordinate columns.
///
/// A row with any missing coordinate produces a missing distance. The output
/// has the length of the shortest input.
pub fn haversine_distances(
    lat1: &[Option<f64>],
    lon1: &[Option<f64>],
    lat2: &[Option<f64>],
    lon2: &[Option<f64>],
) -> Vec<Option<f64>> {
    lat1.iter()
        .zip(lon1)
        .zip(lat2)
        .zip(lon2)
        .map(|(((&a, &b), &c), &d)| Some(haversine_distance(a?, b?, c?, d?)))
        .collect()
}
