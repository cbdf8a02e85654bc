use std::collections::HashMap;

use crate::data::GeoSample;

/// Representative coordinate of a zip-code prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Collapses raw samples to the unweighted mean coordinate per zip prefix.
///
/// Samples missing the prefix or either coordinate are skipped. Prefixes
/// without a usable sample are absent from the result.
pub fn mean_coordinates(samples: &[GeoSample]) -> HashMap<u32, Coordinate> {
    let mut sums: HashMap<u32, (f64, f64, usize)> = HashMap::new();

    for s in samples {
        let (Some(prefix), Some(lat), Some(lng)) = (
            s.geolocation_zip_code_prefix,
            s.geolocation_lat,
            s.geolocation_lng,
        ) else {
            continue;
        };

        let entry = sums.entry(prefix).or_default();
        entry.0 += lat;
        entry.1 += lng;
        entry.2 += 1;
    }

    sums.into_iter()
        .map(|(prefix, (lat, lng, n))| {
            (
                prefix,
                Coordinate {
                    lat: lat / n as f64,
                    lng: lng / n as f64,
                },
            )
        })
        .collect()
}
