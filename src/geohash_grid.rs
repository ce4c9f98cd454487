use crate::errors::{GridError, Result};
use crate::scheme::{push_layer, suffix, truncate, SpatialScheme};
use crate::types::{BoundingBox, CellLabels, LatLong};
use geohash::Coord;
use tracing::debug;

/// Geohash base-32 alphabet, in digit order.
pub const BASE32_ALPHABET: &str = "0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest hash the geohash codec produces.
pub const MAX_PRECISION: usize = 12;

pub struct GeohashAdapter;

impl SpatialScheme for GeohashAdapter {
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String> {
        if !center.is_valid() {
            return Err(GridError::InvalidCoordinate {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        let length = precision.clamp(1, MAX_PRECISION);
        let coord = Coord {
            x: center.longitude,
            y: center.latitude,
        };
        Ok(geohash::encode(coord, length)?)
    }

    fn bbox(&self, code: &str) -> Option<BoundingBox> {
        match geohash::decode_bbox(code) {
            Ok(rect) => {
                let (min, max) = (rect.min(), rect.max());
                Some(BoundingBox {
                    min_latitude: min.y,
                    min_longitude: min.x,
                    max_latitude: max.y,
                    max_longitude: max.x,
                })
            }
            Err(e) => {
                debug!("Skipping geohash '{}': {}", code, e);
                None
            }
        }
    }

    fn range(&self, prefix: &str, _viewport_center: &LatLong) -> Vec<String> {
        BASE32_ALPHABET
            .chars()
            .map(|c| format!("{}{}", prefix, c))
            .collect()
    }

    /// The world grid plus the one or two hash lengths suited to `zoom`.
    fn layers(&self, current: &str, zoom: u8) -> Vec<String> {
        let zoom = zoom as usize;
        let mut layers = vec![String::new()];
        for length in 1..7 {
            if zoom >= length * 3 && zoom < (length + 2) * 3 {
                push_layer(&mut layers, truncate(current, length));
            }
        }
        layers
    }

    fn labels(&self, code: &str) -> CellLabels {
        CellLabels::new(code, suffix(code, 1))
    }

    fn prefix_length(&self, zoom: u8) -> usize {
        1 + zoom as usize / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO: LatLong = LatLong {
        latitude: 35.681,
        longitude: 139.767,
    };

    #[test]
    fn test_encode_tokyo() {
        let code = GeohashAdapter.encode(&TOKYO, 5).unwrap();
        assert_eq!(code, "xn76u");
    }

    #[test]
    fn test_precision_is_clamped() {
        assert_eq!(GeohashAdapter.encode(&TOKYO, 0).unwrap().len(), 1);
        assert_eq!(
            GeohashAdapter.encode(&TOKYO, 40).unwrap().len(),
            MAX_PRECISION
        );
    }

    #[test]
    fn test_encoded_cell_contains_center() {
        for precision in 1..=MAX_PRECISION {
            let code = GeohashAdapter.encode(&TOKYO, precision).unwrap();
            let bbox = GeohashAdapter.bbox(&code).unwrap();
            assert!(bbox.contains(TOKYO.latitude, TOKYO.longitude), "{}", code);
        }
    }

    #[test]
    fn test_range_uses_base32_order() {
        let children = GeohashAdapter.range("xn", &TOKYO);
        assert_eq!(children.len(), 32);
        assert_eq!(children[0], "xn0");
        assert_eq!(children[10], "xnb");
        assert_eq!(children[31], "xnz");
        assert!(children.iter().all(|c| GeohashAdapter.bbox(c).is_some()));
    }

    #[test]
    fn test_layers_by_zoom() {
        let current = "xn76urx6";
        assert_eq!(GeohashAdapter.layers(current, 0), vec![""]);
        assert_eq!(GeohashAdapter.layers(current, 3), vec!["", "x"]);
        assert_eq!(GeohashAdapter.layers(current, 6), vec!["", "x", "xn"]);
        assert_eq!(GeohashAdapter.layers(current, 9), vec!["", "xn", "xn7"]);
        assert_eq!(
            GeohashAdapter.layers(current, 20),
            vec!["", "xn76u", "xn76ur"]
        );
    }

    #[test]
    fn test_invalid_hash_has_no_bbox() {
        assert!(GeohashAdapter.bbox("xnai").is_none());
    }

    #[test]
    fn test_prefix_length() {
        assert_eq!(GeohashAdapter.prefix_length(0), 1);
        assert_eq!(GeohashAdapter.prefix_length(8), 3);
        assert_eq!(GeohashAdapter.prefix_length(9), 4);
    }
}
