use crate::errors::{GridError, Result};
use crate::mercator::MAX_ZOOM;
use crate::scheme::{push_layer, suffix, truncate, SpatialScheme};
use crate::tile::Tile;
use crate::types::{BoundingBox, CellLabels, LatLong};

const QUADKEY_DIGITS: [char; 4] = ['0', '1', '2', '3'];

/// Web-Mercator tiles addressed by quadkey.
pub struct QuadtreeAdapter;

impl SpatialScheme for QuadtreeAdapter {
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String> {
        if !center.is_valid() {
            return Err(GridError::InvalidCoordinate {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        let zoom = precision.saturating_sub(1).min(MAX_ZOOM as usize) as u8;
        Ok(Tile::from_lat_long(center.latitude, center.longitude, zoom).to_quadkey())
    }

    fn bbox(&self, code: &str) -> Option<BoundingBox> {
        Tile::from_quadkey(code)
            .ok()
            .map(|tile| tile.get_bounding_box())
    }

    fn range(&self, prefix: &str, _viewport_center: &LatLong) -> Vec<String> {
        QUADKEY_DIGITS
            .iter()
            .map(|digit| format!("{}{}", prefix, digit))
            .collect()
    }

    fn layers(&self, current: &str, zoom: u8) -> Vec<String> {
        let zoom = zoom as usize;
        let mut layers = Vec::with_capacity(3);
        if zoom > 2 {
            push_layer(&mut layers, truncate(current, zoom - 2));
        }
        if zoom > 1 {
            push_layer(&mut layers, truncate(current, zoom - 1));
        }
        push_layer(&mut layers, truncate(current, zoom));
        layers
    }

    fn labels(&self, code: &str) -> CellLabels {
        CellLabels::new(code, suffix(code, 1))
    }

    fn prefix_length(&self, zoom: u8) -> usize {
        zoom as usize + 1
    }
}

/// Same tiles as the quadtree, labelled with their `z/x/y` path.
pub struct SlippyAdapter;

impl SpatialScheme for SlippyAdapter {
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String> {
        QuadtreeAdapter.encode(center, precision)
    }

    fn bbox(&self, code: &str) -> Option<BoundingBox> {
        QuadtreeAdapter.bbox(code)
    }

    fn range(&self, prefix: &str, viewport_center: &LatLong) -> Vec<String> {
        QuadtreeAdapter.range(prefix, viewport_center)
    }

    fn layers(&self, current: &str, zoom: u8) -> Vec<String> {
        QuadtreeAdapter.layers(current, zoom)
    }

    fn labels(&self, code: &str) -> CellLabels {
        let long = Tile::from_quadkey(code)
            .map(|tile| tile.path())
            .unwrap_or_else(|_| code.to_string());
        CellLabels::new(long, "")
    }

    fn prefix_length(&self, zoom: u8) -> usize {
        QuadtreeAdapter.prefix_length(zoom)
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
    fn test_encode_uses_precision_minus_one_as_zoom() {
        assert_eq!(QuadtreeAdapter.encode(&TOKYO, 1).unwrap(), "");
        assert_eq!(QuadtreeAdapter.encode(&TOKYO, 0).unwrap(), "");
        let code = QuadtreeAdapter.encode(&TOKYO, 13).unwrap();
        assert_eq!(code.len(), 12);
        assert_eq!(code, Tile::from_lat_long(35.681, 139.767, 12).to_quadkey());
    }

    #[test]
    fn test_encode_rejects_invalid_center() {
        let center = LatLong::new(f64::NAN, 0.0);
        assert!(QuadtreeAdapter.encode(&center, 5).is_err());
    }

    #[test]
    fn test_encoded_cell_contains_center() {
        for precision in 1..=19 {
            let code = QuadtreeAdapter.encode(&TOKYO, precision).unwrap();
            let bbox = QuadtreeAdapter.bbox(&code).unwrap();
            assert!(bbox.contains(TOKYO.latitude, TOKYO.longitude), "{}", code);
        }
    }

    #[test]
    fn test_range_has_four_children() {
        let children = QuadtreeAdapter.range("13", &TOKYO);
        assert_eq!(children, vec!["130", "131", "132", "133"]);
        assert_eq!(QuadtreeAdapter.range("", &TOKYO), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_layers_by_zoom() {
        let current = "1330021123";
        assert_eq!(QuadtreeAdapter.layers(current, 0), vec![""]);
        assert_eq!(QuadtreeAdapter.layers(current, 1), vec!["1"]);
        assert_eq!(QuadtreeAdapter.layers(current, 2), vec!["1", "13"]);
        assert_eq!(
            QuadtreeAdapter.layers(current, 5),
            vec!["133", "1330", "13300"]
        );
    }

    #[test]
    fn test_layers_with_short_code_collapse() {
        assert_eq!(QuadtreeAdapter.layers("13", 6), vec!["13"]);
    }

    #[test]
    fn test_labels() {
        let labels = QuadtreeAdapter.labels("213");
        assert_eq!(labels, CellLabels::new("213", "3"));

        let labels = SlippyAdapter.labels("213");
        assert_eq!(labels, CellLabels::new("3/3/5", ""));
    }

    #[test]
    fn test_invalid_quadkey_has_no_bbox() {
        assert!(QuadtreeAdapter.bbox("0x").is_none());
        assert!(SlippyAdapter.bbox("4").is_none());
    }
}
