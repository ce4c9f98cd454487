//! One interface over the grid schemes drawn on the map.

use crate::errors::{GridError, Result};
use crate::geohash_grid::GeohashAdapter;
use crate::mesh_grid::MeshAdapter;
use crate::quadtree::{QuadtreeAdapter, SlippyAdapter};
use crate::types::{BoundingBox, CellLabels, LatLong};
use std::fmt;
use std::str::FromStr;

/// Operations every grid scheme provides to the overlay.
pub trait SpatialScheme {
    /// Code of the cell containing `center`; `precision` is scheme specific
    /// (zoom + 1 for tile schemes, character count for geohash).
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String>;

    /// Rectangle of a code, or `None` when the code names no cell.
    fn bbox(&self, code: &str) -> Option<BoundingBox>;

    /// Codes to draw below `prefix`.
    fn range(&self, prefix: &str, viewport_center: &LatLong) -> Vec<String>;

    /// Prefixes of `current` drawn together at `zoom`, coarsest first.
    fn layers(&self, current: &str, zoom: u8) -> Vec<String>;

    fn labels(&self, code: &str) -> CellLabels;

    /// Length of the code prefix whose change forces a redraw at `zoom`.
    fn prefix_length(&self, zoom: u8) -> usize;

    /// Whether `range(prefix, ..)` varies with the viewport center.
    fn range_depends_on_viewport(&self, _prefix: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    #[default]
    Quadtree,
    Slippy,
    Geohash,
    Mesh,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::Quadtree,
        Scheme::Slippy,
        Scheme::Geohash,
        Scheme::Mesh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Quadtree => "quadtree",
            Scheme::Slippy => "slippy",
            Scheme::Geohash => "geohash",
            Scheme::Mesh => "jisx0410mesh",
        }
    }

    fn adapter(self) -> &'static dyn SpatialScheme {
        match self {
            Scheme::Quadtree => &QuadtreeAdapter,
            Scheme::Slippy => &SlippyAdapter,
            Scheme::Geohash => &GeohashAdapter,
            Scheme::Mesh => &MeshAdapter,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = GridError;

    fn from_str(name: &str) -> Result<Self> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == name)
            .ok_or_else(|| GridError::UnknownScheme(name.to_string()))
    }
}

impl SpatialScheme for Scheme {
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String> {
        self.adapter().encode(center, precision)
    }

    fn bbox(&self, code: &str) -> Option<BoundingBox> {
        self.adapter().bbox(code)
    }

    fn range(&self, prefix: &str, viewport_center: &LatLong) -> Vec<String> {
        self.adapter().range(prefix, viewport_center)
    }

    fn layers(&self, current: &str, zoom: u8) -> Vec<String> {
        self.adapter().layers(current, zoom)
    }

    fn labels(&self, code: &str) -> CellLabels {
        self.adapter().labels(code)
    }

    fn prefix_length(&self, zoom: u8) -> usize {
        self.adapter().prefix_length(zoom)
    }

    fn range_depends_on_viewport(&self, prefix: &str) -> bool {
        self.adapter().range_depends_on_viewport(prefix)
    }
}

pub fn encode_cell(scheme: Scheme, coord: &LatLong, precision: usize) -> Result<String> {
    scheme.encode(coord, precision)
}

pub fn decode_cell_bbox(scheme: Scheme, code: &str) -> Result<BoundingBox> {
    scheme
        .bbox(code)
        .ok_or_else(|| GridError::invalid_code(code))
}

pub fn enumerate_children(scheme: Scheme, prefix: &str, viewport_center: &LatLong) -> Vec<String> {
    scheme.range(prefix, viewport_center)
}

pub fn layer_prefixes(scheme: Scheme, code: &str, zoom: u8) -> Vec<String> {
    scheme.layers(code, zoom)
}

pub fn cell_labels(scheme: Scheme, code: &str) -> CellLabels {
    scheme.labels(code)
}

/// First `length` characters of an ASCII code, or the whole code if shorter.
pub(crate) fn truncate(code: &str, length: usize) -> &str {
    code.get(..length).unwrap_or(code)
}

/// Last `count` characters of a code.
pub(crate) fn suffix(code: &str, count: usize) -> &str {
    let start = code.len().saturating_sub(count);
    code.get(start..).unwrap_or(code)
}

/// Appends `prefix` unless it is already present, keeping insertion order.
pub(crate) fn push_layer(layers: &mut Vec<String>, prefix: &str) {
    if !layers.iter().any(|layer| layer == prefix) {
        layers.push(prefix.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.name().parse::<Scheme>().unwrap(), scheme);
            assert_eq!(scheme.to_string(), scheme.name());
        }
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            "h3".parse::<Scheme>(),
            Err(GridError::UnknownScheme("h3".to_string()))
        );
    }

    #[test]
    fn test_truncate_and_suffix() {
        assert_eq!(truncate("0123", 2), "01");
        assert_eq!(truncate("0123", 9), "0123");
        assert_eq!(truncate("", 3), "");
        assert_eq!(suffix("533946", 2), "46");
        assert_eq!(suffix("5", 2), "5");
        assert_eq!(suffix("", 1), "");
    }

    #[test]
    fn test_push_layer_deduplicates() {
        let mut layers = Vec::new();
        push_layer(&mut layers, "0");
        push_layer(&mut layers, "01");
        push_layer(&mut layers, "0");
        assert_eq!(layers, vec!["0", "01"]);
    }

    #[test]
    fn test_decode_cell_bbox_reports_invalid_codes() {
        assert!(matches!(
            decode_cell_bbox(Scheme::Quadtree, "0124"),
            Err(GridError::InvalidCode(_))
        ));
        assert!(decode_cell_bbox(Scheme::Mesh, "53").is_err());
        assert!(decode_cell_bbox(Scheme::Geohash, "xn7a").is_err());
        assert!(decode_cell_bbox(Scheme::Slippy, "0123").is_ok());
    }
}
