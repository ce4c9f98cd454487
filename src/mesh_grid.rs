//! JIS X0410 mesh as a map grid.
//!
//! Map codes are world mesh codes with the leading `"20"` removed: area code 2
//! (north-east, |lng| >= 100) and a zero hundreds digit, which holds for the
//! whole of Japan. `"5339"` is the 80km cell around Tokyo, `"533946"` a 10km
//! cell inside it, `"53394611"` a 1km cell.

use crate::errors::{GridError, Result};
use crate::meshcode::{MeshLevel, WorldMesh};
use crate::scheme::{push_layer, suffix, truncate, SpatialScheme};
use crate::types::{BoundingBox, CellLabels, LatLong};
use tracing::debug;

pub const MESH_MIN_LATITUDE: f64 = 0.0;
pub const MESH_MAX_LATITUDE: f64 = 66.66;
pub const MESH_MIN_LONGITUDE: f64 = 100.0;
pub const MESH_MAX_LONGITUDE: f64 = 180.0;

const CODE_PREFIX: &str = "20";

/// Half-width, in 80km cells, of the block drawn around the viewport.
const NEIGHBOURHOOD_RADIUS: i64 = 5;

// 80km latitude rows and longitude columns available without the "20" prefix
const MAX_ROW: i64 = 99;
const MAX_COLUMN: i64 = 79;

/// Whether a position can be expressed as a map code.
pub fn in_mesh_domain(position: &LatLong) -> bool {
    (MESH_MIN_LATITUDE..MESH_MAX_LATITUDE).contains(&position.latitude)
        && (MESH_MIN_LONGITUDE..MESH_MAX_LONGITUDE).contains(&position.longitude)
}

pub struct MeshAdapter;

impl MeshAdapter {
    /// Mesh level encoded at a map zoom: 80km below 10, 10km below 14, else 1km.
    pub fn level_for_zoom(zoom: usize) -> MeshLevel {
        if zoom < 10 {
            MeshLevel::Primary
        } else if zoom < 14 {
            MeshLevel::Secondary
        } else {
            MeshLevel::Standard
        }
    }

    pub fn to_world_code(code: &str) -> String {
        format!("{}{}", CODE_PREFIX, code)
    }

    /// Up to 10x10 80km cells around `center`, columns outermost.
    fn neighbourhood(center: &LatLong) -> Vec<String> {
        if !in_mesh_domain(center) {
            debug!(
                "Viewport center ({}, {}) outside the mesh domain",
                center.latitude, center.longitude
            );
            return Vec::new();
        }
        let Some((row, column)) = Self::primary_cell(center) else {
            return Vec::new();
        };

        let mut codes = Vec::new();
        for u in (column - NEIGHBOURHOOD_RADIUS)..(column + NEIGHBOURHOOD_RADIUS) {
            for p in (row - NEIGHBOURHOOD_RADIUS)..(row + NEIGHBOURHOOD_RADIUS) {
                if (0..=MAX_ROW).contains(&p) && (0..=MAX_COLUMN).contains(&u) {
                    codes.push(format!("{:02}{:02}", p, u));
                }
            }
        }
        codes
    }

    fn primary_cell(center: &LatLong) -> Option<(i64, i64)> {
        let code =
            WorldMesh::lat_long_to_meshcode(center.latitude, center.longitude, MeshLevel::Primary)
                .ok()?;
        let local = code.strip_prefix(CODE_PREFIX)?;
        let row = local.get(..2)?.parse().ok()?;
        let column = local.get(2..4)?.parse().ok()?;
        Some((row, column))
    }

    fn children<I>(prefix: &str, digits: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        digits
            .into_iter()
            .map(|digits| format!("{}{}", prefix, digits))
            .collect()
    }
}

impl SpatialScheme for MeshAdapter {
    fn encode(&self, center: &LatLong, precision: usize) -> Result<String> {
        if !in_mesh_domain(center) {
            return Err(GridError::OutOfDomain {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        let level = Self::level_for_zoom(precision.saturating_sub(1));
        let code = WorldMesh::lat_long_to_meshcode(center.latitude, center.longitude, level)?;
        code.strip_prefix(CODE_PREFIX)
            .map(str::to_string)
            .ok_or(GridError::OutOfDomain {
                latitude: center.latitude,
                longitude: center.longitude,
            })
    }

    fn bbox(&self, code: &str) -> Option<BoundingBox> {
        WorldMesh::meshcode_to_lat_long_grid(&Self::to_world_code(code))
            .ok()
            .map(|rect| rect.to_bounding_box())
    }

    /// Coarse prefixes fall back to the block of 80km cells around the
    /// viewport; finer prefixes expand to 8x8 10km cells, 10x10 1km cells,
    /// and then the four quadrants of each further split.
    fn range(&self, prefix: &str, viewport_center: &LatLong) -> Vec<String> {
        match prefix.len() {
            0..=3 => Self::neighbourhood(viewport_center),
            4 => Self::children(
                prefix,
                (0..8).flat_map(|q| (0..8).map(move |v| format!("{}{}", q, v))),
            ),
            6 => Self::children(
                prefix,
                (0..10).flat_map(|r| (0..10).map(move |w| format!("{}{}", r, w))),
            ),
            8..=10 => Self::children(prefix, (1..=4).map(|d| d.to_string())),
            _ => Vec::new(),
        }
    }

    fn layers(&self, current: &str, zoom: u8) -> Vec<String> {
        let mut layers = Vec::new();
        if zoom >= 6 {
            push_layer(&mut layers, truncate(current, 2));
        }
        if zoom >= 10 {
            push_layer(&mut layers, truncate(current, 4));
        }
        if zoom >= 14 {
            push_layer(&mut layers, truncate(current, 6));
        }
        layers
    }

    fn labels(&self, code: &str) -> CellLabels {
        CellLabels::new(code, suffix(code, 2))
    }

    fn prefix_length(&self, zoom: u8) -> usize {
        match zoom {
            0..=9 => 2,
            10..=13 => 4,
            _ => 6,
        }
    }

    fn range_depends_on_viewport(&self, prefix: &str) -> bool {
        prefix.len() < 4
    }
}
