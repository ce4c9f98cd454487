//! Redraw driver for a grid overlay.
//!
//! The map widget owns an [`OverlayContext`] and calls
//! [`OverlayContext::update`] after every pan or zoom. The context remembers
//! the active scheme and the code prefix last drawn, and only produces cells
//! when that prefix changes. It takes `&mut self` throughout, so sharing it
//! between threads means wrapping it in a `Mutex`.

use crate::config::OverlayConfig;
use crate::errors::{GridError, Result};
use crate::layer_cache::LayerCache;
use crate::scheme::{truncate, Scheme, SpatialScheme};
use crate::types::{BoundingBox, CellLabels, LatLong};
use tracing::{debug, info, warn};

/// A rectangle to draw, with its labels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCell {
    pub code: String,
    pub bbox: BoundingBox,
    pub labels: CellLabels,
}

pub struct OverlayContext {
    scheme: Scheme,
    previous_prefix: Option<String>,
    cache: LayerCache,
}

impl OverlayContext {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            scheme: config.default_scheme,
            previous_prefix: None,
            cache: LayerCache::new(config.layer_cache_capacity),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Switches scheme by name; unknown names select the quadtree.
    pub fn select_scheme(&mut self, name: &str) -> Scheme {
        let scheme = name.parse().unwrap_or_else(|e: GridError| {
            warn!("{}, falling back to {}", e, Scheme::Quadtree);
            Scheme::Quadtree
        });
        self.set_scheme(scheme);
        scheme
    }

    pub fn set_scheme(&mut self, scheme: Scheme) {
        info!("Overlay scheme: {} -> {}", self.scheme, scheme);
        self.scheme = scheme;
        self.invalidate();
    }

    /// Forces the next [`update`](Self::update) to redraw.
    pub fn invalidate(&mut self) {
        self.previous_prefix = None;
    }

    pub fn layer_cache(&self) -> &LayerCache {
        &self.cache
    }

    /// Code of the cell under `center` at `zoom` in the active scheme.
    pub fn current_code(&self, center: &LatLong, zoom: u8) -> Result<String> {
        self.scheme.encode(center, zoom as usize + 1)
    }

    /// Cells to draw for the viewport, or `None` when the drawn grid is
    /// still current.
    ///
    /// A center the scheme cannot encode (mesh outside its domain) clears the
    /// overlay: the result is an empty list.
    pub fn update(&mut self, center: &LatLong, zoom: u8) -> Result<Option<Vec<OverlayCell>>> {
        let current = match self.current_code(center, zoom) {
            Ok(code) => code,
            Err(GridError::OutOfDomain {
                latitude,
                longitude,
            }) => {
                debug!(
                    "({}, {}) outside the {} domain, clearing overlay",
                    latitude, longitude, self.scheme
                );
                self.previous_prefix = None;
                return Ok(Some(Vec::new()));
            }
            Err(e) => return Err(e),
        };

        let prefix = truncate(&current, self.scheme.prefix_length(zoom));
        if self.previous_prefix.as_deref() == Some(prefix) {
            return Ok(None);
        }

        let mut cells = Vec::new();
        for layer in self.scheme.layers(&current, zoom) {
            cells.extend(self.layer_cells(&layer, center));
        }
        debug!(
            "Redrawing {} overlay at zoom {}: prefix '{}', {} cells",
            self.scheme,
            zoom,
            prefix,
            cells.len()
        );

        self.previous_prefix = Some(prefix.to_string());
        Ok(Some(cells))
    }

    fn layer_cells(&mut self, prefix: &str, viewport_center: &LatLong) -> Vec<OverlayCell> {
        let scheme = self.scheme;
        let build = || {
            scheme
                .range(prefix, viewport_center)
                .into_iter()
                .filter_map(|code| {
                    let bbox = scheme.bbox(&code)?;
                    let labels = scheme.labels(&code);
                    Some(OverlayCell { code, bbox, labels })
                })
                .collect()
        };

        if scheme.range_depends_on_viewport(prefix) {
            build()
        } else {
            self.cache.get_or_insert_with(scheme, prefix, build)
        }
    }
}

impl Default for OverlayContext {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
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
    fn test_first_update_draws() {
        let mut overlay = OverlayContext::default();
        let cells = overlay.update(&TOKYO, 0).unwrap().unwrap();
        let codes: Vec<_> = cells.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_unchanged_prefix_skips_redraw() {
        let mut overlay = OverlayContext::default();
        assert!(overlay.update(&TOKYO, 8).unwrap().is_some());
        let nearby = LatLong::new(35.6812, 139.7671);
        assert!(overlay.update(&nearby, 8).unwrap().is_none());
    }

    #[test]
    fn test_switching_scheme_forces_redraw() {
        let mut overlay = OverlayContext::default();
        overlay.update(&TOKYO, 8).unwrap();
        assert_eq!(overlay.select_scheme("quadtree"), Scheme::Quadtree);
        assert!(overlay.update(&TOKYO, 8).unwrap().is_some());
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_quadtree() {
        let mut overlay =
            OverlayContext::new(OverlayConfig::default().with_scheme(Scheme::Geohash));
        assert_eq!(overlay.select_scheme("s2"), Scheme::Quadtree);
        assert_eq!(overlay.scheme(), Scheme::Quadtree);
    }

    #[test]
    fn test_mesh_outside_domain_clears() {
        let mut overlay = OverlayContext::new(OverlayConfig::default().with_scheme(Scheme::Mesh));
        let london = LatLong::new(51.5074, -0.1278);
        assert_eq!(overlay.update(&london, 12).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_invalid_center_is_an_error() {
        let mut overlay = OverlayContext::default();
        let center = LatLong::new(f64::NAN, 0.0);
        assert!(overlay.update(&center, 3).is_err());
    }

    #[test]
    fn test_viewport_independent_layers_are_cached() {
        let mut overlay = OverlayContext::default();
        overlay.update(&TOKYO, 4).unwrap();
        let misses = overlay.layer_cache().misses();
        overlay.invalidate();
        overlay.update(&TOKYO, 4).unwrap();
        assert_eq!(overlay.layer_cache().misses(), misses);
        assert!(overlay.layer_cache().hits() >= 3);
    }
}
