mod config;
mod errors;
mod geohash_grid;
mod layer_cache;
mod mercator;
mod mesh_grid;
pub mod meshcode;
mod overlay;
mod quadtree;
mod scheme;
mod tile;
mod types;
mod vincenty;

// Create a single, consistent public API
pub use config::{OverlayConfig, DEFAULT_LAYER_CACHE_CAPACITY};
pub use errors::{GridError, Result};
pub use geohash_grid::{GeohashAdapter, BASE32_ALPHABET, MAX_PRECISION};
pub use layer_cache::LayerCache;
pub use mercator::{MercatorProjection, MAX_ZOOM, TILE_SIZE};
pub use mesh_grid::{
    in_mesh_domain, MeshAdapter, MESH_MAX_LATITUDE, MESH_MAX_LONGITUDE, MESH_MIN_LATITUDE,
    MESH_MIN_LONGITUDE,
};
pub use meshcode::{mesh_area_from_code, MeshLevel, WorldMesh};
pub use overlay::{OverlayCell, OverlayContext};
pub use quadtree::{QuadtreeAdapter, SlippyAdapter};
pub use scheme::{
    cell_labels, decode_cell_bbox, encode_cell, enumerate_children, layer_prefixes, Scheme,
    SpatialScheme,
};
pub use tile::Tile;
pub use types::{BoundingBox, CellLabels, EllipsoidRect, LatLong, MeshArea};
pub use vincenty::{
    vincenty_distance, CONVERGENCE_THRESHOLD, MAX_ITERATIONS, WGS84_A, WGS84_B, WGS84_F,
};
