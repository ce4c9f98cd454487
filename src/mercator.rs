pub struct MercatorProjection;

pub const TILE_SIZE: i64 = 256;
pub const MAX_ZOOM: u8 = 30;

const PI: f64 = std::f64::consts::PI;

impl MercatorProjection {
    /// `floor((lng + 180) / 360 * 2^z)`, clamped to the tile grid.
    pub fn longitude_to_tile_x(longitude: f64, zoom_level: u8) -> i64 {
        let n = Self::tile_count(zoom_level);
        let tile_x = ((longitude + 180.0) / 360.0 * n as f64).floor();
        Self::clamp_index(tile_x, n)
    }

    /// `floor((1 - ln(tan φ + sec φ) / π) / 2 * 2^z)`, clamped to the tile grid.
    ///
    /// Latitudes at or beyond the poles have no tile; they land on the
    /// first or last row.
    pub fn latitude_to_tile_y(latitude: f64, zoom_level: u8) -> i64 {
        let n = Self::tile_count(zoom_level);
        let lat_rad = latitude.to_radians();
        let merc = (lat_rad.tan() + 1.0 / lat_rad.cos()).ln();
        let tile_y = ((1.0 - merc / PI) / 2.0 * n as f64).floor();
        Self::clamp_index(tile_y, n)
    }

    /// Unprojects a global pixel position at `zoom_level` (256 px tiles).
    pub fn pixel_to_lat_long(pixel_x: f64, pixel_y: f64, zoom_level: u8) -> (f64, f64) {
        let map_size = Self::get_map_size(zoom_level) as f64;
        let longitude = pixel_x / map_size * 360.0 - 180.0;
        let y = 0.5 - pixel_y / map_size;
        let latitude = 90.0 - 360.0 * ((-y * (2.0 * PI)).exp().atan()) / PI;
        (latitude, longitude)
    }

    pub fn get_map_size(zoom_level: u8) -> i64 {
        TILE_SIZE << zoom_level.min(MAX_ZOOM)
    }

    pub fn tile_count(zoom_level: u8) -> i64 {
        1i64 << zoom_level.min(MAX_ZOOM)
    }

    // NaN casts to 0 and infinities saturate before the clamp
    fn clamp_index(value: f64, n: i64) -> i64 {
        (value as i64).clamp(0, n - 1)
    }
}
