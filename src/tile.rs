use crate::errors::{GridError, Result};
use crate::mercator::{MercatorProjection, MAX_ZOOM, TILE_SIZE};
use crate::types::BoundingBox;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub tile_x: i64,
    pub tile_y: i64,
    pub zoom_level: u8,
}

impl Tile {
    pub fn new(tile_x: i64, tile_y: i64, zoom_level: u8) -> Self {
        Self {
            tile_x,
            tile_y,
            zoom_level,
        }
    }

    pub fn from_lat_long(latitude: f64, longitude: f64, zoom_level: u8) -> Self {
        let zoom_level = zoom_level.min(MAX_ZOOM);
        Self {
            tile_x: MercatorProjection::longitude_to_tile_x(longitude, zoom_level),
            tile_y: MercatorProjection::latitude_to_tile_y(latitude, zoom_level),
            zoom_level,
        }
    }

    /// Bing-style quadkey, one digit per zoom level, most significant first.
    pub fn to_quadkey(&self) -> String {
        let mut quadkey = String::with_capacity(self.zoom_level as usize);
        for i in (1..=self.zoom_level).rev() {
            let mask = 1i64 << (i - 1);
            let mut digit = b'0';
            if self.tile_x & mask != 0 {
                digit += 1;
            }
            if self.tile_y & mask != 0 {
                digit += 2;
            }
            quadkey.push(digit as char);
        }
        quadkey
    }

    pub fn from_quadkey(quadkey: &str) -> Result<Self> {
        if quadkey.len() > MAX_ZOOM as usize {
            return Err(GridError::invalid_code(quadkey));
        }
        let mut tile = Tile::new(0, 0, 0);
        for c in quadkey.chars() {
            tile.tile_x *= 2;
            tile.tile_y *= 2;
            tile.zoom_level += 1;
            match c {
                '0' => {}
                '1' => tile.tile_x += 1,
                '2' => tile.tile_y += 1,
                '3' => {
                    tile.tile_x += 1;
                    tile.tile_y += 1;
                }
                _ => return Err(GridError::invalid_code(quadkey)),
            }
        }
        Ok(tile)
    }

    /// Unprojects the north-west and south-east pixel corners of the tile.
    pub fn get_bounding_box(&self) -> BoundingBox {
        let nw_x = (self.tile_x * TILE_SIZE) as f64;
        let nw_y = (self.tile_y * TILE_SIZE) as f64;
        let size = TILE_SIZE as f64;

        let (max_latitude, min_longitude) =
            MercatorProjection::pixel_to_lat_long(nw_x, nw_y, self.zoom_level);
        let (min_latitude, max_longitude) =
            MercatorProjection::pixel_to_lat_long(nw_x + size, nw_y + size, self.zoom_level);

        BoundingBox {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        }
    }

    pub fn parent(&self) -> Option<Tile> {
        if self.zoom_level == 0 {
            return None;
        }
        Some(Tile::new(
            self.tile_x >> 1,
            self.tile_y >> 1,
            self.zoom_level - 1,
        ))
    }

    /// Children in quadkey digit order (0, 1, 2, 3).
    pub fn children(&self) -> Vec<Tile> {
        if self.zoom_level >= MAX_ZOOM {
            return Vec::new();
        }
        let (x, y, z) = (self.tile_x * 2, self.tile_y * 2, self.zoom_level + 1);
        vec![
            Tile::new(x, y, z),
            Tile::new(x + 1, y, z),
            Tile::new(x, y + 1, z),
            Tile::new(x + 1, y + 1, z),
        ]
    }

    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.zoom_level, self.tile_x, self.tile_y)
    }
}
