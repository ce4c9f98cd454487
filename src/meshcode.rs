//! World grid square codes compatible with JIS X0410.
//!
//! A code is built from an area digit (1-8) followed by successively finer
//! subdivisions:
//!
//! ```text
//! A BBB BB C C D D E F G
//! | |   |  | | | | | | +-- 125m quadrant (1-4)
//! | |   |  | | | | | +---- 250m quadrant (1-4)
//! | |   |  | | | | +------ 500m quadrant (1-4)
//! | |   |  | | | +-------- 1km longitude (0-9, 45")
//! | |   |  | | +---------- 1km latitude (0-9, 30")
//! | |   |  | +------------ 10km longitude (0-7, 7.5')
//! | |   |  +-------------- 10km latitude (0-7, 5')
//! | |   +----------------- 80km longitude (1 degree)
//! | +--------------------- 80km latitude (40')
//! +----------------------- area code
//! ```
//!
//! Quadrant digits number the sub-cells 1 (SW), 2 (SE), 3 (NW), 4 (NE).

use crate::errors::{GridError, Result};
use crate::types::{EllipsoidRect, LatLong, MeshArea};
use crate::vincenty::vincenty_distance;
use std::fmt;
use tracing::debug;

/// Granularity of a mesh code, named by its place in the JIS hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshLevel {
    /// 80km, 6 digits
    Primary,
    /// 10km, 8 digits
    Secondary,
    /// 1km, 10 digits
    Standard,
    /// 500m, 11 digits
    Half,
    /// 250m, 12 digits
    Quarter,
    /// 125m, 13 digits
    Eighth,
}

impl MeshLevel {
    pub const ALL: [MeshLevel; 6] = [
        MeshLevel::Primary,
        MeshLevel::Secondary,
        MeshLevel::Standard,
        MeshLevel::Half,
        MeshLevel::Quarter,
        MeshLevel::Eighth,
    ];

    pub fn code_length(self) -> usize {
        match self {
            MeshLevel::Primary => 6,
            MeshLevel::Secondary => 8,
            MeshLevel::Standard => 10,
            MeshLevel::Half => 11,
            MeshLevel::Quarter => 12,
            MeshLevel::Eighth => 13,
        }
    }

    pub fn from_code_length(length: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.code_length() == length)
    }

    /// 1 for the 80km level up to 6 for the 125m level.
    pub fn depth(self) -> usize {
        self as usize + 1
    }

    pub fn nominal_size(self) -> &'static str {
        match self {
            MeshLevel::Primary => "80km",
            MeshLevel::Secondary => "10km",
            MeshLevel::Standard => "1km",
            MeshLevel::Half => "500m",
            MeshLevel::Quarter => "250m",
            MeshLevel::Eighth => "125m",
        }
    }
}

impl fmt::Display for MeshLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} digits)", self.nominal_size(), self.code_length())
    }
}

// (scale, step) per level: the value is scaled to the step's unit, then split
// into floor(value / step) and the remainder in that unit.
const LATITUDE_CHAIN: [(f64, f64); 6] = [
    (60.0, 40.0),
    (1.0, 5.0),
    (60.0, 30.0),
    (1.0, 15.0),
    (1.0, 7.5),
    (1.0, 3.75),
];
const LONGITUDE_CHAIN: [(f64, f64); 6] = [
    (1.0, 1.0),
    (60.0, 7.5),
    (60.0, 45.0),
    (1.0, 22.5),
    (1.0, 11.25),
    (1.0, 5.625),
];

// Subdivisions below the 80km cell: 8x8, 10x10, then three 2x2 splits
const SUBDIVISIONS: [f64; 5] = [8.0, 10.0, 2.0, 2.0, 2.0];

const MAX_PRIMARY_ROW: i64 = 135;
const MAX_PRIMARY_COLUMN_PAST_100: i64 = 80;

/// Fraction digits kept when decoding; the divisor chain leaves noise below this.
const DECODE_FRACTION_DIGITS: usize = 8;

/// Quadrant sign bits of a zero-based area index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Octant {
    /// southern hemisphere
    x: i64,
    /// western hemisphere
    y: i64,
    /// |longitude| >= 100
    z: i64,
}

impl Octant {
    fn from_index(o: i64) -> Self {
        let z = o % 2;
        let y = ((o - z) / 2) % 2;
        let x = (o - 2 * y - z) / 4;
        Self { x, y, z }
    }

    fn from_position(latitude: f64, longitude: f64) -> i64 {
        let mut o = if latitude < 0.0 { 4 } else { 0 };
        if longitude < 0.0 {
            o += 2;
        }
        if longitude.abs() >= 100.0 {
            o += 1;
        }
        o
    }

    fn lat_sign(self) -> f64 {
        (1 - 2 * self.x) as f64
    }

    fn long_sign(self) -> f64 {
        (1 - 2 * self.y) as f64
    }
}

pub struct WorldMesh;

impl WorldMesh {
    /// Code of the cell containing the position, at the requested level.
    pub fn lat_long_to_meshcode(latitude: f64, longitude: f64, level: MeshLevel) -> Result<String> {
        let mut code = Self::full_meshcode(latitude, longitude)?;
        code.truncate(level.code_length());
        Ok(code)
    }

    /// 1km code, the usual granularity for statistics.
    pub fn meshcode(latitude: f64, longitude: f64) -> Result<String> {
        Self::lat_long_to_meshcode(latitude, longitude, MeshLevel::Standard)
    }

    /// The 13-digit (125m) code; every coarser code is a prefix of it.
    pub fn full_meshcode(latitude: f64, longitude: f64) -> Result<String> {
        let position = LatLong::new(latitude, longitude);
        if !position.is_valid() {
            return Err(GridError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        let o = Octant::from_position(latitude, longitude);
        let octant = Octant::from_index(o);
        let latitude = octant.lat_sign() * latitude;
        let longitude = octant.long_sign() * longitude;

        let lat = decompose(latitude, &LATITUDE_CHAIN);
        let long = decompose(longitude - 100.0 * octant.z as f64, &LONGITUDE_CHAIN);
        let quadrant = |i: usize| lat[i] * 2 + long[i] + 1;

        Ok(format!(
            "{}{:03}{:02}{}{}{}{}{}{}{}",
            o + 1,
            lat[0],
            long[0],
            lat[1],
            long[1],
            lat[2],
            long[2],
            quadrant(3),
            quadrant(4),
            quadrant(5),
        ))
    }

    /// North-west and south-east corners of the cell named by `meshcode`.
    pub fn meshcode_to_lat_long_grid(meshcode: &str) -> Result<EllipsoidRect> {
        let parsed = ParsedMeshCode::parse(meshcode)?;
        let octant = parsed.octant;
        let depth = parsed.level.depth();

        // The finest of the first three levels names the cell's north-west
        // corner; in the reflected domain that is its upper or lower edge
        // depending on the hemisphere.
        let finest_decimal = depth.min(3);
        let mut lat0 = 0.0;
        let mut long0 = 0.0;
        for level in 1..=finest_decimal {
            let (mut lat_k, mut long_k) = parsed.decimal[level - 1];
            if level == finest_decimal {
                lat_k += 1 - octant.x;
                long_k += octant.y;
            }
            if level == 1 {
                lat0 = lat_term(lat_k, 1);
                long0 = (long_k + 100 * octant.z) as f64;
            } else {
                lat0 += lat_term(lat_k, level);
                long0 += long_term(long_k, level);
            }
        }
        for (i, &digit) in parsed.quadrants.iter().enumerate() {
            let level = 4 + i;
            lat0 += lat_term((digit - 1) / 2 + octant.x - 1, level);
            long0 += long_term((digit - 1) % 2 - octant.y, level);
        }

        let lat0 = octant.lat_sign() * lat0;
        let long0 = octant.long_sign() * long0;
        let dlat = lat_term(1, depth);
        let dlong = long_term(1, depth);

        let rect = EllipsoidRect {
            lat0: quantize(lat0),
            long0: quantize(long0),
            lat1: quantize(lat0 - dlat),
            long1: quantize(long0 + dlong),
        };
        debug!(
            "Decoded mesh code {} ({}): {:?}",
            meshcode,
            parsed.level,
            rect
        );
        Ok(rect)
    }

    /// North-west corner, the conventional representative point of a cell.
    pub fn meshcode_to_lat_long(meshcode: &str) -> Result<LatLong> {
        Self::meshcode_to_lat_long_nw(meshcode)
    }

    pub fn meshcode_to_lat_long_nw(meshcode: &str) -> Result<LatLong> {
        Ok(Self::meshcode_to_lat_long_grid(meshcode)?.north_west())
    }

    pub fn meshcode_to_lat_long_sw(meshcode: &str) -> Result<LatLong> {
        Ok(Self::meshcode_to_lat_long_grid(meshcode)?.south_west())
    }

    pub fn meshcode_to_lat_long_ne(meshcode: &str) -> Result<LatLong> {
        Ok(Self::meshcode_to_lat_long_grid(meshcode)?.north_east())
    }

    pub fn meshcode_to_lat_long_se(meshcode: &str) -> Result<LatLong> {
        Ok(Self::meshcode_to_lat_long_grid(meshcode)?.south_east())
    }

    /// Edge lengths of the trapezoid spanned by `rect` and its approximate area.
    pub fn area_from_rect(rect: &EllipsoidRect) -> Result<MeshArea> {
        let w1 = vincenty_distance(rect.lat0, rect.long0, rect.lat0, rect.long1)?;
        let w2 = vincenty_distance(rect.lat1, rect.long0, rect.lat1, rect.long1)?;
        let h = vincenty_distance(rect.lat0, rect.long0, rect.lat1, rect.long0)?;
        Ok(MeshArea {
            w1,
            w2,
            h,
            area: (w1 + w2) * h * 0.5,
        })
    }
}

pub fn mesh_area_from_code(meshcode: &str) -> Result<MeshArea> {
    let rect = WorldMesh::meshcode_to_lat_long_grid(meshcode)?;
    WorldMesh::area_from_rect(&rect)
}

/// Digits of a mesh code, validated per position.
struct ParsedMeshCode {
    level: MeshLevel,
    octant: Octant,
    /// (latitude, longitude) index for the 80km, 10km and 1km levels present
    decimal: Vec<(i64, i64)>,
    /// 500m, 250m and 125m quadrant digits present, each 1-4
    quadrants: Vec<i64>,
}

impl ParsedMeshCode {
    fn parse(meshcode: &str) -> Result<Self> {
        let invalid = || GridError::invalid_code(meshcode);

        let level = MeshLevel::from_code_length(meshcode.len()).ok_or_else(invalid)?;
        let digits = meshcode
            .chars()
            .map(|c| c.to_digit(10).map(i64::from))
            .collect::<Option<Vec<i64>>>()
            .ok_or_else(invalid)?;

        let area = digits[0];
        if !(1..=8).contains(&area) {
            return Err(invalid());
        }

        let octant = Octant::from_index(area - 1);
        let p = digits[1] * 100 + digits[2] * 10 + digits[3];
        let u = digits[4] * 10 + digits[5];
        // 40' rows stop at the pole; 1 degree columns past 100 stop at 180
        if p > MAX_PRIMARY_ROW || (octant.z == 1 && u > MAX_PRIMARY_COLUMN_PAST_100) {
            return Err(invalid());
        }

        let mut decimal = vec![(p, u)];
        if level.depth() >= 2 {
            let (q, v) = (digits[6], digits[7]);
            if q > 7 || v > 7 {
                return Err(invalid());
            }
            decimal.push((q, v));
        }
        if level.depth() >= 3 {
            decimal.push((digits[8], digits[9]));
        }

        let quadrants = digits[10.min(digits.len())..].to_vec();
        if quadrants.iter().any(|d| !(1..=4).contains(d)) {
            return Err(invalid());
        }

        Ok(Self {
            level,
            octant,
            decimal,
            quadrants,
        })
    }
}

fn decompose(mut value: f64, chain: &[(f64, f64); 6]) -> [i64; 6] {
    let mut digits = [0i64; 6];
    for (digit, &(scale, step)) in digits.iter_mut().zip(chain) {
        let scaled = value * scale / step;
        let whole = scaled.floor();
        value = (scaled - whole) * step;
        *digit = whole as i64;
    }
    digits
}

/// `k` cells of the given level, in degrees of latitude.
fn lat_term(k: i64, level: usize) -> f64 {
    SUBDIVISIONS[..level - 1]
        .iter()
        .fold(k as f64 * 2.0 / 3.0, |acc, d| acc / d)
}

/// `k` cells of the given level, in degrees of longitude.
fn long_term(k: i64, level: usize) -> f64 {
    SUBDIVISIONS[..level - 1]
        .iter()
        .fold(k as f64, |acc, d| acc / d)
}

/// Truncates the shortest decimal form of `value` to a fixed number of
/// fraction digits.
fn quantize(value: f64) -> f64 {
    let text = value.abs().to_string();
    let kept = match text.find('.') {
        Some(dot) => &text[..(dot + 1 + DECODE_FRACTION_DIGITS).min(text.len())],
        None => text.as_str(),
    };
    let magnitude = kept.parse::<f64>().unwrap_or(value.abs());
    if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
