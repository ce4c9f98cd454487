#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Builds a box from two opposite corners given in any order.
    pub fn from_corners(a: LatLong, b: LatLong) -> Self {
        Self {
            min_latitude: a.latitude.min(b.latitude),
            min_longitude: a.longitude.min(b.longitude),
            max_latitude: a.latitude.max(b.latitude),
            max_longitude: a.longitude.max(b.longitude),
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }

    /// True when `other` lies inside this box, allowing `epsilon` degrees of slack.
    pub fn contains_box(&self, other: &BoundingBox, epsilon: f64) -> bool {
        other.min_latitude >= self.min_latitude - epsilon
            && other.max_latitude <= self.max_latitude + epsilon
            && other.min_longitude >= self.min_longitude - epsilon
            && other.max_longitude <= self.max_longitude + epsilon
    }

    pub fn north_west(&self) -> LatLong {
        LatLong::new(self.max_latitude, self.min_longitude)
    }

    pub fn south_east(&self) -> LatLong {
        LatLong::new(self.min_latitude, self.max_longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Corners of a mesh cell: `(lat0, long0)` is north-west, `(lat1, long1)` south-east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidRect {
    pub lat0: f64,
    pub long0: f64,
    pub lat1: f64,
    pub long1: f64,
}

impl EllipsoidRect {
    pub fn north_west(&self) -> LatLong {
        LatLong::new(self.lat0, self.long0)
    }

    pub fn south_west(&self) -> LatLong {
        LatLong::new(self.lat1, self.long0)
    }

    pub fn north_east(&self) -> LatLong {
        LatLong::new(self.lat0, self.long1)
    }

    pub fn south_east(&self) -> LatLong {
        LatLong::new(self.lat1, self.long1)
    }

    pub fn to_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.north_west(), self.south_east())
    }
}

/// Edge lengths (meters) and trapezoid area (square meters) of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshArea {
    /// North edge, west to east
    pub w1: f64,
    /// South edge, west to east
    pub w2: f64,
    /// West edge, north to south
    pub h: f64,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLabels {
    pub long: String,
    pub short: String,
}

impl CellLabels {
    pub fn new(long: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short: short.into(),
        }
    }

    /// Single-character codes are already covered by the short label.
    pub fn show_long(&self) -> bool {
        self.long.chars().count() > 1
    }
}
