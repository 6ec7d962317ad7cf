//! Geographic coordinate type.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Positions are placement
//! metadata only — movement math never consults them — with one exception:
//! the bridge-side rule compares raw longitudes with strict `<` / `>`, so the
//! values are carried at full precision rather than rounded to f32.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
