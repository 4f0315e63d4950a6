use ahash::AHashMap;
use geo::Coord;

/// Projection function: latitude/longitude -> layer pixel point. Supplied
/// by the embedding map view; assumed pure and synchronous.
pub type Projection = dyn Fn(f64, f64) -> Coord<f64>;

/// Geographic position of one resolved location value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

/// Lookup table from location value (for the active geographic resolution)
/// to coordinates.
pub type GeoTable = AHashMap<String, LatLong>;

/// Longitude band a record may be drawn in. With triplication the world is
/// drawn three times, shifted by one full revolution either way.
pub const WESTMOST: f64 = -360.0;
pub const EASTMOST: f64 = 360.0;

const TRIPLICATE_OFFSETS: [f64; 3] = [-360.0, 0.0, 360.0];
const SINGLE_OFFSET: [f64; 1] = [0.0];

pub(crate) fn world_offsets(triplicate: bool) -> &'static [f64] {
    if triplicate { &TRIPLICATE_OFFSETS } else { &SINGLE_OFFSET }
}

#[inline]
pub(crate) fn in_band(longitude: f64) -> bool {
    longitude > WESTMOST && longitude < EASTMOST
}
