mod demes;
mod geo;
mod geometry;
mod transmissions;
mod update;

use ahash::AHashMap;
use serde_json::Value;
use smallvec::SmallVec;

use crate::tree::{TreeNode, get_trait_from_node};

pub use demes::{ArcSector, Deme, DemeData, setup_deme_data};
pub use geo::{EASTMOST, GeoTable, LatLong, Projection, WESTMOST};
pub use geometry::{PieSector, bezier, interpolate, pie_layout};
pub use transmissions::{Transmission, TransmissionData, setup_transmission_data};
pub use update::{update_deme_colors, update_projections, update_transmission_colors};

/// Stable key -> positions in an aggregation array. At most one position
/// per world offset, hence the inline capacity of three.
pub type PositionIndex = AHashMap<String, SmallVec<[usize; 3]>>;

/// Resolve a node's location for the active geographic resolution.
pub(crate) fn location_of<'a>(node: &'a TreeNode, geo_resolution: &str) -> Option<&'a str> {
    get_trait_from_node(node, geo_resolution).and_then(Value::as_str)
}
