use ahash::{AHashMap, AHashSet};
use geo::Coord;

use crate::tree::FlatTree;

use super::geo::{GeoTable, Projection, in_band, world_offsets};
use super::geometry::{bezier, interpolate};
use super::{PositionIndex, location_of};

/// Destination offsets evaluated for every origin offset; the winner is
/// the one whose on-screen path is shortest.
const DESTINATION_OFFSETS: [f64; 3] = [-360.0, 0.0, 360.0];

/// A directed parent -> child edge crossing a location boundary, rendered
/// as a curved arc. `origin_node` / `destination_node` are positions in
/// the flat tree; `id` is stable across world-offset variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    pub id: String,
    pub origin_node: usize,
    pub destination_node: usize,
    pub bezier_curve: Vec<Coord<f64>>,
    pub bezier_dates: Vec<f64>,
    pub origin_name: String,
    pub destination_name: String,
    pub origin_coords: Coord<f64>,
    pub destination_coords: Coord<f64>,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    pub origin_num_date: f64,
    pub destination_num_date: f64,
    pub color: String,
    pub visible: bool,
    /// Fan-out rank among repeated edges between the same location pair
    /// (1 for the first occurrence), used to bow overlapping arcs apart.
    pub extend: u32,
}

pub struct TransmissionData {
    pub transmissions: Vec<Transmission>,
    /// Edge id -> positions in `transmissions`, one per origin offset.
    pub transmission_indices: PositionIndex,
    /// Locations that had no entry in the geo table; diagnostics for the
    /// caller, no events are emitted for them.
    pub locations_missing_coords: AHashSet<String>,
}

/// Build transmission arcs for every tree edge that crosses locations.
///
/// For each origin offset, all three destination offsets are tried and the
/// candidate with the smallest projected horizontal separation wins; a
/// candidate qualifies only when both adjusted longitudes are in-band and
/// less than half a revolution apart. Offsets with no qualifying candidate
/// emit nothing.
pub fn setup_transmission_data(
    tree: &FlatTree,
    visibility: &[bool],
    node_colors: &[String],
    geo_resolution: &str,
    geo_table: &GeoTable,
    triplicate: bool,
    project: &Projection,
) -> TransmissionData {
    let mut transmissions = Vec::new();
    let mut transmission_indices = PositionIndex::new();
    let mut locations_missing_coords = AHashSet::new();
    let mut pair_counts: AHashMap<(String, String), u32> = AHashMap::new();

    for parent in 0..tree.len() {
        let parent_node = tree.node(parent);
        let Some(origin_name) = location_of(parent_node, geo_resolution) else { continue };
        for &child in tree.children(parent) {
            let child_node = tree.node(child);
            let Some(destination_name) = location_of(child_node, geo_resolution) else {
                continue;
            };
            if origin_name == destination_name {
                continue;
            }

            let origin = match geo_table.get(origin_name) {
                Some(latlong) => *latlong,
                None => {
                    locations_missing_coords.insert(origin_name.to_string());
                    continue;
                }
            };
            let destination = match geo_table.get(destination_name) {
                Some(latlong) => *latlong,
                None => {
                    locations_missing_coords.insert(destination_name.to_string());
                    continue;
                }
            };

            // Direction matters: A->B and B->A fan out independently.
            let extend = pair_counts
                .entry((origin_name.to_string(), destination_name.to_string()))
                .and_modify(|n| *n += 1)
                .or_insert(1);
            let extend = *extend;

            let id = format!("{parent}-{child}");
            let origin_date = parent_node.date().unwrap_or_default();
            let destination_date = child_node.date().unwrap_or_default();

            for &offset in world_offsets(triplicate) {
                let origin_longitude = origin.longitude + offset;
                if !in_band(origin_longitude) {
                    continue;
                }
                let origin_coords = project(origin.latitude, origin_longitude);

                // Pick the destination copy with the shortest on-screen path.
                let mut best: Option<(f64, f64, Coord<f64>)> = None;
                for &destination_offset in &DESTINATION_OFFSETS {
                    let destination_longitude = destination.longitude + destination_offset;
                    if !in_band(destination_longitude) {
                        continue;
                    }
                    if (origin_longitude - destination_longitude).abs() >= 180.0 {
                        continue;
                    }
                    let destination_coords = project(destination.latitude, destination_longitude);
                    let separation = (destination_coords.x - origin_coords.x).abs();
                    if best.is_none_or(|(d, _, _)| separation < d) {
                        best = Some((separation, destination_longitude, destination_coords));
                    }
                }
                let Some((_, destination_longitude, destination_coords)) = best else { continue };

                let bezier_curve = bezier(origin_coords, destination_coords, extend);
                let lerp = interpolate(origin_date, destination_date);
                let last = (bezier_curve.len() - 1) as f64;
                let bezier_dates: Vec<f64> =
                    (0..bezier_curve.len()).map(|i| lerp(i as f64 / last)).collect();

                transmission_indices.entry(id.clone()).or_default().push(transmissions.len());
                transmissions.push(Transmission {
                    id: id.clone(),
                    origin_node: parent,
                    destination_node: child,
                    bezier_curve,
                    bezier_dates,
                    origin_name: origin_name.to_string(),
                    destination_name: destination_name.to_string(),
                    origin_coords,
                    destination_coords,
                    origin_latitude: origin.latitude,
                    origin_longitude,
                    destination_latitude: destination.latitude,
                    destination_longitude,
                    origin_num_date: origin_date,
                    destination_num_date: destination_date,
                    color: node_colors[parent].clone(),
                    visible: visibility[child],
                    extend,
                });
            }
        }
    }

    TransmissionData { transmissions, transmission_indices, locations_missing_coords }
}
