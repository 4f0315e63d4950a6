use ahash::AHashMap;
use geo::Coord;

use crate::common::average_colors;
use crate::tree::FlatTree;

use super::geo::{GeoTable, LatLong, Projection, in_band, world_offsets};
use super::geometry::pie_layout;
use super::{PositionIndex, location_of};

/// Aggregated tip-count record for one location under one world offset.
/// `coords` belongs to the current map view and is recomputed on zoom, not
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Deme {
    pub name: String,
    pub count: usize,
    pub color: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coords: Coord<f64>,
}

/// One colored pie wedge of a deme's per-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSector {
    pub color: String,
    pub count: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub coords: Coord<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
}

pub struct DemeData {
    pub demes: Vec<Deme>,
    pub arcs: Vec<ArcSector>,
    /// Deme name -> positions in `demes`, one per world offset the deme
    /// landed in. Stable handles for the in-place patchers.
    pub deme_indices: PositionIndex,
}

/// Per-color visible-tip counts for one location, iterated in the order
/// colors were first seen. That order is the arc drawing order, so it must
/// be deterministic.
pub(crate) struct CategoryCounts {
    order: Vec<String>,
    counts: AHashMap<String, usize>,
}

impl CategoryCounts {
    fn new() -> Self {
        Self { order: Vec::new(), counts: AHashMap::new() }
    }

    fn record(&mut self, color: &str) {
        if !self.counts.contains_key(color) {
            self.order.push(color.to_string());
        }
        *self.counts.entry(color.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order.iter().map(|color| (color.as_str(), self.counts[color]))
    }
}

/// Tip buckets keyed by resolved location, in first-seen location order.
pub(crate) struct LocationCounts {
    order: Vec<String>,
    buckets: AHashMap<String, CategoryCounts>,
}

impl LocationCounts {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &CategoryCounts)> {
        self.order.iter().map(|name| (name.as_str(), &self.buckets[name]))
    }
}

/// Bucket tips by location and count visible tips per color. Invisible
/// tips contribute no counts but still establish their bucket.
pub(crate) fn count_tips_by_location(
    tree: &FlatTree,
    visibility: &[bool],
    node_colors: &[String],
    geo_resolution: &str,
) -> LocationCounts {
    let mut order = Vec::new();
    let mut buckets: AHashMap<String, CategoryCounts> = AHashMap::new();
    for idx in 0..tree.len() {
        if !tree.is_tip(idx) {
            continue;
        }
        let node = tree.node(idx);
        let Some(location) = location_of(node, geo_resolution) else { continue };
        let bucket = buckets.entry(location.to_string()).or_insert_with(|| {
            order.push(location.to_string());
            CategoryCounts::new()
        });
        if visibility[idx] {
            bucket.record(&node_colors[idx]);
        }
    }
    LocationCounts { order, buckets }
}

/// Build the deme and arc arrays for the current view.
///
/// One deme (and its arcs) is emitted per world offset; out-of-band
/// offsets keep their arcs but drop the deme record, and locations with no
/// entry in `geo_table` are warned about and skipped entirely.
pub fn setup_deme_data(
    tree: &FlatTree,
    visibility: &[bool],
    node_colors: &[String],
    geo_resolution: &str,
    geo_table: &GeoTable,
    triplicate: bool,
    project: &Projection,
) -> DemeData {
    let counts = count_tips_by_location(tree, visibility, node_colors, geo_resolution);

    let resolved: Vec<(&str, &CategoryCounts, LatLong)> = counts
        .iter()
        .filter_map(|(name, bucket)| match geo_table.get(name) {
            Some(latlong) => Some((name, bucket, *latlong)),
            None => {
                eprintln!("[demes] no geographic coordinates for \"{name}\"");
                None
            }
        })
        .collect();

    let mut demes = Vec::new();
    let mut arcs = Vec::new();
    let mut deme_indices = PositionIndex::new();

    for &offset in world_offsets(triplicate) {
        for &(name, bucket, latlong) in &resolved {
            let longitude = latlong.longitude + offset;
            let coords = project(latlong.latitude, longitude);

            let color_counts: Vec<(&str, usize)> = bucket.iter().collect();
            let sectors = pie_layout(&color_counts.iter().map(|&(_, n)| n).collect::<Vec<_>>());
            for (&(color, count), sector) in color_counts.iter().zip(&sectors) {
                arcs.push(ArcSector {
                    color: color.to_string(),
                    count,
                    latitude: latlong.latitude,
                    longitude,
                    coords,
                    start_angle: sector.start_angle,
                    end_angle: sector.end_angle,
                });
            }

            if in_band(longitude) {
                deme_indices.entry(name.to_string()).or_default().push(demes.len());
                demes.push(Deme {
                    name: name.to_string(),
                    count: bucket.total(),
                    color: average_colors(bucket.iter()),
                    latitude: latlong.latitude,
                    longitude,
                    coords,
                });
            }
        }
    }

    DemeData { demes, arcs, deme_indices }
}
