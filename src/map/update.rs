use crate::common::average_colors;
use crate::tree::FlatTree;

use super::demes::{ArcSector, Deme, count_tips_by_location};
use super::geo::Projection;
use super::geometry::bezier;
use super::transmissions::Transmission;
use super::{PositionIndex, location_of};

/// Patch deme counts and display colors in place after a visibility or
/// coloring change. Geometry is untouched; records are addressed through
/// `deme_indices` from the original aggregation.
pub fn update_deme_colors(
    demes: &mut [Deme],
    deme_indices: &PositionIndex,
    tree: &FlatTree,
    visibility: &[bool],
    node_colors: &[String],
    geo_resolution: &str,
) {
    let counts = count_tips_by_location(tree, visibility, node_colors, geo_resolution);
    for (name, bucket) in counts.iter() {
        let Some(positions) = deme_indices.get(name) else { continue };
        let count = bucket.total();
        let color = average_colors(bucket.iter());
        for &idx in positions {
            demes[idx].count = count;
            demes[idx].color = color.clone();
        }
    }
}

/// Patch transmission colors and visibility in place. Walks the same edges
/// as the aggregation pass; an edge id missing from `transmission_indices`
/// is logged and skipped rather than treated as fatal.
pub fn update_transmission_colors(
    transmissions: &mut [Transmission],
    transmission_indices: &PositionIndex,
    tree: &FlatTree,
    visibility: &[bool],
    node_colors: &[String],
    geo_resolution: &str,
) {
    for parent in 0..tree.len() {
        let Some(origin_name) = location_of(tree.node(parent), geo_resolution) else { continue };
        for &child in tree.children(parent) {
            let Some(destination_name) = location_of(tree.node(child), geo_resolution) else {
                continue;
            };
            if origin_name == destination_name {
                continue;
            }
            let id = format!("{parent}-{child}");
            let Some(positions) = transmission_indices.get(&id) else {
                eprintln!("[transmissions] no index entry for edge {id}");
                continue;
            };
            for &idx in positions {
                transmissions[idx].color = node_colors[parent].clone();
                transmissions[idx].visible = visibility[child];
            }
        }
    }
}

/// Re-project every record after a zoom or pan. Counts, colors and
/// visibility are untouched; coordinates and curves are re-derived from
/// the stored (offset-adjusted) latitudes and longitudes.
pub fn update_projections(
    demes: &mut [Deme],
    arcs: &mut [ArcSector],
    transmissions: &mut [Transmission],
    project: &Projection,
) {
    for deme in demes.iter_mut() {
        deme.coords = project(deme.latitude, deme.longitude);
    }
    for arc in arcs.iter_mut() {
        arc.coords = project(arc.latitude, arc.longitude);
    }
    for transmission in transmissions.iter_mut() {
        transmission.origin_coords =
            project(transmission.origin_latitude, transmission.origin_longitude);
        transmission.destination_coords =
            project(transmission.destination_latitude, transmission.destination_longitude);
        transmission.bezier_curve = bezier(
            transmission.origin_coords,
            transmission.destination_coords,
            transmission.extend,
        );
    }
}
