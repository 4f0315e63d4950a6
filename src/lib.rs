#![doc = "Phylomap public API"]
mod common;
mod map;
mod migrate;
mod tree;

pub mod cli;
pub mod commands;
pub mod io;

#[doc(inline)]
pub use migrate::{Coloring, Dataset, LegacyDataset, Maintainer, SCHEMA_VERSION, ScaleType, convert};

#[doc(inline)]
pub use tree::{
    Author, FlatTree, NumDate, TraitValue, TreeNode, Vaccine, get_trait_from_node, traverse,
    traverse_mut,
};

#[doc(inline)]
pub use map::{
    ArcSector, Deme, DemeData, EASTMOST, GeoTable, LatLong, PieSector, PositionIndex, Projection,
    Transmission, TransmissionData, WESTMOST, bezier, interpolate, pie_layout, setup_deme_data,
    setup_transmission_data, update_deme_colors, update_projections, update_transmission_colors,
};

#[doc(inline)]
pub use common::{PrettyOptions, average_colors, pretty_number, pretty_string};
