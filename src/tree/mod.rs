mod node;
mod traverse;

pub use node::{Author, NumDate, TraitValue, TreeNode, Vaccine, get_trait_from_node};
pub use traverse::{FlatTree, traverse, traverse_mut};
