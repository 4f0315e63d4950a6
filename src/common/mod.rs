mod color;
mod format;

pub use color::average_colors;
pub use format::{PrettyOptions, pretty_number, pretty_string};
