mod component;
mod render;
mod state;
mod style;

pub use component::{ForceGraphCanvas, NodeClick};
pub use style::node_color;
