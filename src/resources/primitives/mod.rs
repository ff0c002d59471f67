pub mod box_shape;

pub use box_shape::{BoxOptions, create_box};
