pub mod buffer;

pub use buffer::{create_index, create_vertex};
