//! Raster I/O around the projection kernel.
//!
//! - World map decoding into a [`projection::SourceRaster`]
//! - PNG encoding of projected charts (indexed or RGBA)

pub mod png;
pub mod world_map;

pub use png::{create_png, create_png_auto, encode_chart};
pub use world_map::{decode_world_map, load_world_map, to_rgba_image};
