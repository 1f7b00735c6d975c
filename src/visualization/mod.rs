pub mod raster;
pub mod field_vis2d;
