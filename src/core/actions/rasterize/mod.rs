pub mod ports;
pub mod rasterize_row_groups;
