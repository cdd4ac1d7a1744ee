pub mod row_group_size;
pub mod target_resolution;
