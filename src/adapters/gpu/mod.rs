pub mod blit_pipeline;
pub mod context;
pub mod errors;
pub mod escape_time_pipeline;
pub mod kernel_params;
pub mod readback;
pub mod texture;
