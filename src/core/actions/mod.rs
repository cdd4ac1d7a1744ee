pub mod cancellation;
pub mod progress;
pub mod rasterize;
