pub mod continuous_config;
pub mod debounce;
pub mod lod;
pub mod renderer;
pub mod throttle;
