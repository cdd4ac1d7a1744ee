pub mod algorithm;
pub mod colour_map;
pub mod escape_time;
pub mod mandelbrot_config;
