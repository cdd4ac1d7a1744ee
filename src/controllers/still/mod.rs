pub mod cpu;
pub mod gpu;
mod pass_session;
