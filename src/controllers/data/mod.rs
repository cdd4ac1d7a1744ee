pub mod render_request;
pub mod render_signals;
