pub mod adapters;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use controllers::coordinator::RendererCoordinator;
pub use controllers::data::render_request::{GenerationMode, RenderRequest, RenderStrategy};
pub use controllers::data::render_signals::RenderSignals;
pub use controllers::errors::rendering::RenderingError;
pub use controllers::export::save_image;
pub use input::cli::args::CliArgs;
pub use input::cli::run_cli;
pub use presenters::file::png::PngFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
