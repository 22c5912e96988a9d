pub mod app;
pub mod debounce;
pub mod dom;
pub mod geometry;
pub mod palette;
pub mod state;
pub mod surface;

pub use app::run;
