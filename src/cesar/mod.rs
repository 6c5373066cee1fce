pub mod image;
pub mod io;
pub mod runner;

pub use self::image::{load_image, load_partial, parse_image, save_image};
pub use self::io::{display_text, press_key};
pub use self::runner::{run, spawn, RunSummary};
