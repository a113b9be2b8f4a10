pub mod file;

pub use file::{load_project, save_project};
