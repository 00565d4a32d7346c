//! Backend module - GPU device contract and the headless implementation

pub mod backend;
pub mod headless_backend;
pub mod types;

pub use backend::{Backend, create_backend};
pub use headless_backend::{HeadlessBackend, HeadlessState, HeadlessMesh};
pub use types::*;
