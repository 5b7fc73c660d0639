pub mod error;
pub mod items;

pub use error::ControllerError;
