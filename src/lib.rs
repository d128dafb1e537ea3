pub mod constants;
pub mod store;

pub mod clients;
pub mod flights;
pub mod objects;

pub mod distributions;
pub mod errors;
pub mod payments;
pub mod rooms;
pub mod users;

pub use rooms::*;
pub use errors::{Error, Result};
