pub mod date;
pub mod geo;
pub mod time;

pub use date::*;
pub use geo::*;
pub use time::{Duration, Time};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date {0}, expected YYYY-MM-DD or YYYYMMDD")]
    InvalidDate(String),
}
