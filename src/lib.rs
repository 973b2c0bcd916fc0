//! Earliest arrival routing over GTFS schedules.
//!
//! Load a feed once into a [`repository::Repository`], which builds the
//! time dependent stop [`graph::Graph`], then run any number of searches
//! against it, from as many threads as needed.
//!
//! ```no_run
//! use ferroute::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gtfs = Gtfs::new().from_zip("feed.zip");
//! let repository = Repository::new().load_gtfs(gtfs)?;
//! let itinerary = find_fastest_path(
//!     &repository,
//!     "CENTRAL",
//!     "AIRPORT",
//!     Time::from_hms("08:00:00").unwrap_or_default(),
//!     "2024-03-15".parse()?,
//! )?;
//! println!("{} seconds", itinerary.total_time_seconds.as_seconds());
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod gtfs;
pub mod prelude;
pub mod repository;
pub mod router;
pub mod shared;
