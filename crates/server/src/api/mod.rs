mod map;
mod routing;
mod stops;

pub use map::*;
pub use routing::*;
pub use stops::*;
