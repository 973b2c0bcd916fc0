mod map_line;
mod stop;

pub use map_line::*;
pub use stop::*;
