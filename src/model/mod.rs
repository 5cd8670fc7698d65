mod common;
mod live;
mod matches;
mod news;
mod rankings;
mod stats;

pub use common::*;
pub use live::*;
pub use matches::*;
pub use news::*;
pub use rankings::*;
pub use stats::*;
