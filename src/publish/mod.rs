//! The publish gate and the concurrent config store fan-out.
mod fanout;
mod gate;
mod pipeline;
mod store;
mod target;

pub use fanout::*;
pub use gate::*;
pub use pipeline::*;
pub use store::*;
pub use target::*;
