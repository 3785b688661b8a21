pub mod conversion;
pub mod definition;
pub mod payload;
pub mod reader;
pub mod rule;

pub use conversion::*;
pub use definition::*;
pub use payload::*;
pub use reader::*;
pub use rule::*;
