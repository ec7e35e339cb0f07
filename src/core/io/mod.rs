mod error;
mod market;
mod returns;

pub use error::*;
pub use market::*;
pub use returns::*;

pub mod write;
pub use write::*;
