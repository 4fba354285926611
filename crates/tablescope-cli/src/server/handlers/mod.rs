//! API request handlers.

mod column;
mod dataset;
mod health;
mod upload;

pub use column::*;
pub use dataset::*;
pub use health::*;
pub use upload::*;
