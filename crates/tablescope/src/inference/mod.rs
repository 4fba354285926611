//! Schema inference: raw string cells to typed columns.

mod typing;

pub use typing::TypeInference;
