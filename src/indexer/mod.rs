pub mod indexable;
pub mod walker;

pub use indexable::IndexablePath;
pub use walker::Walker;
