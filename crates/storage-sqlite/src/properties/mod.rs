//! SQLite storage implementation for properties.

mod model;
mod repository;

pub use model::{PropertyChangesetDB, PropertyDB};
pub use repository::PropertyRepository;
