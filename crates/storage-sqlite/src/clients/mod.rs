//! SQLite storage implementation for clients.

mod model;
mod repository;

pub use model::{ClientChangesetDB, ClientDB};
pub use repository::ClientRepository;
