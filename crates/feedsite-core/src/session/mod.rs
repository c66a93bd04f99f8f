//! Session lifecycle: the persisted token and the user behind it

mod manager;
mod token_store;

pub use manager::SessionManager;
pub use token_store::TokenStore;
