//! Token storage adapters.

mod file_storage;
mod keyring_storage;

pub use file_storage::FileTokenStorage;
pub use keyring_storage::KeyringTokenStorage;
