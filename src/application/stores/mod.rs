//! State stores built on the shared API client.

mod resource_store;
mod session_store;

pub use resource_store::{INVESTMENT_ITEMS, ProjectResourceStore};
pub use session_store::SessionStore;
