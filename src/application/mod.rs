//! Application layer with services, stores and DTOs.

/// Data transfer objects.
pub mod dto;
/// API client, interceptors, notifications and localization.
pub mod services;
/// Session and resource stores.
pub mod stores;

pub use dto::{LoginCredentials, LoginOutcome};
pub use services::{
    ApiClient, ApiClientConfig, ApiFactory, MessageCatalog, NotificationCenter, SharedSession,
};
pub use stores::{ProjectResourceStore, SessionStore};
