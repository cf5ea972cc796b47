//! Domain entity definitions.

mod project;
mod session;
mod token;

pub use project::{ItemId, ProjectId};
pub use session::{Session, UserData};
pub use token::AuthToken;
