//! Night Owl Session Management
//!
//! - A Session is a named, ordered snapshot of the tabs of one window
//! - Names are unique; saving under an existing name replaces its tabs
//! - Every mutation persists the complete session list
//! - Display order is a view (`sorted`), never a mutation

mod error;
mod session;
pub mod sort;
mod store;

pub use error::SessionError;
pub use session::Session;
pub use sort::{sort_sessions, SortMethod};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
