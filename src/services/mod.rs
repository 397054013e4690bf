// Service exports
pub mod catalog;
pub mod menu_api;
pub mod sessions;

pub use catalog::MenuCatalog;
pub use menu_api::{MenuApiClient, MenuApiError};
pub use sessions::{PreferenceSession, SessionError, SessionManager, SessionStore, SharedSession};
