//! Core of the catalog admin console: session handling, the product
//! repository client, the modal form reducer and the view coordinator that
//! ties them together.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod form;
pub mod modal;
pub mod repository;
pub mod session;
pub mod transport;

pub use config::{load_settings, ConsoleSettings};
pub use coordinator::{ConsoleCoordinator, Screen};
pub use error::{ClientError, Result};
pub use form::{FormDraft, FormField, UnknownField};
pub use modal::{ModalMode, Overlay};
pub use repository::{ProductAction, ProductRepository};
pub use session::{
    Credential, FileTokenStore, MemoryTokenStore, Session, SessionManager, TokenStore,
};
pub use transport::ApiTransport;

#[cfg(test)]
#[path = "tests/mock_api.rs"]
mod mock_api;
