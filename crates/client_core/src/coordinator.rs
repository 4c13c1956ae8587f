//! Top-level console flow.
//!
//! The coordinator owns the screen (`LoggedOut` / `LoggedIn`), the product list
//! and the modal overlay, and drives the session manager and repository. Every
//! operation takes `&mut self`, so at most one request is in flight and a
//! second confirm cannot race the first.

use std::sync::Arc;

use shared::domain::Product;
use tracing::{error, info, warn};

use crate::{
    config::ConsoleSettings,
    error::{ClientError, Result},
    form::FormDraft,
    modal::{ModalMode, Overlay},
    repository::ProductRepository,
    session::{Credential, SessionManager, TokenStore},
    transport::ApiTransport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    LoggedOut,
    LoggedIn,
}

pub struct ConsoleCoordinator {
    session: SessionManager,
    repository: ProductRepository,
    screen: Screen,
    products: Vec<Product>,
    overlay: Overlay,
    draft: FormDraft,
    login_message: String,
}

impl ConsoleCoordinator {
    pub fn new(settings: &ConsoleSettings, store: Arc<dyn TokenStore>) -> Result<Self> {
        let transport = ApiTransport::new(settings)?;
        Ok(Self::with_transport(
            transport,
            store,
            settings.auth_scheme.clone(),
        ))
    }

    pub fn with_transport(
        transport: ApiTransport,
        store: Arc<dyn TokenStore>,
        auth_scheme: Option<String>,
    ) -> Self {
        Self {
            session: SessionManager::new(transport.clone(), store, auth_scheme),
            repository: ProductRepository::new(transport),
            screen: Screen::LoggedOut,
            products: Vec::new(),
            overlay: Overlay::Closed,
            draft: FormDraft::blank(),
            login_message: String::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The draft being edited, only while the modal is open.
    pub fn draft(&self) -> Option<&FormDraft> {
        self.overlay.is_open().then_some(&self.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut FormDraft> {
        if self.overlay.is_open() {
            Some(&mut self.draft)
        } else {
            None
        }
    }

    pub fn login_message(&self) -> &str {
        &self.login_message
    }

    /// One-shot startup check: restore the stored token, verify it, then fetch.
    pub async fn startup(&mut self) {
        self.screen = Screen::LoggedOut;
        if self.session.restore().is_none() {
            info!("no stored session; showing login");
            return;
        }
        match self.session.verify().await {
            Ok(()) => {
                self.screen = Screen::LoggedIn;
                self.refresh().await;
            }
            Err(err) => {
                info!(error = %err, "stored session rejected; showing login");
                self.enter_logged_out();
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) {
        match self.session.login(username, password).await {
            Ok(message) => {
                self.login_message = message;
                self.screen = Screen::LoggedIn;
                self.refresh().await;
            }
            Err(err) => {
                self.login_message = match &err {
                    ClientError::Auth(message) | ClientError::Validation(message) => {
                        message.clone()
                    }
                    other => other.user_message(),
                };
                self.screen = Screen::LoggedOut;
            }
        }
    }

    pub fn logout(&mut self) {
        info!("signing out");
        self.enter_logged_out();
        self.login_message.clear();
    }

    /// Replaces the product list wholesale. Failures other than auth keep the
    /// previous list on screen.
    pub async fn refresh(&mut self) {
        let Some(credential) = self.require_credential() else {
            return;
        };
        match self.repository.list(&credential).await {
            Ok(products) => {
                info!(count = products.len(), "product list refreshed");
                self.products = products;
            }
            Err(err) => {
                self.handle_failure(&err, "refresh product list");
            }
        }
    }

    /// Opens the modal seeded from `seed`, or from a blank template.
    pub fn open_modal(&mut self, mode: ModalMode, seed: Option<&Product>) -> bool {
        if self.screen != Screen::LoggedIn {
            return false;
        }
        self.draft = seed.map(FormDraft::from_product).unwrap_or_default();
        self.overlay.open(mode);
        true
    }

    /// Opens the modal for the product at table position `index` (0-based).
    pub fn open_modal_for(&mut self, mode: ModalMode, index: usize) -> bool {
        let Some(product) = self.products.get(index).cloned() else {
            return false;
        };
        self.open_modal(mode, Some(&product))
    }

    pub fn close_modal(&mut self) {
        self.overlay.close();
        self.draft = FormDraft::blank();
    }

    /// Sends the open modal's action. Success refreshes the list and closes the
    /// modal; a rejection keeps it open with the message shown.
    pub async fn confirm(&mut self) {
        let Some(mode) = self.overlay.mode() else {
            return;
        };
        let action = match mode.action_for(&self.draft) {
            Ok(action) => action,
            Err(err) => {
                self.overlay.set_error(err.user_message());
                return;
            }
        };
        let Some(credential) = self.require_credential() else {
            return;
        };

        match self.repository.execute(&credential, &action).await {
            Ok(()) => {
                info!(%mode, "modal action confirmed");
                self.refresh().await;
                self.close_modal();
            }
            Err(err) => {
                self.handle_failure(&err, "confirm modal");
                self.overlay.set_error(err.user_message());
            }
        }
    }

    /// Active credential, or a forced logout when there is none.
    fn require_credential(&mut self) -> Option<Credential> {
        let credential = self.session.active_credential();
        if credential.is_none() {
            warn!("no active session; returning to login");
            self.enter_logged_out();
        }
        credential
    }

    fn handle_failure(&mut self, err: &ClientError, operation: &str) {
        match err {
            ClientError::Auth(_) => {
                warn!(operation, error = %err, "authentication lost");
                self.enter_logged_out();
            }
            ClientError::Validation(_) => {
                info!(operation, error = %err, "request rejected by server");
            }
            _ => {
                error!(operation, error = %err, "request failed");
            }
        }
    }

    fn enter_logged_out(&mut self) {
        self.session.invalidate();
        self.screen = Screen::LoggedOut;
        self.products.clear();
        self.close_modal();
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
