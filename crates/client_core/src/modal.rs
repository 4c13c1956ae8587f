use std::{fmt, str::FromStr};

use crate::{
    error::{ClientError, Result},
    form::FormDraft,
    repository::ProductAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
    Delete,
}

impl ModalMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "New product",
            Self::Edit => "Edit product",
            Self::Delete => "Delete product",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            Self::Delete => "Confirm",
            Self::Create | Self::Edit => "Submit",
        }
    }

    /// Turns the confirmed draft into the request to send. Edit and delete
    /// need the id carried over from the seeding product.
    pub fn action_for(self, draft: &FormDraft) -> Result<ProductAction> {
        let require_id = || {
            draft
                .id()
                .cloned()
                .ok_or_else(|| ClientError::Validation("no product selected".into()))
        };
        Ok(match self {
            Self::Create => ProductAction::Create(draft.clone()),
            Self::Edit => ProductAction::Update(require_id()?, draft.clone()),
            Self::Delete => ProductAction::Delete(require_id()?),
        })
    }
}

impl fmt::Display for ModalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        })
    }
}

impl FromStr for ModalMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" | "new" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(ClientError::Validation(format!("unknown modal mode '{other}'"))),
        }
    }
}

/// Visibility of the modal overlay, independent of the draft it edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Closed,
    Open {
        mode: ModalMode,
        error: Option<String>,
    },
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn mode(&self) -> Option<ModalMode> {
        match self {
            Self::Open { mode, .. } => Some(*mode),
            Self::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Closed => None,
        }
    }

    pub fn open(&mut self, mode: ModalMode) {
        *self = Self::Open { mode, error: None };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Ignored while closed; there is nowhere to show the message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        if let Self::Open { error, .. } = self {
            *error = Some(message.into());
        }
    }
}
