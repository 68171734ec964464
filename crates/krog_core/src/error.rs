//! Error types for the krog content management core.

use krog_store::StoreError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
///
/// Variants fall into four groups the handler layer maps onto status
/// codes: validation failures, not-found lookups, uniqueness conflicts,
/// and persistence failures. Every mutation validates fully before
/// touching its in-memory document and persists at most once, so any
/// error leaves the stored document untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field is missing or malformed.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the failure.
        message: String,
    },

    /// No wine list exists with the given id.
    #[error("wine list not found: {id}")]
    ListNotFound {
        /// The wine list id that was looked up.
        id: String,
    },

    /// No wine item with the given id exists anywhere in the list.
    #[error("wine not found: {id}")]
    WineNotFound {
        /// The wine item id that was looked up.
        id: String,
    },

    /// A wine with this name already exists in the target area.
    #[error("wine name already exists in this area: {name} ({area})")]
    DuplicateWine {
        /// The conflicting wine name.
        name: String,
        /// The area that already holds it.
        area: String,
    },

    /// No menu exists with the given id.
    #[error("menu not found: {id}")]
    MenuNotFound {
        /// The menu id that was looked up.
        id: String,
    },

    /// A menu with this id already exists.
    #[error("menu already exists: {id}")]
    DuplicateMenu {
        /// The conflicting menu id.
        id: String,
    },

    /// No item with the given id exists in the menu.
    #[error("item not found: {item_id} in menu {menu_id}")]
    MenuItemNotFound {
        /// The menu that was searched.
        menu_id: String,
        /// The item id that was looked up.
        item_id: String,
    },

    /// No opening hours exist for the given day.
    #[error("no opening hours for day: {day}")]
    DayNotFound {
        /// The day that was looked up.
        day: String,
    },

    /// Opening hours for this day already exist.
    #[error("opening hours already exist for day: {day}")]
    DuplicateDay {
        /// The conflicting day.
        day: String,
    },

    /// No event exists with the given id.
    #[error("event not found: {id}")]
    EventNotFound {
        /// The event id that was looked up.
        id: String,
    },

    /// An event with this title already exists.
    #[error("an event with this title already exists: {title}")]
    DuplicateEventTitle {
        /// The conflicting title.
        title: String,
    },

    /// The caller is not authenticated.
    #[error("not authorized")]
    Unauthorized,

    /// The document store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` for the not-found family of errors.
    ///
    /// The handler layer uses this to pick a 404-style response without
    /// matching every variant.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ListNotFound { .. }
                | Self::WineNotFound { .. }
                | Self::MenuNotFound { .. }
                | Self::MenuItemNotFound { .. }
                | Self::DayNotFound { .. }
                | Self::EventNotFound { .. }
        )
    }

    /// Returns `true` for the uniqueness-conflict family of errors.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateWine { .. }
                | Self::DuplicateMenu { .. }
                | Self::DuplicateDay { .. }
                | Self::DuplicateEventTitle { .. }
        )
    }
}
