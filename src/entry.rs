use std::{error::Error, fmt, mem, ptr};

use crate::{equate::private::Upcast, EquatableError, ErrorList};

/// A boxed, thread-safe error trait object.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A plain error consisting only of a message.
///
/// This is what [`ErrorList::from_message`] and [`ErrorList::add_message`] store. It does not
/// implement [`EquatableError`], so two `Message`s in different lists are never equal, even with
/// the same text.
///
/// [`ErrorList::from_message`]: crate::ErrorList::from_message
/// [`ErrorList::add_message`]: crate::ErrorList::add_message
#[derive(thiserror::Error, Debug, Clone)]
#[error("{0}")]
pub struct Message(pub String);

/// A single error owned by an [`ErrorList`](crate::ErrorList).
///
/// Entries are tagged with whether they can be compared by content. Whether an entry takes part
/// in [`EquatableError`] comparison is decided when it is added, and checked every time two
/// entries are compared.
#[derive(Debug)]
pub enum Entry {
    /// An error which can only be compared by identity.
    Plain(BoxError),

    /// An error which can be compared by content.
    Equatable(Box<dyn EquatableError>),
}

impl Entry {
    /// An entry for an error added through the plain error path.
    ///
    /// Only an [`ErrorList`] is recognised here and kept comparable by content, so that a
    /// collapsed list can be added back to another list. Any other error is compared by identity,
    /// even if it implements [`EquatableError`]; use [`Entry::equatable`] for those.
    pub fn plain(error: impl Into<BoxError>) -> Self {
        let error: BoxError = error.into();
        match error.downcast::<ErrorList>() {
            Ok(list) => Entry::Equatable(list),
            Err(error) => Entry::Plain(error),
        }
    }

    /// An entry for an error which is compared by content.
    pub fn equatable(error: impl EquatableError) -> Self {
        Entry::Equatable(Box::new(error))
    }

    /// A plain entry holding a [`Message`].
    pub fn message(message: impl Into<String>) -> Self {
        Entry::Plain(Box::new(Message(message.into())))
    }

    /// Whether this entry is a [`Message`] with no text. Lists never store these.
    pub fn is_empty_message(&self) -> bool {
        self.as_error()
            .downcast_ref::<Message>()
            .is_some_and(|message| message.0.is_empty())
    }

    /// Views this entry as an ordinary error, whichever kind it is.
    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        match self {
            Entry::Plain(error) => &**error,
            Entry::Equatable(error) => Upcast::as_error(&**error),
        }
    }

    /// The content-comparable view of this entry, if it has one.
    pub fn as_equatable(&self) -> Option<&dyn EquatableError> {
        match self {
            Entry::Plain(_) => None,
            Entry::Equatable(error) => Some(&**error),
        }
    }

    /// Unwraps the error held by this entry.
    pub fn into_boxed(self) -> BoxError {
        match self {
            Entry::Plain(error) => error,
            Entry::Equatable(error) => Upcast::into_boxed(error),
        }
    }

    /// Whether both entries hold the very same error value.
    ///
    /// Errors are owned by exactly one entry, so two distinct entries are never the same
    /// instance. Zero-sized errors have no distinct address and are never considered the same.
    ///
    /// ```
    /// # use multierror::Entry;
    /// let a = Entry::message("timeout");
    /// let b = Entry::message("timeout");
    ///
    /// assert!(a.same_instance(&a));
    /// assert!(!a.same_instance(&b));
    /// ```
    pub fn same_instance(&self, other: &Entry) -> bool {
        let (this, other) = (self.as_error(), other.as_error());
        mem::size_of_val(this) != 0 && ptr::addr_eq(this, other)
    }

    /// Compares two entries as elements of a list.
    ///
    /// When both are equatable the comparison is delegated to [`EquatableError::equals`].
    /// Otherwise, including when only one of them is equatable, they are compared by identity.
    pub fn matches(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::Equatable(this), Entry::Equatable(other)) => this.equals(&**other),
            _ => self.same_instance(other),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

impl From<BoxError> for Entry {
    fn from(error: BoxError) -> Self {
        Entry::plain(error)
    }
}

impl From<Box<dyn EquatableError>> for Entry {
    fn from(error: Box<dyn EquatableError>) -> Self {
        Entry::Equatable(error)
    }
}
