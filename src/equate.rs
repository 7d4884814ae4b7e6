use std::{any::Any, error::Error};

/// An error which can be compared against other errors by content rather than by identity.
///
/// Implementations should only ever consider another error equal if it is of the same concrete
/// type. Comparing against a different type is expected and must return `false`, never panic.
///
/// ```
/// # use multierror::{EquatableError, equate};
/// #[derive(Debug, PartialEq)]
/// struct Status(u16);
///
/// impl std::fmt::Display for Status {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "status {}", self.0)
///     }
/// }
///
/// impl std::error::Error for Status {}
///
/// impl EquatableError for Status {
///     fn equals(&self, other: &dyn EquatableError) -> bool {
///         equate::by_partial_eq(self, other)
///     }
/// }
///
/// assert!(Status(429).equals(&Status(429)));
/// assert!(!Status(429).equals(&Status(500)));
/// ```
pub trait EquatableError: Error + Any + Send + Sync + private::Upcast {
    /// Whether `other` is semantically the same error as `self`.
    fn equals(&self, other: &dyn EquatableError) -> bool;
}

impl dyn EquatableError {
    /// Whether the concrete type of this error is `T`.
    pub fn is<T: EquatableError>(&self) -> bool {
        private::Upcast::as_any(self).is::<T>()
    }

    /// Returns this error as a `T` if that is its concrete type.
    ///
    /// ```
    /// # use multierror::{EquatableError, ErrorList};
    /// let list = ErrorList::from_message("oops").add_message("again");
    /// let erased: &dyn EquatableError = &list;
    ///
    /// assert_eq!(erased.downcast_ref::<ErrorList>().map(ErrorList::len), Some(2));
    /// ```
    pub fn downcast_ref<T: EquatableError>(&self) -> Option<&T> {
        private::Upcast::as_any(self).downcast_ref::<T>()
    }
}

/// Implements [`EquatableError::equals`] for any type which already has a [`PartialEq`]
/// implementation: errors of another type are never equal, and errors of the same type are
/// compared with `==`.
pub fn by_partial_eq<T: EquatableError + PartialEq>(this: &T, other: &dyn EquatableError) -> bool {
    other.downcast_ref::<T>().is_some_and(|other| this == other)
}

pub(crate) mod private {
    use std::{any::Any, error::Error};

    use crate::BoxError;

    /// Views of an equatable error as the other trait objects it can stand in for. Implemented for
    /// every error type, so implementors of `EquatableError` never see it.
    pub trait Upcast {
        fn as_any(&self) -> &dyn Any;
        fn as_error(&self) -> &(dyn Error + Send + Sync + 'static);
        fn into_boxed(self: Box<Self>) -> BoxError;
    }

    impl<T: Error + Send + Sync + 'static> Upcast for T {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
            self
        }

        fn into_boxed(self: Box<Self>) -> BoxError {
            self
        }
    }
}
