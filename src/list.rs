use std::{error::Error, fmt, mem, ptr};

use crate::{BoxError, Entry, EquatableError, ErrorCollector};

/// An ordered list of errors, which is itself an error.
///
/// `ErrorList` is built up by folding error-producing operations into it, and is then either
/// rendered, converted into its individual errors, or collapsed into a single conventional error
/// with [`into_error`].
///
/// [`into_error`]: ErrorList::into_error
///
/// # The empty list
///
/// An empty `ErrorList` is a distinguished state which stands for "no error". Every operation
/// accepts it, and it never holds an allocated-but-empty container. Adding nothing to a list
/// (an empty message, or a `None` error) leaves it as it was:
///
/// ```
/// # use multierror::ErrorList;
/// let errors = ErrorList::empty()
///     .add_message("")
///     .add_error(None::<std::io::Error>);
///
/// assert!(errors.is_empty());
/// assert_eq!(errors.to_string(), "");
/// assert!(errors.into_error().is_none());
/// ```
///
/// # Building
///
/// Appending consumes the list and returns the one to keep using. This is how an empty list turns
/// into a populated one, so the returned value must always replace the previous one.
///
/// ```
/// # use multierror::ErrorList;
/// fn check(items: &[&str]) -> ErrorList {
///     let mut errors = ErrorList::empty();
///     for item in items {
///         errors = errors.add_error(item.parse::<u32>().err());
///     }
///     errors
/// }
///
/// let errors = check(&["1", "x", "3", "y"]);
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.to_string(), "invalid digit found in string\ninvalid digit found in string");
/// ```
///
/// # Comparison
///
/// Lists are compared with [`EquatableError::equals`] (or `==`). Elements which were added as
/// [`EquatableError`]s are compared by content, and all other elements by identity. See
/// [`ErrorList::equals`](#method.equals) for the exact rules.
#[derive(Debug, Default)]
pub struct ErrorList {
    /// `None` for the empty list. Never `Some` of an empty `Vec`.
    entries: Option<Vec<Entry>>,
}

impl ErrorList {
    /// Constructs the empty list.
    #[must_use]
    pub const fn empty() -> Self {
        ErrorList { entries: None }
    }

    /// Constructs a list holding a single plain error with the given message.
    ///
    /// If the message is empty, the empty list is returned.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// assert_eq!(ErrorList::from_message("disk full").len(), 1);
    /// assert!(ErrorList::from_message("").is_empty());
    /// ```
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        Self::empty().add_message(message)
    }

    /// Constructs a list holding a single plain error, or the empty list if given `None`.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let errors = ErrorList::from_error("abc".parse::<u8>().err());
    /// assert_eq!(errors.len(), 1);
    ///
    /// let errors = ErrorList::from_error("42".parse::<u8>().err());
    /// assert!(errors.is_empty());
    /// ```
    #[must_use]
    pub fn from_error<E: Into<BoxError>>(error: Option<E>) -> Self {
        Self::empty().add_error(error)
    }

    /// Constructs a list by adding each error in order, as with [`with_error`]. The list is empty
    /// if there are none.
    ///
    /// [`with_error`]: ErrorList::with_error
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let errors = ErrorList::from_errors(["a", "b", "c"]);
    /// assert_eq!(errors.to_string(), "a\nb\nc");
    /// ```
    #[must_use]
    pub fn from_errors<E: Into<BoxError>>(errors: impl IntoIterator<Item = E>) -> Self {
        errors
            .into_iter()
            .fold(Self::empty(), |list, error| list.with_error(error))
    }

    /// Constructs a list by adding each error in order, as with [`with_equatable`]. The list is
    /// empty if there are none.
    ///
    /// [`with_equatable`]: ErrorList::with_equatable
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let a = ErrorList::from_equatables([ErrorList::from_message("a"), ErrorList::empty()]);
    /// assert_eq!(a.len(), 2);
    /// ```
    #[must_use]
    pub fn from_equatables<E: EquatableError>(errors: impl IntoIterator<Item = E>) -> Self {
        errors
            .into_iter()
            .fold(Self::empty(), |list, error| list.with_equatable(error))
    }

    /// Constructs a list from existing entries, in order, as with [`add_entry`]. The list is empty
    /// if there are none.
    ///
    /// [`add_entry`]: ErrorList::add_entry
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        entries.into_iter().fold(Self::empty(), ErrorList::add_entry)
    }

    /// Adds a plain error with the given message to the end of the list, and returns the list.
    ///
    /// An empty message is ignored, and the list is returned unchanged.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let errors = ErrorList::empty()
    ///     .add_message("a")
    ///     .add_message("")
    ///     .add_message("b");
    ///
    /// assert_eq!(errors.len(), 2);
    /// ```
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn add_message(self, message: &str) -> Self {
        self.add_entry(Entry::message(message))
    }

    /// Adds a plain error to the end of the list, and returns the list.
    ///
    /// `None` is ignored, and the list is returned unchanged. This accepts the output of
    /// [`Result::err`] directly.
    ///
    /// Errors added this way are compared by identity, even if they implement
    /// [`EquatableError`], with the exception of an `ErrorList` (see [`Entry::plain`]). Use
    /// [`add_equatable`] to have an error compared by content.
    ///
    /// [`add_equatable`]: ErrorList::add_equatable
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn add_error<E: Into<BoxError>>(self, error: Option<E>) -> Self {
        match error {
            Some(error) => self.with_error(error),
            None => {
                trace!(len = self.len(), "ignoring absent error");
                self
            }
        }
    }

    /// Adds a plain error to the end of the list, and returns the list.
    ///
    /// Comparison works as for [`add_error`]: a collapsed `ErrorList` keeps comparing by content,
    /// anything else by identity.
    ///
    /// [`add_error`]: ErrorList::add_error
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let build = || {
    ///     let inner = ErrorList::from_equatables([ErrorList::empty(), ErrorList::empty()]);
    ///     ErrorList::empty().with_error(inner.into_error().unwrap())
    /// };
    ///
    /// assert_eq!(build(), build());
    /// ```
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn with_error(self, error: impl Into<BoxError>) -> Self {
        self.add_entry(Entry::plain(error))
    }

    /// Adds an error which can be compared by content to the end of the list, and returns the
    /// list. `None` is ignored.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let inner = ErrorList::from_message("nested");
    /// let errors = ErrorList::empty().add_equatable(Some(inner));
    ///
    /// assert_eq!(errors.len(), 1);
    /// assert!(errors.entries()[0].as_equatable().is_some());
    /// ```
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn add_equatable<E: EquatableError>(self, error: Option<E>) -> Self {
        match error {
            Some(error) => self.with_equatable(error),
            None => {
                trace!(len = self.len(), "ignoring absent error");
                self
            }
        }
    }

    /// Adds an error which can be compared by content to the end of the list, and returns the
    /// list.
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn with_equatable(self, error: impl EquatableError) -> Self {
        self.add_entry(Entry::equatable(error))
    }

    /// Adds an entry to the end of the list, and returns the list.
    ///
    /// An entry holding an empty [`Message`](crate::Message) is ignored, as with
    /// [`add_message`](ErrorList::add_message).
    #[must_use = "adding to an empty list creates a new list, which must be used instead"]
    pub fn add_entry(mut self, entry: Entry) -> Self {
        if entry.is_empty_message() {
            trace!(len = self.len(), "ignoring empty error message");
            return self;
        }

        match &mut self.entries {
            Some(entries) => entries.push(entry),
            None => self.entries = Some(vec![entry]),
        }
        self
    }

    /// The number of errors in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if this is the empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_none()
    }

    /// The errors in the list, in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Iterates over the errors in the list, in the order they were added.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries().iter()
    }

    /// Consumes the list, returning its errors in the order they were added.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let errors = ErrorList::from_message("first").add_message("second");
    /// let messages: Vec<String> = errors.into_vec().iter().map(ToString::to_string).collect();
    ///
    /// assert_eq!(messages, ["first", "second"]);
    /// assert!(ErrorList::empty().into_vec().is_empty());
    /// ```
    #[must_use]
    pub fn into_vec(self) -> Vec<Entry> {
        self.entries.unwrap_or_default()
    }

    /// Collapses the list into the simplest equivalent error:
    ///
    /// - The empty list becomes [`None`], so that "no errors" reads as "no error".
    /// - A list with a single error becomes that error itself.
    /// - Any other list becomes a boxed `ErrorList`.
    ///
    /// This is the way to hand an `ErrorList` back to code which only checks whether an error
    /// occurred.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// assert!(ErrorList::empty().into_error().is_none());
    ///
    /// let single = ErrorList::from_error("x".parse::<i32>().err()).into_error().unwrap();
    /// assert!(single.is::<std::num::ParseIntError>());
    ///
    /// let many = ErrorList::from_message("a").add_message("b").into_error().unwrap();
    /// assert_eq!(many.downcast_ref::<ErrorList>().unwrap().len(), 2);
    /// ```
    #[must_use]
    pub fn into_error(self) -> Option<BoxError> {
        let entries = self.entries?;
        trace!(len = entries.len(), "collapsing error list");

        if entries.len() == 1 {
            return entries.into_iter().next().map(Entry::into_boxed);
        }
        Some(Box::new(ErrorList { entries: Some(entries) }))
    }

    /// Converts the list into a [`Result`], which is [`Ok`] if the list is empty and otherwise
    /// holds the collapsed error as in [`into_error`].
    ///
    /// [`into_error`]: ErrorList::into_error
    ///
    /// ```
    /// # use multierror::{BoxError, ErrorList};
    /// fn validate(port: &str, host: &str) -> Result<(), BoxError> {
    ///     let mut errors = ErrorList::empty();
    ///     errors = errors.add_error(port.parse::<u16>().err());
    ///     if host.is_empty() {
    ///         errors = errors.add_message("host must not be empty");
    ///     }
    ///     errors.into_result()
    /// }
    ///
    /// assert!(validate("9200", "localhost").is_ok());
    /// assert_eq!(
    ///     validate("http", "").unwrap_err().to_string(),
    ///     "invalid digit found in string\nhost must not be empty",
    /// );
    /// ```
    pub fn into_result(self) -> Result<(), BoxError> {
        match self.into_error() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Moves every error from this list, in order, into an [`ErrorCollector`].
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let worker = ErrorList::from_message("connection reset").add_message("timeout");
    /// let mut all = ErrorList::from_message("bad config");
    ///
    /// worker.propagate(&mut all);
    /// assert_eq!(all.to_string(), "bad config\nconnection reset\ntimeout");
    /// ```
    pub fn propagate(self, other: &mut impl ErrorCollector) {
        for entry in self.into_vec() {
            other.push_entry(entry);
        }
    }
}

impl EquatableError for ErrorList {
    /// Checks whether `other` is an `ErrorList` holding equal errors in the same order.
    ///
    /// - Anything other than an `ErrorList` is not equal.
    /// - The empty list is only equal to the empty list.
    /// - Lists of different lengths are not equal.
    /// - Otherwise, errors are compared pairwise. If both errors of a pair were added as
    ///   [`EquatableError`]s, they are compared with [`EquatableError::equals`]. If either of them
    ///   was not, they are only equal if they are the same instance, which never holds for
    ///   errors in two different lists. A plain error is never equal to an equatable one.
    ///
    /// ```
    /// # use multierror::{EquatableError, ErrorList};
    /// let a = ErrorList::from_message("timeout");
    /// let b = ErrorList::from_message("timeout");
    ///
    /// assert!(a.equals(&a));
    /// assert!(!a.equals(&b));
    /// assert!(ErrorList::empty().equals(&ErrorList::empty()));
    /// assert!(!a.equals(&ErrorList::empty()));
    /// ```
    fn equals(&self, other: &dyn EquatableError) -> bool {
        let Some(other) = other.downcast_ref::<ErrorList>() else {
            return false;
        };

        if ptr::eq(self, other) {
            return true;
        }

        match (&self.entries, &other.entries) {
            (None, None) => true,
            (Some(this), Some(other)) => {
                this.len() == other.len()
                    && this.iter().zip(other).all(|(x, y)| x.matches(y))
            }
            _ => false,
        }
    }
}

impl PartialEq for ErrorList {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for ErrorList {
    /// Writes each error's message on its own line, with no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl Error for ErrorList {}

impl ErrorCollector for ErrorList {
    fn push_entry(&mut self, entry: Entry) {
        *self = mem::take(self).add_entry(entry);
    }
}

impl Extend<Entry> for ErrorList {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.push_entry(entry);
        }
    }
}

impl FromIterator<Entry> for ErrorList {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        ErrorList::from_entries(iter)
    }
}

impl FromIterator<BoxError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = BoxError>>(iter: I) -> Self {
        ErrorList::from_errors(iter)
    }
}

impl FromIterator<Box<dyn EquatableError>> for ErrorList {
    fn from_iter<I: IntoIterator<Item = Box<dyn EquatableError>>>(iter: I) -> Self {
        iter.into_iter().map(Entry::Equatable).collect()
    }
}

impl FromIterator<ErrorList> for ErrorList {
    /// Concatenates lists in order, such as the lists kept by each worker of a job.
    ///
    /// ```
    /// # use multierror::ErrorList;
    /// let workers = vec![
    ///     ErrorList::from_message("worker 0 failed"),
    ///     ErrorList::empty(),
    ///     ErrorList::from_message("worker 2 failed").add_message("worker 2 gave up"),
    /// ];
    ///
    /// let all: ErrorList = workers.into_iter().collect();
    /// assert_eq!(all.len(), 3);
    /// ```
    fn from_iter<I: IntoIterator<Item = ErrorList>>(iter: I) -> Self {
        iter.into_iter().flatten().collect()
    }
}

impl IntoIterator for ErrorList {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
