use crate::{BoxError, Entry, EquatableError};

/// Something which accumulates errors in order.
///
/// This generalizes methods like [`ErrorList::propagate`] which allow errors to be handled by
/// merging them into a different collection of errors, such as when each worker of a
/// multi-threaded job keeps its own [`ErrorList`] and they are combined after joining.
///
/// [`ErrorList`]: crate::ErrorList
/// [`ErrorList::propagate`]: crate::ErrorList::propagate
pub trait ErrorCollector {
    /// Add a new entry to the end of the collection.
    fn push_entry(&mut self, entry: Entry);

    /// Add a plain error, compared by identity.
    fn push_error(&mut self, error: impl Into<BoxError>) {
        self.push_entry(Entry::plain(error));
    }

    /// Add an error which can be compared by content.
    fn push_equatable(&mut self, error: impl EquatableError) {
        self.push_entry(Entry::equatable(error));
    }

    /// Add a plain error made from a message. Empty messages are ignored.
    fn push_message(&mut self, message: &str) {
        if !message.is_empty() {
            self.push_entry(Entry::message(message));
        }
    }
}

impl ErrorCollector for Vec<Entry> {
    fn push_entry(&mut self, entry: Entry) {
        self.push(entry);
    }
}
