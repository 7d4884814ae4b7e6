use std::{error::Error, fmt, io};

use multierror::{BoxError, Entry, ErrorList, Message};

#[test]
fn empty_list_has_neutral_accessors() {
    let errors = ErrorList::empty();

    assert_eq!(errors.len(), 0);
    assert!(errors.is_empty());
    assert_eq!(errors.to_string(), "");
    assert!(errors.entries().is_empty());
    assert_eq!(errors.iter().count(), 0);
    assert!(errors.into_vec().is_empty());
}

#[test]
fn default_is_the_empty_list() {
    assert!(ErrorList::default().is_empty());
}

#[test]
fn empty_message_on_empty_list_stays_empty() {
    let errors = ErrorList::empty().add_message("");
    assert!(errors.is_empty());
    assert_eq!(errors.len(), 0);
}

#[test]
fn empty_message_after_a_real_one_is_ignored() {
    let errors = ErrorList::empty().add_message("a").add_message("");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.to_string(), "a");
}

#[test]
fn empty_message_entries_are_ignored() {
    let errors = ErrorList::from_entries(vec![Entry::message(""), Entry::message("a")]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.to_string(), "a");

    let errors = ErrorList::empty().add_entry(Entry::message(""));
    assert!(errors.is_empty());

    let errors = ErrorList::from_message("a").add_entry(Entry::plain(Message(String::new())));
    assert_eq!(errors.len(), 1);

    let mut errors: ErrorList = vec![Entry::message("")].into_iter().collect();
    errors.extend([Entry::message(""), Entry::message("b")]);
    assert_eq!(errors.to_string(), "b");
}

#[test]
fn absent_errors_are_ignored() {
    let errors = ErrorList::from_error(None::<io::Error>);
    assert!(errors.is_empty());

    let errors = ErrorList::from_message("a")
        .add_error(None::<io::Error>)
        .add_equatable(None::<ErrorList>);
    assert_eq!(errors.len(), 1);
}

#[test]
fn single_constructors() {
    assert!(ErrorList::from_message("").is_empty());
    assert_eq!(ErrorList::from_message("boom").to_string(), "boom");

    let errors = ErrorList::from_error(Some(io::Error::other("refused")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.to_string(), "refused");
}

#[test]
fn render_joins_messages_without_trailing_newline() {
    let errors = ErrorList::from_message("one")
        .with_error(io::Error::other("two"))
        .add_message("three");

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.to_string(), "one\ntwo\nthree");
}

#[test]
fn messages_are_stored_as_message_errors() {
    let errors = ErrorList::from_message("oops");
    let entry = &errors.entries()[0];

    assert!(entry.as_equatable().is_none());
    let message = entry.as_error().downcast_ref::<Message>().unwrap();
    assert_eq!(message.0, "oops");
}

#[test]
fn entries_keep_insertion_order() {
    let errors = ErrorList::from_errors(["first", "second", "third"]);
    let messages: Vec<String> = errors.iter().map(Entry::to_string).collect();
    assert_eq!(messages, ["first", "second", "third"]);

    let borrowed: Vec<String> = (&errors).into_iter().map(|e| e.to_string()).collect();
    assert_eq!(borrowed, messages);

    let owned: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
    assert_eq!(owned, messages);
}

#[test]
fn from_errors_of_nothing_is_empty() {
    assert!(ErrorList::from_errors(Vec::<BoxError>::new()).is_empty());
    assert!(ErrorList::from_entries(vec![]).is_empty());
}

fn address(error: &BoxError) -> *const () {
    &**error as *const (dyn Error + Send + Sync) as *const ()
}

#[test]
fn from_errors_round_trips_identity() {
    let originals: Vec<BoxError> = vec!["a".into(), io::Error::other("b").into(), "c".into()];
    let addresses: Vec<*const ()> = originals.iter().map(address).collect();

    let errors: ErrorList = originals.into_iter().collect();
    let round_tripped: Vec<BoxError> = errors.into_iter().map(Entry::into_boxed).collect();

    let round_tripped_addresses: Vec<*const ()> = round_tripped.iter().map(address).collect();
    assert_eq!(addresses, round_tripped_addresses);
    assert_eq!(round_tripped[1].to_string(), "b");
}

#[test]
fn collapse_empty_is_none() {
    assert!(ErrorList::empty().into_error().is_none());
    assert!(ErrorList::empty().into_result().is_ok());
}

#[test]
fn collapse_single_returns_the_raw_error() {
    let error = ErrorList::from_error(Some(io::Error::new(io::ErrorKind::TimedOut, "slow")))
        .into_error()
        .unwrap();

    assert!(error.downcast_ref::<ErrorList>().is_none());
    let io_error = error.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_error.kind(), io::ErrorKind::TimedOut);
}

#[test]
fn collapse_single_equatable_returns_the_raw_error() {
    let inner = ErrorList::from_message("a").add_message("b");
    let error = ErrorList::empty()
        .with_equatable(inner)
        .into_error()
        .unwrap();

    assert_eq!(error.downcast_ref::<ErrorList>().unwrap().to_string(), "a\nb");
}

#[test]
fn collapse_many_keeps_the_list() {
    let error = ErrorList::from_message("a")
        .add_message("b")
        .add_message("c")
        .into_result()
        .unwrap_err();

    let errors = error.downcast_ref::<ErrorList>().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(error.to_string(), "a\nb\nc");
    assert!(error.source().is_none());
}

#[derive(Debug)]
struct Unit;

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unit")
    }
}

impl Error for Unit {}

#[test]
fn zero_sized_errors_are_stored_and_rendered() {
    let errors = ErrorList::empty().with_error(Unit).with_error(Unit);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.to_string(), "unit\nunit");
    assert!(!errors.entries()[0].same_instance(&errors.entries()[1]));
}
