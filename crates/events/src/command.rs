use contentrepo_core::StreamName;

/// A command targets a specific event stream (command abstraction).
///
/// Commands represent **intent** - a request to change the content tree.
/// They are **transient** (not persisted) and are transformed into events (which are persisted).
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "create a `Page` below node X")
/// - **Event**: Fact that something happened (e.g., "child node `about` was created")
///
/// Commands are rejected if invalid. Events represent accepted changes.
///
/// ## Stream Targeting
///
/// Commands must name the stream their events are appended to via `target_stream()`.
/// Every event decided for one command goes to that single stream in one append.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_stream(&self) -> StreamName;
}
