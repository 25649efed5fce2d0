use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture_location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Verifies that `#[track_caller]` propagation reports the call site.
///
/// **WHY THIS MATTERS**: Every error variant in the workspace carries a
/// location. If propagation breaks, all errors point at their constructor.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from a
/// helper, which collapses distinct call sites onto one line.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // WHEN: Capturing location from two consecutive lines
    let first = capture_location();
    let second = capture_location();

    // THEN: Same file, sequential lines
    assert_eq!(first.file, second.file);
    assert!(first.file.ends_with("error_location.rs"));
    assert_eq!(first.line + 1, second.line);
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` display format.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/session/store.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/session/store.rs:42:7]");
}
