use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies `ErrorLocation::caller()` records this test file and a real line.
///
/// **WHY THIS MATTERS**: Every error in the transport and the lead operations prints
/// its location. A helper that reports its own position instead of the caller's would
/// make all of them point at `error_location.rs` in the common crate.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from `caller()`.
#[test]
fn given_caller_helper_when_invoked_then_records_call_site() {
    // GIVEN / WHEN: Capturing through the helper
    let location = ErrorLocation::caller();

    // THEN: File is this test module, not the helper's module
    assert!(
        location.file.contains("tests"),
        "Expected the test file, got {}",
        location.file
    );
    assert!(location.line > 0);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the `[file:line:column]` rendering used in every error message.
///
/// **WHY THIS MATTERS**: Error strings are grepped in logs. A changed format breaks that.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a component.
#[test]
#[track_caller]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A location for this line
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting it
    let formatted = location.to_string();

    // THEN: "[file:line:column]"
    let expected = format!("[{}:{}:{}]", location.file, location.line, location.column);
    assert_eq!(formatted, expected);
}

/// **VALUE**: Verifies separate call sites of a `#[track_caller]` helper get separate lines.
///
/// **WHY THIS MATTERS**: `From` impls for transport errors rely on this propagation, so
/// two `?` on consecutive lines must not collapse into one reported position.
///
/// **BUG THIS CATCHES**: Would catch location capture moving out of the caller.
#[test]
fn given_two_call_sites_when_capturing_then_lines_differ() {
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::caller()
    }

    let first = capture();
    let second = capture();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
}
