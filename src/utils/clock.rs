use chrono::Datelike;

/// Current calendar year from the local system clock.
///
/// Read on every call, so a long-running process picks up the new year.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
