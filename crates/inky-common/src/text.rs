//! Display string assembly: station abbreviation, train lines and
//! advisory wrapping.

use tracing::warn;

use crate::error::InkyResult;

/// Ordered word substitutions applied to destination names.
///
/// Order matters: entries are applied top to bottom.
pub const STATION_ABBREVIATIONS: [(&str, &str); 10] = [
    ("Station", "Stn"),
    ("Street", "St"),
    ("Lane", "Ln"),
    ("Court", "Ct"),
    ("Road", "Rd"),
    ("North", "N"),
    ("South", "S"),
    ("East", "E"),
    ("West", "W"),
    ("Thameslink", "TL"),
];

/// Width of one advisory chunk on the panel.
pub const DEFAULT_LINE_LENGTH: usize = 38;

/// Maximum platform characters shown.
pub const PLATFORM_WIDTH: usize = 2;

/// Shorten a station name using [`STATION_ABBREVIATIONS`].
///
/// The table is reapplied until nothing changes, so a substitution that
/// forms a new key (`"Northorth"` to `"North"`) is abbreviated too and the
/// result is stable under a second call. Every abbreviation is shorter than
/// its word, which bounds the loop.
pub fn abbreviate_station_name(name: &str) -> String {
    let mut current = name.to_string();
    loop {
        let next = abbreviate_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn abbreviate_pass(name: &str) -> String {
    STATION_ABBREVIATIONS
        .iter()
        .fold(name.to_string(), |acc, (word, abbr)| acc.replace(word, abbr))
}

/// Build `"HH:MM | P<platform> to <destination> - <status>"`.
///
/// The platform is cut to two characters; a missing platform shows as `?`.
pub fn format_train_string(
    time: &str,
    platform: Option<&str>,
    destination: &str,
    status: &str,
) -> String {
    let platform: String = match platform {
        Some(p) => p.chars().take(PLATFORM_WIDTH).collect(),
        None => "?".to_string(),
    };
    format!(
        "{} | P{} to {} - {}",
        time,
        platform,
        abbreviate_station_name(destination),
        status
    )
}

/// Return chunk `line_index` of `message`, `line_length` characters wide,
/// with leading spaces removed.
///
/// Indices past the end of the message yield an empty string, so callers can
/// probe successive lines until the text runs out.
pub fn format_error_message(message: &str, line_index: usize, line_length: usize) -> String {
    let start = match line_index.checked_mul(line_length) {
        Some(start) => start,
        None => return String::new(),
    };
    let chunk: String = message.chars().skip(start).take(line_length).collect();
    chunk.trim_start_matches(' ').to_string()
}

/// Unwrap a formatted field or substitute `"Error retrieving <field>."`.
pub fn placeholder(result: InkyResult<String>, field: &str) -> String {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(field = field, kind = e.kind(), error = %e, "Substituting placeholder");
            placeholder_text(field)
        }
    }
}

/// The inline text shown for a field that could not be produced.
pub fn placeholder_text(field: &str) -> String {
    format!("Error retrieving {}.", field)
}
