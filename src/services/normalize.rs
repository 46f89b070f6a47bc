/// Separator used between destinations in the canonical form.
pub const DESTINATION_SEPARATOR: &str = ", ";

/// Turn free-text destination input into a canonical comma-joined list.
///
/// Runs of whitespace and commas both count as separators and empty tokens
/// are dropped. Empty input yields an empty string.
pub fn normalize_destination(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(DESTINATION_SEPARATOR)
}
