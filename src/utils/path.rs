/// Normalize a user-provided repository reference before parsing.
///
/// - Trims leading/trailing ASCII and Unicode whitespace
/// - Strips surrounding single or double quotes if present
/// - Trims whitespace left inside the quotes
pub fn normalize_repo_input(input: &str) -> String {
    let trimmed = input.trim();

    let unquoted = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_strips_quotes() {
        assert_eq!(normalize_repo_input("  acme/widget "), "acme/widget");
        assert_eq!(normalize_repo_input("\"acme/widget\""), "acme/widget");
        assert_eq!(normalize_repo_input("' acme/widget '"), "acme/widget");
    }

    #[test]
    fn test_lone_quote_is_kept() {
        assert_eq!(normalize_repo_input("\""), "\"");
    }
}
