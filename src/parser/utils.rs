//! Label quoting for Newick output.
//!
//! Strains are written verbatim whenever possible. Labels containing
//! whitespace or Newick punctuation are wrapped in single quotes, with
//! internal single quotes doubled, so that reading them back yields the
//! original strain.

/// Characters that force a label to be quoted.
const SPECIAL_CHARACTERS: &[char] = &[
    ' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written without quotes.
///
/// # Examples
/// ```
/// # use tanglegram::parser::utils::needs_quotes;
/// assert!(!needs_quotes("A/Hong_Kong/1/68"));
/// assert!(needs_quotes("Australasian Swamphen"));
/// assert!(needs_quotes("Baillon's_Crake"));
/// assert!(needs_quotes(""));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label.is_empty() || label.contains(SPECIAL_CHARACTERS)
}

/// Escapes a label for safe use in Newick strings.
///
/// # Examples
/// ```
/// # use tanglegram::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
