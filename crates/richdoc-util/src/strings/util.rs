/// Check if a character is whitespace.
///
/// # Examples
///
/// ```
/// use richdoc_util::strings::is_whitespace;
///
/// assert!(is_whitespace(' '));
/// assert!(is_whitespace('\t'));
/// assert!(is_whitespace('\n'));
/// assert!(!is_whitespace('a'));
/// ```
pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

/// Check if a string has no visible content.
///
/// # Examples
///
/// ```
/// use richdoc_util::strings::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank(" \n\t"));
/// assert!(!is_blank(" a "));
/// ```
pub fn is_blank(s: &str) -> bool {
    s.chars().all(is_whitespace)
}
