/// A string viewed as UTF-16 code units.
///
/// Offsets recorded by browser editors index UTF-16 code units, not bytes or
/// chars. Slicing clamps both bounds to the text length and never panics; a
/// slice that splits a surrogate pair yields U+FFFD for the broken half.
///
/// # Examples
///
/// ```
/// use richdoc_util::strings::Utf16Text;
///
/// let text = Utf16Text::new("a😀b");
/// assert_eq!(text.len(), 4);
/// assert_eq!(text.slice(1, 3), "😀");
/// assert_eq!(text.slice(3, 100), "b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf16Text {
    units: Vec<u16>,
}

impl Utf16Text {
    pub fn new(s: &str) -> Self {
        Self {
            units: s.encode_utf16().collect(),
        }
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Text between `start` (inclusive) and `end` (exclusive).
    ///
    /// Both bounds are clamped to `len()`; an empty range gives `""`.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.units.len());
        let start = start.min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }

    /// Text from `start` to the end.
    pub fn slice_from(&self, start: usize) -> String {
        self.slice(start, self.units.len())
    }
}

impl From<&str> for Utf16Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
