//! SSML helpers for speech output.

/// Break elements with increasing pause strength.
pub mod breaks {
    /// A weak pause.
    pub const WEAK: &str = "<break strength=\"weak\"/>";
    /// A medium pause.
    pub const MEDIUM: &str = "<break strength=\"medium\"/>";
    /// A strong pause.
    pub const STRONG: &str = "<break strength=\"strong\"/>";
}

/// Returns SSML speaking a telephone number digit by digit with pauses.
///
/// All non-digit characters are filtered from the input.
#[must_use]
pub fn telephone_number(number: &str) -> String {
    number
        .chars()
        .filter(char::is_ascii_digit)
        .map(|digit| {
            format!(
                "<say-as interpret-as=\"digits\">{digit}</say-as> {}",
                breaks::WEAK
            )
        })
        .collect()
}
