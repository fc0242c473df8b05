//! Input cleanup applied before text reaches a prompt or the parser.

/// Strip invisible characters that break marker matching and prompt
/// rendering, and normalize line endings to `\n`.
///
/// Removes zero-width spaces/joiners, the BOM, and directional marks
/// that copy-pasted social-media text frequently carries.
///
/// # Examples
///
/// ```
/// use hotnote_parser::sanitize_text;
///
/// assert_eq!(sanitize_text("你\u{200b}好\r\nworld"), "你好\nworld");
/// ```
pub fn sanitize_text(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{200b}' // zero-width space
                    | '\u{200c}' // zero-width non-joiner
                    | '\u{200d}' // zero-width joiner
                    | '\u{2060}' // word joiner
                    | '\u{feff}' // BOM
                    | '\u{200e}' // left-to-right mark
                    | '\u{200f}' // right-to-left mark
            )
        })
        .collect()
}
