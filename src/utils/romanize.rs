//! Unicode to ASCII-safe transliteration
//!
//! CDJ players reject filenames outside plain ASCII, so every filename stem
//! goes through Hepburn romanization followed by a sanitizing pass.

/// Romanize text into a filename-safe ASCII token
///
/// ASCII characters and whitespace pass through the phonetic step untouched.
/// Every other run of characters is romanized with KAKASI (Hepburn), and the
/// pieces are joined without separators. The result is then sanitized so it
/// only contains `[A-Za-z0-9_.-]`.
///
/// Input with nothing pronounceable degrades to underscores rather than failing.
///
/// # Examples
///
/// ```
/// use cdjexport::utils::romanize;
///
/// assert_eq!(romanize("Song B"), "Song_B");
/// assert_eq!(romanize("さくら"), "sakura");
/// ```
pub fn romanize(text: &str) -> String {
    let mut phonetic = String::with_capacity(text.len());
    let mut pending = String::new();

    for c in text.chars() {
        if c.is_ascii() || c.is_whitespace() {
            flush_phonetic(&mut pending, &mut phonetic);
            phonetic.push(c);
        } else {
            pending.push(c);
        }
    }
    flush_phonetic(&mut pending, &mut phonetic);

    sanitize_ascii(&phonetic)
}

/// Romanize a pending non-ASCII run and append it to `out`
fn flush_phonetic(pending: &mut String, out: &mut String) {
    if pending.is_empty() {
        return;
    }

    // KAKASI separates words with spaces; drop them so segments concatenate
    let converted = kakasi::convert(pending.as_str());
    out.extend(converted.romaji.chars().filter(|c| !c.is_whitespace()));
    pending.clear();
}

/// Replace anything outside `[A-Za-z0-9_.-]` with a single underscore
fn sanitize_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' ' => '_',
            c if c.is_ascii_alphanumeric() => c,
            '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}
