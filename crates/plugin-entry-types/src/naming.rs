//! Name and slug derivation for untitled entries.

use scraper::Html;

/// Maximum number of words kept from the content.
pub const NAME_WORDS: usize = 10;

/// Maximum length of a derived name, in characters.
pub const NAME_MAX_CHARS: usize = 250;

/// Length of a generated slug.
pub const SLUG_LEN: usize = 10;

/// Derives a display name from entry content.
///
/// The content is parsed as an HTML fragment and reduced to its decoded
/// text, cut to [`NAME_WORDS`] words (marked with `" …"`), whitespace runs
/// collapse to one space and the result is capped at [`NAME_MAX_CHARS`]
/// characters (marked with `"…"`).
pub fn name_from_content(content: &str) -> String {
    let text = html_to_text(content);
    let text = limit_words(text.trim(), NAME_WORDS, " …");
    let text = collapse_whitespace(&text);
    limit_chars(&text, NAME_MAX_CHARS, "…")
}

/// Generates a random lowercase alphanumeric slug.
pub fn random_slug() -> String {
    let mut slug = uuid::Uuid::new_v4().simple().to_string();
    slug.truncate(SLUG_LEN);
    slug
}

/// Returns the text content of an HTML fragment with markup removed and
/// character references decoded.
///
/// A `<` that does not open a tag stays part of the text.
pub fn html_to_text(input: &str) -> String {
    Html::parse_fragment(input).root_element().text().collect()
}

/// Keeps the first `words` words, appending `end` if anything was cut.
fn limit_words(input: &str, words: usize, end: &str) -> String {
    let mut seen = 0;
    let mut in_word = false;
    for (idx, c) in input.char_indices() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            seen += 1;
            if seen > words {
                return format!("{}{}", input[..idx].trim_end(), end);
            }
        }
    }
    input.to_string()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Caps `input` at `max` characters, appending `end` if anything was cut.
fn limit_chars(input: &str, max: usize, end: &str) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => format!("{}{}", input[..idx].trim_end(), end),
        None => input.to_string(),
    }
}
