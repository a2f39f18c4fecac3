//! Input normalization applied before classification.
//!
//! The classifier was trained on text where emoji had been spelled out, so
//! every emoji grapheme is replaced with its name surrounded by spaces
//! (`"sunny 😊"` becomes `"sunny  smiling_face_with_smiling_eyes "`).

use unicode_segmentation::UnicodeSegmentation;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Keycap names end in their symbol ("keycap: #"), which must survive.
const KEPT_SYMBOLS: [char; 2] = ['#', '*'];

/// Replaces every emoji in `text` with ` <emoji_name> `.
///
/// Text without emoji is returned unchanged. The output never contains
/// emoji, so applying this twice gives the same result as applying it once.
pub fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        match lookup(grapheme) {
            Some(emoji) => {
                out.push(' ');
                out.push_str(&token_name(emoji.name()));
                out.push(' ');
            }
            None => out.push_str(grapheme),
        }
    }
    out
}

fn lookup(grapheme: &str) -> Option<&'static emojis::Emoji> {
    if grapheme.is_ascii() {
        return None;
    }
    emojis::get(grapheme).or_else(|| {
        let stripped: String = grapheme
            .chars()
            .filter(|c| *c != VARIATION_SELECTOR_16)
            .collect();
        emojis::get(&stripped)
    })
}

/// "waving hand: medium skin tone" -> "waving_hand_medium_skin_tone"
fn token_name(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_alphanumeric() || KEPT_SYMBOLS.contains(&c) {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    token
}
