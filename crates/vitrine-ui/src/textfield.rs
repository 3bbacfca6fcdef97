//! Text helpers shared by the renderer and the paint pass: password
//! masking, money parsing and the approximate metrics used for measuring.

use unicode_segmentation::UnicodeSegmentation;

pub const MASK_CHAR: char = '•';

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;
pub const LINE_HEIGHT: f32 = 1.3;

/// One mask character per grapheme, so "é" typed as two code points still
/// shows a single dot.
pub fn mask(value: &str) -> String {
    value.graphemes(true).map(|_| MASK_CHAR).collect()
}

/// Parse a decimal money amount into cents. Accepts an optional currency
/// symbol and grouping spaces, `.` or `,` as the decimal separator, and at
/// most two fraction digits. Negative amounts are rejected.
pub fn parse_cents(input: &str) -> Option<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '€' | '£' | '¥'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (whole, frac) = match cleaned.rfind(['.', ',']) {
        Some(i) => (&cleaned[..i], &cleaned[i + 1..]),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

pub fn approx_width(text: &str, size: f32) -> f32 {
    text.graphemes(true).count() as f32 * size * GLYPH_ADVANCE
}

pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT
}

/// Break `text` into lines. Embedded newlines always break; with a width,
/// words are packed greedily and a single overlong word gets its own line.
pub fn wrap_lines(text: &str, size: f32, max_width: Option<f32>) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let Some(max_w) = max_width.filter(|w| *w > 0.0) else {
            out.push(paragraph.to_string());
            continue;
        };
        let mut line = String::new();
        for word in paragraph.split_word_bounds() {
            let candidate_w = approx_width(&line, size) + approx_width(word, size);
            if !line.is_empty() && candidate_w > max_w {
                out.push(line.trim_end().to_string());
                line.clear();
                if word.trim().is_empty() {
                    continue;
                }
            }
            line.push_str(word);
        }
        out.push(line.trim_end().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_per_grapheme() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "•••");
        assert_eq!(mask("e\u{301}x"), "••");
    }

    #[test]
    fn parses_money() {
        assert_eq!(parse_cents("12"), Some(1200));
        assert_eq!(parse_cents("12.5"), Some(1250));
        assert_eq!(parse_cents("12,50"), Some(1250));
        assert_eq!(parse_cents(" $ 0.07 "), Some(7));
        assert_eq!(parse_cents(".5"), Some(50));
        assert_eq!(parse_cents("5."), Some(500));
    }

    #[test]
    fn rejects_bad_money() {
        assert_eq!(parse_cents(""), None);
        assert_eq!(parse_cents("."), None);
        assert_eq!(parse_cents("-3"), None);
        assert_eq!(parse_cents("1.234"), None);
        assert_eq!(parse_cents("abc"), None);
        assert_eq!(parse_cents("1.2.3"), None);
    }

    #[test]
    fn wraps_on_newlines_and_width() {
        assert_eq!(wrap_lines("a\nb", 10.0, None), ["a", "b"]);
        // 6px per glyph: "hello " fits in 40px, "world" goes to the next line.
        assert_eq!(wrap_lines("hello world", 10.0, Some(40.0)), ["hello", "world"]);
        assert_eq!(wrap_lines("", 10.0, Some(40.0)), [""]);
    }
}
