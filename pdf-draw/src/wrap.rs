use crate::fonts::{FontMetrics, TextStyle};

/// Word-wrap one paragraph (no newlines) into lines no wider than
/// `max_width` points.
///
/// Words are separated by whitespace; a word wider than the whole line is
/// broken between characters. An empty or blank paragraph yields a single
/// empty line.
pub fn wrap_text(text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let space = measure(" ", style);

    for word in text.split_whitespace() {
        let word_w = measure(word, style);
        if current.is_empty() {
            place_word(word, max_width, style, &mut current, &mut lines);
            continue;
        }
        if measure(&current, style) + space + word_w <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            place_word(word, max_width, style, &mut current, &mut lines);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Start a fresh line with `word`, breaking it when it cannot fit. Full
/// pieces go to `lines`; the remainder stays in `current`.
fn place_word(
    word: &str,
    max_width: f64,
    style: &TextStyle,
    current: &mut String,
    lines: &mut Vec<String>,
) {
    let mut pieces = break_word(word, max_width, style);
    *current = pieces.pop().unwrap_or_default();
    lines.extend(pieces);
}

/// Split a word into pieces that each fit within `max_width`. A piece
/// always holds at least one character.
pub fn break_word(word: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let ch_w = FontMetrics::char_width(style.font, ch) as f64 * style.font_size / 1000.0;
        if width + ch_w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn measure(text: &str, style: &TextStyle) -> f64 {
    style.measure(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_one_empty_line() {
        assert_eq!(wrap_text("", 100.0, &TextStyle::regular(12.0)), vec![String::new()]);
        assert_eq!(wrap_text("   ", 100.0, &TextStyle::regular(12.0)), vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("Red bricks", 500.0, &TextStyle::regular(12.0));
        assert_eq!(lines, vec!["Red bricks".to_string()]);
    }

    #[test]
    fn long_word_is_broken_between_characters() {
        let style = TextStyle::regular(10.0);
        // "0" is 5.56pt at 10pt, so 3 fit in 17pt.
        let pieces = break_word("0000000", 17.0, &style);
        assert_eq!(pieces, vec!["000", "000", "0"]);
    }

    #[test]
    fn lines_never_exceed_width() {
        let style = TextStyle::regular(14.0);
        let text = "Cement bags premium grade delivered to the site with extra long unloading instructions";
        for line in wrap_text(text, 120.0, &style) {
            assert!(style.measure(&line) <= 120.0, "too wide: {}", line);
        }
    }
}
