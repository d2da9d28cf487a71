#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;

use crate::domain::models::MarkupBlock;
use crate::domain::models::MarkupSpan;

const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

/// Turns assistant text into blocks, one per line.
///
/// The renderer understands a deliberately small subset of markdown:
/// bullets (`-`, `*`, `•`), numbered items (`1.`), `**bold**` and `*italic*`.
/// Anything else is passed through as literal paragraph text, and the output
/// never carries raw markup, so it is safe to hand to any drawing surface.
pub struct MarkupRenderer {}

impl MarkupRenderer {
    pub fn render(text: &str) -> Vec<MarkupBlock> {
        return text
            .split('\n')
            .map(|line| return MarkupRenderer::classify(line))
            .collect();
    }

    fn classify(line: &str) -> MarkupBlock {
        if line.trim().is_empty() {
            return MarkupBlock::Spacer;
        }

        if let Some(rest) = bullet_remainder(line) {
            return MarkupBlock::Bullet(MarkupRenderer::format_inline(rest));
        }

        if let Some((numeral, rest)) = ordered_remainder(line) {
            return MarkupBlock::Ordered {
                numeral: numeral.to_string(),
                spans: MarkupRenderer::format_inline(rest),
            };
        }

        return MarkupBlock::Paragraph(MarkupRenderer::format_inline(line));
    }

    /// Bold spans are pulled out first. Italic matching only ever looks at
    /// the literal segments left over, so `*` inside bold text is kept as-is.
    pub fn format_inline(text: &str) -> Vec<MarkupSpan> {
        let mut spans = vec![];

        for (is_bold, segment) in split_delimited(text, "**") {
            if is_bold {
                spans.push(MarkupSpan::Bold(segment.to_string()));
                continue;
            }

            for (is_italic, inner) in split_delimited(segment, "*") {
                if is_italic {
                    spans.push(MarkupSpan::Italic(inner.to_string()));
                } else {
                    spans.push(MarkupSpan::Literal(inner.to_string()));
                }
            }
        }

        return spans;
    }
}

fn is_line_break(ch: char) -> bool {
    return matches!(ch, '\r' | '\u{2028}' | '\u{2029}');
}

/// Whitespace after a list marker, then at least one more character. The
/// whitespace run gives back its last characters when nothing else follows,
/// so `"-  "` keeps a single space as content. Content stops at a line break.
fn after_marker_whitespace(rest: &str) -> Option<&str> {
    let lead_len = rest.len() - rest.trim_start().len();
    if lead_len == 0 {
        return None;
    }

    let start = rest
        .char_indices()
        .take_while(|(idx, _)| return *idx <= lead_len)
        .filter(|(idx, ch)| return *idx > 0 && !is_line_break(*ch))
        .map(|(idx, _)| return idx)
        .last()?;

    let content = &rest[start..];
    let end = content.find(is_line_break).unwrap_or(content.len());
    return Some(&content[..end]);
}

fn bullet_remainder(line: &str) -> Option<&str> {
    let marker = line.chars().next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }

    return after_marker_whitespace(&line[marker.len_utf8()..]);
}

fn ordered_remainder(line: &str) -> Option<(&str, &str)> {
    let digits_len = line
        .bytes()
        .take_while(|e| return e.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }

    let rest = line[digits_len..].strip_prefix('.')?;
    let remainder = after_marker_whitespace(rest)?;

    return Some((&line[..digits_len], remainder));
}

/// Splits `text` into `(matched, segment)` pairs, where matched segments were
/// wrapped in `delim` on both sides. Matching is leftmost and minimal, a match
/// holds at least one character, and matches never overlap. Delimiters with
/// no partner stay inside the neighbouring literal segment.
fn split_delimited<'a>(text: &'a str, delim: &str) -> Vec<(bool, &'a str)> {
    let mut segments = vec![];
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(delim) {
        let open = cursor + offset;
        let content_start = open + delim.len();
        let first = match text[content_start..].chars().next() {
            Some(first) => first,
            None => break,
        };

        let search_from = content_start + first.len_utf8();
        match text[search_from..].find(delim) {
            Some(close_offset) => {
                let close = search_from + close_offset;
                if open > literal_start {
                    segments.push((false, &text[literal_start..open]));
                }
                segments.push((true, &text[content_start..close]));

                cursor = close + delim.len();
                literal_start = cursor;
            }
            None => {
                // Try the next position, the way a regex scan would.
                cursor = open + 1;
            }
        }
    }

    if literal_start < text.len() {
        segments.push((false, &text[literal_start..]));
    }

    return segments;
}
