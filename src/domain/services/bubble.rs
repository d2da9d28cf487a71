#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use super::MarkupRenderer;
use crate::domain::models::MarkupBlock;
use crate::domain::models::MarkupSpan;
use crate::domain::models::Message;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct BubbleConfig {
    /// Left border + left padding + right padding + right border.
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

/// One chat message drawn as a bordered box of terminal lines.
pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    title: String,
    window_max_width: usize,
}

fn span_width(span: &Span) -> usize {
    return span.content.as_ref().width();
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        title: &str,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            title: title.to_string(),
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            border_elements_length: 4,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let rows = self.content_rows();
        let max_line_length = self.get_max_line_length(&rows);

        let lines = rows
            .into_iter()
            .flat_map(|row| return self.wrap_row(row, max_line_length))
            .map(|spans| return self.spans_to_line(spans, max_line_length))
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    /// Unwrapped rows of styled text, one per source line.
    fn content_rows(&self) -> Vec<Vec<Span<'static>>> {
        if self.message.is_pending() {
            return vec![vec![Span::styled(
                "Thinking...",
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            )]];
        }

        if self.message.role == Role::User {
            return self
                .message
                .text
                .split('\n')
                .map(|line| return vec![Span::raw(line.replace('\t', "  "))])
                .collect();
        }

        return MarkupRenderer::render(&self.message.text)
            .iter()
            .map(|block| return block_to_spans(block))
            .collect();
    }

    fn wrap_row(&self, row: Vec<Span<'static>>, max_line_length: usize) -> Vec<Vec<Span<'static>>> {
        let mut lines = vec![];
        let mut current: Vec<Span> = vec![];
        let mut line_width = 0;

        for span in row {
            let style = span.style;
            let mut chunk = String::new();

            for (idx, word) in span.content.split(' ').enumerate() {
                let mut piece = if idx == 0 {
                    word.to_string()
                } else {
                    format!(" {word}")
                };

                if line_width > 0 && line_width + piece.width() > max_line_length {
                    if !chunk.is_empty() {
                        current.push(Span::styled(chunk, style));
                        chunk = String::new();
                    }
                    lines.push(current);
                    current = vec![];
                    line_width = 0;
                    piece = piece.trim_start().to_string();
                }

                // Only words wider than a whole line break here.
                for ch in piece.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if line_width > 0 && line_width + ch_width > max_line_length {
                        if !chunk.is_empty() {
                            current.push(Span::styled(chunk, style));
                            chunk = String::new();
                        }
                        lines.push(current);
                        current = vec![];
                        line_width = 0;
                    }

                    line_width += ch_width;
                    chunk.push(ch);
                }
            }

            if !chunk.is_empty() {
                current.push(Span::styled(chunk, style));
            }
        }

        lines.push(current);
        return lines;
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let line_width: usize = spans.iter().map(span_width).sum();
        let fill = " ".repeat(max_line_length.saturating_sub(line_width));

        let mut wrapped_spans = vec![self.border_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.border_span(format!("{fill} │")));

        return self.align(wrapped_spans, max_line_length);
    }

    fn get_max_line_length(&self, rows: &[Vec<Span<'static>>]) -> usize {
        let style_config = Bubble::style_config();
        // Keep a minimum gap on the far side, plus a column for the scrollbar.
        let min_outer_padding = (self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil() as usize
            + 1;
        let available = self
            .window_max_width
            .saturating_sub(style_config.border_elements_length + min_outer_padding);

        let longest_row = rows
            .iter()
            .map(|row| return row.iter().map(span_width).sum::<usize>())
            .max()
            .unwrap_or_default();

        return longest_row.min(available).max(self.title.width());
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the padding next to each vertical bar.
        let bar_length = max_line_length + 2;
        let top_fill = "─".repeat(bar_length.saturating_sub(self.title.width()));
        let bottom_fill = "─".repeat(bar_length);

        let top = vec![
            self.border_span("╭".to_string()),
            Span::styled(
                self.title.to_string(),
                self.border_style().add_modifier(Modifier::BOLD),
            ),
            self.border_span(format!("{top_fill}╮")),
        ];
        let bottom = vec![self.border_span(format!("╰{bottom_fill}╯"))];

        let mut res = vec![self.align(top, max_line_length)];
        res.extend(lines);
        res.push(self.align(bottom, max_line_length));

        return res;
    }

    /// Pads a full bubble row out to the window width on the far side.
    fn align(&self, spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let bubble_width = max_line_length + Bubble::style_config().border_elements_length;
        let outer_padding = Span::raw(" ".repeat(self.window_max_width.saturating_sub(bubble_width)));

        if self.alignment == BubbleAlignment::Left {
            let mut line_spans = spans;
            line_spans.push(outer_padding);
            return Line::from(line_spans);
        }

        let mut line_spans = vec![outer_padding];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn border_style(&self) -> Style {
        if self.message.role == Role::Assistant {
            return Style {
                fg: Some(Color::Green),
                ..Style::default()
            };
        }

        return Style::default();
    }

    fn border_span(&self, text: String) -> Span<'static> {
        return Span::styled(text, self.border_style());
    }
}

fn block_to_spans(block: &MarkupBlock) -> Vec<Span<'static>> {
    let mut spans = match block {
        MarkupBlock::Spacer => return vec![],
        MarkupBlock::Bullet(_) => vec![Span::raw("• ")],
        MarkupBlock::Ordered { numeral, .. } => vec![Span::raw(format!("{numeral}. "))],
        MarkupBlock::Paragraph(_) => vec![],
    };

    for span in block.spans() {
        let styled = match span {
            MarkupSpan::Literal(text) => Span::raw(text.to_string()),
            MarkupSpan::Bold(text) => Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            MarkupSpan::Italic(text) => Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        };
        spans.push(styled);
    }

    return spans;
}
