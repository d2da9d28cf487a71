use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A run of inline text with at most one emphasis applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupSpan {
    Literal(String),
    Bold(String),
    Italic(String),
}

impl MarkupSpan {
    pub fn text(&self) -> &str {
        match self {
            MarkupSpan::Literal(text) => return text,
            MarkupSpan::Bold(text) => return text,
            MarkupSpan::Italic(text) => return text,
        }
    }
}

/// One rendered line of an assistant message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupBlock {
    Spacer,
    Bullet(Vec<MarkupSpan>),
    Ordered {
        numeral: String,
        spans: Vec<MarkupSpan>,
    },
    Paragraph(Vec<MarkupSpan>),
}

impl MarkupBlock {
    pub fn spans(&self) -> &[MarkupSpan] {
        match self {
            MarkupBlock::Spacer => return &[],
            MarkupBlock::Bullet(spans) => return spans,
            MarkupBlock::Ordered { spans, .. } => return spans,
            MarkupBlock::Paragraph(spans) => return spans,
        }
    }

    /// Visible text of the block with emphasis dropped.
    pub fn plain_text(&self) -> String {
        return self
            .spans()
            .iter()
            .map(|span| return span.text())
            .collect::<Vec<&str>>()
            .join("");
    }
}
