use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;
use crate::domain::models::Role;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

pub const ASSISTANT_TITLE: &str = "PRAXIS AI";

struct BubbleCacheEntry {
    text: String,
    pending: bool,
    lines: Vec<Line<'static>>,
}

impl BubbleCacheEntry {
    fn matches(&self, message: &Message) -> bool {
        return self.pending == message.is_pending() && self.text == message.text;
    }
}

pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

fn user_title() -> String {
    let username = Config::get(ConfigKey::Username);
    if username.is_empty() {
        return "User".to_string();
    }

    return username;
}

impl BubbleList {
    pub fn new() -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
        };
    }

    /// Rebuilds lines for messages that changed since the last call. A scope
    /// reset shrinks the list, so entries past the end are dropped.
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.retain(|idx, _| return *idx < messages.len());

        let user_title = user_title();
        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.matches(message) {
                        return cache_entry.lines.len();
                    }
                }

                let (align, title) = match message.role {
                    Role::User => (BubbleAlignment::Right, user_title.as_str()),
                    Role::Assistant => (BubbleAlignment::Left, ASSISTANT_TITLE),
                };

                let bubble_lines = Bubble::new(message, align, title, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        text: message.text.to_string(),
                        pending: message.is_pending(),
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
