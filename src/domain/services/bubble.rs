#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

// Unicode border characters plus inner padding on both sides.
const BUBBLE_PADDING: usize = 8;
// Left border + left padding + right padding + right border + scrollbar.
const BORDER_ELEMENTS: usize = 5;
const OUTER_PADDING_PERCENTAGE: f32 = 0.04;

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

fn fill_spaces(count: usize) -> String {
    return " ".repeat(count);
}

impl<'a> Bubble<'_> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'a>> {
        let max_line_length = self.get_max_line_length();
        let mut lines: Vec<Line> = vec![];

        for text_line in self.wrapped_lines(max_line_length) {
            lines.push(self.format_line(text_line, max_line_length));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn wrapped_lines(&self, max_line_length: usize) -> Vec<String> {
        let mut lines: Vec<String> = vec![];

        for full_line in self.message.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_words: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > max_line_length && !current_words.is_empty() {
                    lines.push(current_words.join(" ").trim_end().to_string());
                    current_words = vec![];
                    char_count = 0;
                }

                current_words.push(word);
                char_count += word.len() + 1;
            }
            if !current_words.is_empty() {
                lines.push(current_words.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }

    fn format_line(&self, text: String, max_line_length: usize) -> Line<'a> {
        let line_length = text.chars().count().min(max_line_length);
        let fill = fill_spaces(max_line_length - line_length);
        let formatted_line_length = line_length + fill.len() + BUBBLE_PADDING;

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::styled(text, Style::default()),
            self.highlight_span(format!("{fill} │")),
        ];

        let outer_padding =
            fill_spaces(self.window_max_width.saturating_sub(formatted_line_length));

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_padding)];
        line_spans.append(&mut spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        // Keep a minimum 4% of padding on the outer side.
        let min_outer_padding =
            ((self.window_max_width as f32 * OUTER_PADDING_PERCENTAGE).ceil()) as usize;
        let line_border_width = BORDER_ELEMENTS + min_outer_padding;

        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| return line.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        let available = self.window_max_width.saturating_sub(line_border_width);
        if max_line_length > available {
            max_line_length = available.max(1);
        }

        let username = self.message.author.to_string();
        if max_line_length < username.chars().count() {
            max_line_length = username.chars().count();
        }

        if let Some(timestamp) = &self.message.timestamp {
            if max_line_length < timestamp.chars().count() {
                max_line_length = timestamp.chars().count();
            }
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(&self, lines: Vec<Line<'a>>, max_line_length: usize) -> Vec<Line<'a>> {
        // Add 2 for the inner padding columns.
        let inner_width = max_line_length + 2;
        let username = self.message.author.to_string();

        let top_bar = format!(
            "╭{username}{}╮",
            ["─"]
                .repeat(inner_width.saturating_sub(username.chars().count()))
                .join("")
        );

        let bottom_bar = match &self.message.timestamp {
            Some(timestamp) => format!(
                "╰{}{timestamp}╯",
                ["─"]
                    .repeat(inner_width.saturating_sub(timestamp.chars().count()))
                    .join("")
            ),
            None => format!("╰{}╯", ["─"].repeat(inner_width).join("")),
        };

        let bar_padding = fill_spaces(
            self.window_max_width
                .saturating_sub(max_line_length + BUBBLE_PADDING),
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        } else if self.message.author == Author::Finbot {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Blue),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'a> {
        return Line::from(self.highlight_span(text));
    }
}
