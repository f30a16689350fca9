//! Read-only markdown preview.
//!
//! `parse` flattens markdown into a list of blocks; `show` draws them.

use egui::{RichText, Stroke, Ui};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use slowcore::theme::{SlowColors, SlowTheme};

/// A run of inline text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub strike: bool,
    pub code: bool,
    pub link: Option<String>,
}

impl Span {
    fn same_style(&self, other: &Span) -> bool {
        self.strong == other.strong
            && self.emphasis == other.emphasis
            && self.strike == other.strike
            && self.code == other.code
            && self.link == other.link
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Ordered(u64),
    Task(bool),
    /// Later paragraphs of the same item
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph { quote_depth: usize, spans: Vec<Span> },
    ListItem { depth: usize, marker: ListMarker, quote_depth: usize, spans: Vec<Span> },
    Code { language: Option<String>, text: String },
    Rule,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    strike: usize,
    link: Option<String>,
    heading: Option<u8>,
    quote_depth: usize,
    /// Next number for each open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    item_marker: Option<ListMarker>,
    code: Option<(Option<String>, String)>,
}

impl BlockBuilder {
    fn push_text(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        let span = Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strike: self.strike > 0,
            code,
            link: self.link.clone(),
        };
        match self.spans.last_mut() {
            Some(last) if last.same_style(&span) => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    /// Close the text collected so far into a block.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let block = if let Some(level) = self.heading {
            Block::Heading { level, spans }
        } else if !self.lists.is_empty() {
            Block::ListItem {
                depth: self.lists.len() - 1,
                marker: self.item_marker.replace(ListMarker::Continuation).unwrap_or(ListMarker::Continuation),
                quote_depth: self.quote_depth,
                spans,
            }
        } else {
            Block::Paragraph { quote_depth: self.quote_depth, spans }
        };
        self.blocks.push(block);
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(level as u8);
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|s| s.to_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let n = *next;
                        *next += 1;
                        ListMarker::Ordered(n)
                    }
                    _ => ListMarker::Bullet,
                };
                self.item_marker = Some(marker);
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading { .. } => {
                self.flush();
                self.heading = None;
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut text)) = self.code.take() {
                    if text.ends_with('\n') {
                        text.pop();
                    }
                    self.blocks.push(Block::Code { language, text });
                }
            }
            TagEnd::List { .. } => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => {
                self.flush();
                self.item_marker = None;
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => self.link = None,
            _ => {}
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.code.as_mut() {
                Some((_, code)) => code.push_str(&text),
                None => self.push_text(&text, false),
            },
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(html.trim_end(), false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block::Rule);
            }
            Event::TaskListMarker(checked) => self.item_marker = Some(ListMarker::Task(checked)),
            _ => {}
        }
    }
}

pub fn parse(markdown: &str) -> Vec<Block> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.flush();
    builder.blocks
}

fn show_spans(ui: &mut Ui, spans: &[Span], size: f32, force_strong: bool) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let mut text = RichText::new(&span.text).size(size);
            if span.strong || force_strong {
                text = text.strong();
            }
            if span.emphasis {
                text = text.italics();
            }
            if span.strike {
                text = text.strikethrough();
            }
            if span.code {
                text = text.code();
            }
            match &span.link {
                Some(url) => {
                    ui.hyperlink_to(text.underline(), url);
                }
                None => {
                    ui.label(text);
                }
            }
        }
    });
}

/// Draw a quote bar for each level of nesting to the left of `rect`.
fn paint_quote_bars(ui: &Ui, rect: egui::Rect, depth: usize) {
    for level in 0..depth {
        let x = rect.left() - 6.0 - level as f32 * 8.0;
        ui.painter().vline(x, rect.y_range(), Stroke::new(2.0, SlowColors::BLACK));
    }
}

pub fn show(ui: &mut Ui, blocks: &[Block], theme: &SlowTheme) {
    let body = theme.font_size_body;
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                ui.add_space(4.0);
                show_spans(ui, spans, theme.heading_size(*level), true);
                if *level == 1 {
                    let rect = ui.min_rect();
                    ui.painter().hline(
                        rect.x_range(),
                        ui.cursor().top(),
                        Stroke::new(2.0, SlowColors::BLACK),
                    );
                    ui.add_space(4.0);
                }
            }
            Block::Paragraph { quote_depth, spans } => {
                let indent = *quote_depth as f32 * 8.0;
                let response = ui.horizontal(|ui| {
                    ui.add_space(indent + if *quote_depth > 0 { 6.0 } else { 0.0 });
                    ui.vertical(|ui| show_spans(ui, spans, body, false)).response
                });
                paint_quote_bars(ui, response.inner.rect, *quote_depth);
            }
            Block::ListItem { depth, marker, quote_depth, spans } => {
                let indent = (*depth as f32 + 1.0) * 14.0 + *quote_depth as f32 * 8.0;
                let bullet = match marker {
                    ListMarker::Bullet => "•".to_string(),
                    ListMarker::Ordered(n) => format!("{}.", n),
                    ListMarker::Task(true) => "☑".to_string(),
                    ListMarker::Task(false) => "☐".to_string(),
                    ListMarker::Continuation => String::new(),
                };
                ui.horizontal(|ui| {
                    ui.add_space(indent - 14.0);
                    ui.add_sized([14.0, body], egui::Label::new(RichText::new(bullet).size(body)));
                    ui.vertical(|ui| show_spans(ui, spans, body, false));
                });
            }
            Block::Code { text, .. } => {
                egui::Frame::none()
                    .stroke(Stroke::new(1.0, SlowColors::BLACK))
                    .inner_margin(egui::Margin::same(6.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(text).monospace());
                    });
            }
            Block::Rule => {
                ui.separator();
            }
        }
        ui.add_space(theme.item_spacing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Span {
        Span { text: text.to_string(), ..Default::default() }
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let blocks = parse("# Title\n\nSome text\nwrapped.\n\n### Small");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, spans: vec![plain("Title")] },
                Block::Paragraph { quote_depth: 0, spans: vec![plain("Some text wrapped.")] },
                Block::Heading { level: 3, spans: vec![plain("Small")] },
            ]
        );
    }

    #[test]
    fn test_inline_styles() {
        let blocks = parse("a **bold** and *soft* ~~gone~~ `x`");
        let Block::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph, got {:?}", blocks[0]);
        };
        assert_eq!(spans[0], plain("a "));
        assert!(spans[1].strong && spans[1].text == "bold");
        assert!(spans[3].emphasis && spans[3].text == "soft");
        assert!(spans[5].strike && spans[5].text == "gone");
        assert!(spans[7].code && spans[7].text == "x");
    }

    #[test]
    fn test_links() {
        let blocks = parse("see [the site](https://example.com) now");
        let Block::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].text, "the site");
        assert_eq!(spans[1].link.as_deref(), Some("https://example.com"));
        assert_eq!(spans[2].link, None);
    }

    #[test]
    fn test_lists() {
        let blocks = parse("- one\n- two\n  - nested\n\n3. three\n4. four\n\n- [x] done\n- [ ] todo\n");
        let items: Vec<(usize, ListMarker, String)> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { depth, marker, spans, .. } => {
                    Some((*depth, *marker, spans.iter().map(|s| s.text.as_str()).collect()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            items,
            vec![
                (0, ListMarker::Bullet, "one".to_string()),
                (0, ListMarker::Bullet, "two".to_string()),
                (1, ListMarker::Bullet, "nested".to_string()),
                (0, ListMarker::Ordered(3), "three".to_string()),
                (0, ListMarker::Ordered(4), "four".to_string()),
                (0, ListMarker::Task(true), "done".to_string()),
                (0, ListMarker::Task(false), "todo".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_block_and_rule() {
        let blocks = parse("```rust\nfn main() {}\n```\n\n---\n");
        assert_eq!(
            blocks,
            vec![
                Block::Code { language: Some("rust".into()), text: "fn main() {}".into() },
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_block_quote_depth() {
        let blocks = parse("> outer\n>\n> > inner\n");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph { quote_depth: 1, spans: vec![plain("outer")] },
                Block::Paragraph { quote_depth: 2, spans: vec![plain("inner")] },
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }
}
