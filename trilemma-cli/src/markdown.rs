//! Markdown rendering of the generated analysis, for terminals and for HTML clients.

use owo_colors::{OwoColorize, Style};
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[derive(Default)]
struct Styles {
    strong: usize,
    emphasis: usize,
    heading: Option<HeadingLevel>,
    code_block: bool,
}

impl Styles {
    fn current(&self) -> Style {
        let mut style = Style::new();
        if self.strong > 0 {
            style = style.bold();
        }
        if self.emphasis > 0 {
            style = style.italic();
        }
        match self.heading {
            Some(HeadingLevel::H1) => style = style.bold().underline().cyan(),
            Some(_) => style = style.bold().cyan(),
            None => {}
        }
        if self.code_block {
            style = style.dimmed();
        }
        style
    }
}

/// Render markdown as plain text with list bullets and indentation; with
/// `color`, headings/emphasis/code get ANSI styling.
pub fn to_terminal(markdown: &str, color: bool) -> String {
    let mut out = String::new();
    let mut styles = Styles::default();
    // One entry per open list: the next item number, or None for bullets
    let mut lists: Vec<Option<u64>> = vec![];

    let push = |out: &mut String, text: &str, style: Style| {
        if color {
            out.push_str(&text.style(style).to_string());
        } else {
            out.push_str(text);
        }
    };

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                ensure_blank_line(&mut out);
                styles.heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                styles.heading = None;
                out.push_str("\n\n");
            }
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
            }
            Event::Start(Tag::Strong) => styles.strong += 1,
            Event::End(TagEnd::Strong) => styles.strong = styles.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => styles.emphasis += 1,
            Event::End(TagEnd::Emphasis) => styles.emphasis = styles.emphasis.saturating_sub(1),
            Event::Start(Tag::List(start)) => {
                if !lists.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                out.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                ensure_blank_line(&mut out);
                styles.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                styles.code_block = false;
                out.push('\n');
            }
            Event::Text(text) => push(&mut out, &text, styles.current()),
            Event::Code(code) => push(&mut out, &code, styles.current().yellow()),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                ensure_blank_line(&mut out);
                out.push_str("────────────────────\n\n");
            }
            _ => {}
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

fn ensure_blank_line(out: &mut String) {
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
}
