//! Wiki formatter: markdown to HTML with heading anchors and a table of
//! contents. Raw HTML in page sources is escaped, never passed through.

use std::collections::HashMap;
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::types::MarkdownResult;
use crate::utils::{escape_attr, escape_html};

struct Heading {
    level: u32,
    id: String,
    text: String,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Render wiki text to HTML
pub fn render_wiki_text(content: &str) -> MarkdownResult {
    let options = parser_options();
    let headings = collect_headings(content, options);

    let mut out = String::new();
    let mut idx = 0usize;
    let mut open: Vec<(u32, String)> = Vec::new();
    for ev in Parser::new_ext(content, options) {
        match ev {
            Event::Start(Tag::Heading { level, .. }) => {
                let lvl = heading_level_to_u32(level);
                let id = headings.get(idx).map(|h| h.id.clone()).unwrap_or_default();
                out.push_str(&format!("<h{} id=\"{}\">", lvl, escape_attr(&id)));
                open.push((lvl, id));
                idx += 1;
            }
            Event::End(TagEnd::Heading(level)) => {
                let (lvl, id) = open.pop().unwrap_or((heading_level_to_u32(level), String::new()));
                out.push_str(&format!(
                    concat!(
                        "<a class=\"hlink\" href=\"#{}\" ",
                        "aria-label=\"Link to this section\">#</a></h{}>",
                    ),
                    escape_attr(&id),
                    lvl
                ));
            }
            // Safe mode: markup in the source is shown, not interpreted.
            Event::Html(raw) | Event::InlineHtml(raw) => {
                html::push_html(&mut out, std::iter::once(Event::Text(raw)))
            }
            _ => html::push_html(&mut out, std::iter::once(ev)),
        }
    }

    MarkdownResult {
        html: out,
        toc: build_toc_html(&headings),
        title: first_heading_text(&headings),
    }
}

fn collect_headings(content: &str, options: Options) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_heading: Option<u32> = None;
    let mut buf = String::new();
    let mut id_counts: HashMap<String, usize> = HashMap::new();

    for ev in Parser::new_ext(content, options) {
        match ev {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = Some(heading_level_to_u32(level));
                buf.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(level) = in_heading.take() {
                    let mut id = slugify(&buf);
                    if id.is_empty() {
                        id = format!("h{}", level);
                    }
                    let count = id_counts.entry(id.clone()).or_insert(0);
                    if *count > 0 {
                        id = format!("{}-{}", id, *count);
                    }
                    *count += 1;
                    headings.push(Heading { level, id, text: buf.clone() });
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if in_heading.is_some() {
                    buf.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_heading.is_some() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
    headings
}

/// Build HTML for the Table of Contents
fn build_toc_html(headings: &[Heading]) -> String {
    if headings.is_empty() {
        return String::new();
    }
    let mut html = String::from("<nav class=\"toc\"><div class=\"toc-title\">Contents</div>");
    let mut current = 0u32;
    for heading in headings {
        while current < heading.level {
            html.push_str("<ul>");
            current += 1;
        }
        while current > heading.level {
            html.push_str("</ul>");
            current -= 1;
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>",
            escape_attr(&heading.id),
            escape_html(&heading.text)
        ));
    }
    while current > 0 {
        html.push_str("</ul>");
        current -= 1;
    }
    html.push_str("</nav>");
    html
}

fn heading_level_to_u32(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Create URL-friendly slug from text
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = false;
    for ch in text.chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if (c.is_ascii_whitespace() || c == '-' || c == '_')
            && !last_dash
            && !out.is_empty()
        {
            out.push('-');
            last_dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

fn first_heading_text(headings: &[Heading]) -> Option<String> {
    headings
        .iter()
        .find(|h| h.level == 1 && !h.text.trim().is_empty())
        .map(|h| h.text.clone())
}
