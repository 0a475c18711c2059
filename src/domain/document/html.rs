//! Markup tree to a self-contained, print-ready HTML page.

use super::markup::{Column, Element, Entry, Item, Markup, Section, SectionKind};

const STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; background: white; font-size: 12px; }
.container { max-width: 800px; margin: 0 auto; }
.header { text-align: center; margin-bottom: 24px; border-bottom: 3px solid #2563eb; padding-bottom: 16px; }
.name { font-size: 30px; font-weight: bold; color: #1e40af; margin-bottom: 8px; }
.contact-info { font-size: 13px; color: #666; }
.contact-item { display: inline-block; margin: 0 10px; }
.section { margin-bottom: 24px; page-break-inside: avoid; }
.section-title { font-size: 18px; font-weight: bold; color: #1e40af; border-bottom: 2px solid #e5e7eb; padding-bottom: 4px; margin-bottom: 12px; text-transform: uppercase; letter-spacing: 1px; }
.entry { margin-bottom: 16px; }
.entry-title { font-size: 15px; font-weight: bold; color: #1f2937; }
.entry-subtitle { font-size: 14px; color: #2563eb; font-weight: 600; }
.entry-meta { font-size: 12px; color: #6b7280; font-style: italic; margin-bottom: 6px; }
.description { margin-bottom: 6px; }
ul { margin-left: 18px; }
.skill-category { margin-bottom: 10px; }
.skill-category-title { font-weight: bold; color: #374151; margin-bottom: 4px; }
.skill-item { display: inline-block; background: #f3f4f6; border-radius: 4px; padding: 2px 8px; margin: 2px; }
.note { color: #6b7280; font-size: 11px; margin-left: 4px; }
.two-column { width: 100%; }
.two-column td { width: 50%; vertical-align: top; padding-right: 16px; }
"#;

/// Serializes a markup tree. All text content is escaped.
pub fn to_html(markup: &Markup) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&markup.title)));
    out.push_str("<style>");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    for section in &markup.sections {
        write_section(&mut out, section);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_section(out: &mut String, section: &Section) {
    let class = match section.kind {
        SectionKind::Header => "header",
        SectionKind::LanguagesAndCertifications => "section columns",
        _ => "section",
    };
    out.push_str(&format!("<div class=\"{}\">\n", class));

    if let Some(heading) = &section.heading {
        out.push_str(&format!(
            "<div class=\"section-title\">{}</div>\n",
            escape(heading)
        ));
    }
    for element in &section.elements {
        write_element(out, element);
    }

    out.push_str("</div>\n");
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Name(name) => {
            out.push_str(&format!("<div class=\"name\">{}</div>\n", escape(name)));
        }
        Element::InlineList(items) => {
            out.push_str("<div class=\"contact-info\">");
            for item in items {
                out.push_str(&format!(
                    "<span class=\"contact-item\">{}</span>",
                    escape(item)
                ));
            }
            out.push_str("</div>\n");
        }
        Element::Paragraph(text) => {
            out.push_str(&format!(
                "<div class=\"description\">{}</div>\n",
                escape(text)
            ));
        }
        Element::Entry(entry) => write_entry(out, entry),
        Element::Group { label, items } => {
            out.push_str("<div class=\"skill-category\">");
            out.push_str(&format!(
                "<div class=\"skill-category-title\">{}</div>",
                escape(label)
            ));
            for item in items {
                write_item(out, "skill-item", item);
            }
            out.push_str("</div>\n");
        }
        Element::Columns(columns) => write_columns(out, columns),
        Element::BulletList { caption, items } => {
            if let Some(caption) = caption {
                out.push_str(&format!("<strong>{}</strong>\n", escape(caption)));
            }
            out.push_str("<ul>");
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape(item)));
            }
            out.push_str("</ul>\n");
        }
    }
}

fn write_entry(out: &mut String, entry: &Entry) {
    out.push_str("<div class=\"entry\">\n");
    out.push_str(&format!(
        "<div class=\"entry-title\">{}</div>\n",
        escape(&entry.title)
    ));
    if let Some(subtitle) = &entry.subtitle {
        out.push_str(&format!(
            "<div class=\"entry-subtitle\">{}</div>\n",
            escape(subtitle)
        ));
    }
    if let Some(meta) = &entry.meta {
        out.push_str(&format!(
            "<div class=\"entry-meta\">{}</div>\n",
            escape(meta)
        ));
    }
    for element in &entry.body {
        write_element(out, element);
    }
    out.push_str("</div>\n");
}

// Table layout: the print engine has no reliable grid support.
fn write_columns(out: &mut String, columns: &[Column]) {
    out.push_str("<table class=\"two-column\"><tr>\n");
    for column in columns {
        out.push_str("<td>");
        out.push_str(&format!(
            "<div class=\"section-title\">{}</div>",
            escape(&column.heading)
        ));
        for item in &column.items {
            write_item(out, "list-item", item);
        }
        out.push_str("</td>\n");
    }
    out.push_str("</tr></table>\n");
}

fn write_item(out: &mut String, class: &str, item: &Item) {
    out.push_str(&format!("<div class=\"{}\"><strong>{}</strong>", class, escape(&item.label)));
    for note in &item.notes {
        out.push_str(&format!("<span class=\"note\">{}</span>", escape(note)));
    }
    out.push_str("</div>");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
