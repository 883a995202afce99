// Pure functions that turn engine state into markup. The host decides how to
// put it on screen.

use crate::{Suggestion, WidgetSettings};
use regex::RegexBuilder;

pub const SUGGESTION_CLASS: &str = "autocomplete-suggestion";
pub const SELECTED_CLASS: &str = "autocomplete-selected";
pub const NO_SUGGESTION_CLASS: &str = "autocomplete-no-suggestion";

/// `(suggestion, query) -> markup` used for every row.
pub type FormatResult = Box<dyn Fn(&Suggestion, &str) -> String>;

/// What the suggestion container should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Hidden,
    Suggestions(Vec<Row>),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub markup: String,
    pub selected: bool,
}

/// Default row formatter: escapes the value and wraps every case-insensitive
/// occurrence of `query` in `<strong>`.
pub fn format_result(suggestion: &Suggestion, query: &str) -> String {
    let value = &suggestion.value;
    if query.is_empty() {
        return escape_html(value);
    }
    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(p) => p,
        Err(_) => return escape_html(value),
    };

    let mut out = String::with_capacity(value.len() + 17);
    let mut last = 0;
    for m in pattern.find_iter(value) {
        out.push_str(&escape_html(&value[last..m.start()]));
        out.push_str("<strong>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</strong>");
        last = m.end();
    }
    out.push_str(&escape_html(&value[last..]));
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inner HTML of the suggestion container.
pub fn render_container(view: &View) -> String {
    match view {
        View::Hidden => String::new(),
        View::Notice(text) => format!(
            "<div class=\"{}\">{}</div>",
            NO_SUGGESTION_CLASS,
            escape_html(text)
        ),
        View::Suggestions(rows) => rows
            .iter()
            .map(|row| {
                let class = if row.selected {
                    format!("{} {}", SUGGESTION_CLASS, SELECTED_CLASS)
                } else {
                    SUGGESTION_CLASS.to_string()
                };
                format!(
                    "<div class=\"{}\" data-index=\"{}\">{}</div>",
                    class, row.index, row.markup
                )
            })
            .collect(),
    }
}

/// Inline style for the container element. `width` comes from
/// `placement::container_width`.
pub fn container_style(settings: &WidgetSettings, width: Option<f64>) -> String {
    let mut style = format!(
        "position: absolute; max-height: {}px; z-index: {};",
        settings.max_height, settings.z_index
    );
    if let Some(w) = width {
        style.push_str(&format!(" width: {}px;", w));
    }
    style
}
