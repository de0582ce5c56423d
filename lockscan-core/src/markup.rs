use serde::{Deserialize, Serialize};

/// Rich-text dialect of the delivered report. Only bold and monospace are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    #[default]
    Plain,
    Html,
    Markdown,
}

impl Markup {
    pub fn bold(&self, text: &str) -> String {
        match self {
            Markup::Plain => text.to_string(),
            Markup::Html => format!("<b>{}</b>", escape_html(text)),
            Markup::Markdown => format!("**{}**", text),
        }
    }

    pub fn code(&self, text: &str) -> String {
        match self {
            Markup::Plain => text.to_string(),
            Markup::Html => format!("<code>{}</code>", escape_html(text)),
            Markup::Markdown => format!("`{}`", text),
        }
    }

    /// Free text between marked-up spans.
    pub fn text(&self, text: &str) -> String {
        match self {
            Markup::Html => escape_html(text),
            Markup::Plain | Markup::Markdown => text.to_string(),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_code() {
        assert_eq!(Markup::Plain.bold("x"), "x");
        assert_eq!(Markup::Html.bold("x"), "<b>x</b>");
        assert_eq!(Markup::Markdown.code("1-2-3"), "`1-2-3`");
        assert_eq!(Markup::Html.code("a<b"), "<code>a&lt;b</code>");
    }

    #[test]
    fn test_text_escapes_only_html() {
        assert_eq!(Markup::Html.text("1 < 2 & 3"), "1 &lt; 2 &amp; 3");
        assert_eq!(Markup::Plain.text("1 < 2"), "1 < 2");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Markup::Html).unwrap(), "\"html\"");
        let m: Markup = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(m, Markup::Markdown);
    }
}
