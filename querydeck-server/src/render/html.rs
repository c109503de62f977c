//! Escaping HTML builder and the shared document shell.
//!
//! [`Markup`] only accepts raw text as `&'static str`, so template fragments
//! compiled into the binary are the only thing that reaches the output
//! unescaped. Anything else goes through [`Markup::text`].

use std::fmt::{self, Write as _};

use crate::db::Row;

/// Escape `text` for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// HTML under construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append template text verbatim.
    pub fn raw(&mut self, html: &'static str) -> &mut Self {
        self.buf.push_str(html);
        self
    }

    /// Append a dynamic value, escaped.
    pub fn text(&mut self, value: impl fmt::Display) -> &mut Self {
        let mut rendered = String::new();
        // Writing into a String never fails.
        let _ = write!(rendered, "{value}");
        escape_into(&mut self.buf, &rendered);
        self
    }

    /// Append markup that was itself built through this type.
    pub fn append(&mut self, other: &Markup) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// A server-rendered page for one query.
pub trait HtmlView: Send + Sync + 'static {
    /// `<title>` and `<h1>` text.
    fn title(&self) -> &'static str;

    /// Extra CSS appended after the base stylesheet.
    fn styles(&self) -> &'static str {
        ""
    }

    /// Footer tagline.
    fn tagline(&self) -> &'static str;

    /// Page body for `rows`. Must emit an `empty-state` fragment, and no
    /// table rows, when `rows` is empty.
    fn body(&self, rows: &[Row], out: &mut Markup);

    /// Heading shown above the message in the error fragment.
    fn error_heading(&self) -> Option<&'static str> {
        None
    }
}

const BASE_STYLES: &str = r#"
        :root {
            --royal-blue: #1d3557;
            --light-blue: #a8dadc;
            --cream: #f1faee;
            --medium-blue: #457b9d;
            --highlight-blue: #e6f3f5;
        }
        body {
            background-color: var(--cream);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }
        .navbar {
            background: linear-gradient(135deg, var(--royal-blue), var(--medium-blue)) !important;
            box-shadow: 0 2px 15px rgba(0,0,0,0.1);
        }
        .navbar-brand { color: white !important; font-weight: bold; font-size: 1.5rem; }
        .empty-state {
            text-align: center;
            padding: 2rem;
            color: var(--medium-blue);
            background: var(--highlight-blue);
            border-radius: 10px;
            margin: 1rem 0;
        }
        .footer {
            background: linear-gradient(135deg, var(--royal-blue), var(--medium-blue));
            color: white;
            padding: 1.5rem 0;
            margin-top: auto;
        }
"#;

/// Wrap a view's body in the full document.
pub fn document(view: &dyn HtmlView, rows: &[Row]) -> String {
    let mut page = Markup::new();
    page.raw("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n")
        .raw("    <meta charset=\"UTF-8\">\n")
        .raw("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n")
        .raw("    <title>")
        .text(view.title())
        .raw("</title>\n")
        .raw("    <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/bootswatch/5.3.2/sketchy/bootstrap.min.css\">\n")
        .raw("    <style>")
        .raw(BASE_STYLES)
        .raw(view.styles())
        .raw("    </style>\n</head>\n<body>\n")
        .raw("<nav class=\"navbar navbar-expand-lg navbar-dark\">\n")
        .raw("    <div class=\"container\">\n")
        .raw("        <a class=\"navbar-brand\" href=\"#\">VitalWatchers</a>\n")
        .raw("        <div class=\"d-flex\"><a class=\"nav-link text-white\" href=\"/static/index.html\">Home</a></div>\n")
        .raw("    </div>\n</nav>\n")
        .raw("<div class=\"container my-4\">\n")
        .raw("    <h1 class=\"page-title text-center mb-4\">")
        .text(view.title())
        .raw("</h1>\n");

    view.body(rows, &mut page);

    page.raw("</div>\n")
        .raw("<footer class=\"footer\">\n    <div class=\"container text-center\">\n")
        .raw("        <p class=\"mb-0\">VitalWatchers &copy; 2024 - ")
        .text(view.tagline())
        .raw("</p>\n    </div>\n</footer>\n")
        .raw("<script src=\"https://cdnjs.cloudflare.com/ajax/libs/bootstrap/5.3.2/js/bootstrap.bundle.min.js\"></script>\n")
        .raw("</body>\n</html>\n");
    page.into_string()
}

/// Alert fragment served in place of the document when a request fails.
pub fn error_fragment(heading: Option<&str>, message: &str) -> String {
    let mut out = Markup::new();
    out.raw("<div class=\"alert alert-danger text-center\">\n");
    if let Some(heading) = heading {
        out.raw("    <h4 class=\"alert-heading\">")
            .text(heading)
            .raw("</h4>\n");
    }
    out.raw("    <p class=\"mb-0\">")
        .text(message)
        .raw("</p>\n</div>\n");
    out.into_string()
}
