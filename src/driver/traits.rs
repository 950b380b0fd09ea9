use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// Element selector for page elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Select by CSS selector
    Css(String),
    /// Select by element id
    Id(String),
    /// Select by visible text (substring match)
    Text(String),
    /// Select by XPath expression
    XPath(String),
}

impl Selector {
    /// Parse a selector string as written in suite files.
    ///
    /// `xpath=`, `text=` and `id=` prefixes pick the scheme explicitly;
    /// a leading `//` or `(` is treated as XPath; everything else is CSS.
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("xpath=") {
            Selector::XPath(rest.to_string())
        } else if let Some(rest) = raw.strip_prefix("text=") {
            Selector::Text(rest.to_string())
        } else if let Some(rest) = raw.strip_prefix("id=") {
            Selector::Id(rest.to_string())
        } else if raw.starts_with("//") || raw.starts_with('(') {
            Selector::XPath(raw.to_string())
        } else {
            Selector::Css(raw.to_string())
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => write!(f, "{css}"),
            Selector::Id(id) => write!(f, "id={id}"),
            Selector::Text(text) => write!(f, "text={text}"),
            Selector::XPath(xpath) => write!(f, "xpath={xpath}"),
        }
    }
}

/// Browser-agnostic driver interface
///
/// This trait defines the page operations a scenario needs. It
/// abstracts away the automation backend so that scenarios can be
/// written once and exercised against any implementation, including a
/// scripted double in tests.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Name of the backing implementation (e.g. "chromium")
    fn name(&self) -> &str;

    /// Navigate the page to a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Clear the content of an input field
    ///
    /// Fields retain state across scenarios sharing a session, so
    /// callers clear before every fill.
    async fn clear_field(&self, selector: &Selector) -> Result<()>;

    /// Type a value into an input field (does not clear first)
    async fn fill_field(&self, selector: &Selector, value: &str) -> Result<()>;

    /// Click an element
    async fn click(&self, selector: &Selector) -> Result<()>;

    /// Check whether an element is currently present and visible
    async fn is_visible(&self, selector: &Selector) -> Result<bool>;

    /// Get the URL the page is currently on
    async fn current_url(&self) -> Result<String>;

    /// Release page state. The underlying browser connection shuts
    /// down when the driver handle is dropped.
    async fn close(&self) -> Result<()>;
}

impl fmt::Debug for dyn BrowserDriver + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrowserDriver({})", self.name())
    }
}
