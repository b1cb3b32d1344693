//! UI-driving substrate abstraction.
//!
//! The registry exposes no API, so every interaction goes through a live
//! browser session. These traits cover the handful of capabilities the
//! engine needs (navigate, find, read, clear, send keys) and nothing else,
//! so the scraping logic runs unchanged against the in-memory fake in
//! tests.

pub mod chromium;
#[cfg(test)]
pub mod fake;

use anyhow::Result;
use async_trait::async_trait;

/// A stateful browser session holding exactly one active page.
///
/// The session is exclusively owned by one discovery run. Navigating
/// anywhere invalidates every element handle minted from the previous
/// page.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Navigate the page to a URL, wait for it to settle, and return the
    /// URL actually landed on after any redirects.
    async fn goto(&self, url: &str) -> Result<String>;

    /// Find a single element by its DOM id. Fails if no such element
    /// appears within the settle period.
    async fn element_by_id(&self, id: &str) -> Result<Box<dyn UiElement>>;

    /// All elements matching a CSS selector, in document order. No matches
    /// yields an empty list, not an error.
    async fn elements_by_css(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>>;
}

/// A handle to one element on the current page.
#[async_trait]
pub trait UiElement: Send + Sync {
    /// Rendered text content.
    async fn text(&self) -> Result<String>;

    /// Clear an input's value.
    async fn clear(&self) -> Result<()>;

    /// Type text into an input. A trailing newline presses Enter, which on
    /// the registry's search form submits it; a submission that navigates
    /// reports the URL it landed on.
    async fn send_keys(&self, keys: &str) -> Result<Option<String>>;

    /// Attribute value, if the attribute is present.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Descendant elements matching a CSS selector, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>>;
}
