//! The automation backend components act through.
//!
//! An entity never calls its driver. It hands the same `Arc<dyn Driver>`
//! to every component it creates; components use it to act on the page.

use crate::error::DriverError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a component addresses an element on the page.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// A CSS selector.
    Css(String),
    /// An XPath expression.
    XPath(String),
    /// A `data-testid` attribute value.
    TestId(String),
    /// An element id.
    Id(String),
}

impl Selector {
    /// Shorthand for [`Selector::Css`].
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Shorthand for [`Selector::TestId`].
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Shorthand for [`Selector::Id`].
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::TestId(s) => write!(f, "test-id={s}"),
            Self::Id(s) => write!(f, "id={s}"),
        }
    }
}

/// An automation driver: browser, emulator, or anything that can be told
/// to navigate, click and type.
///
/// Implementations own their session; entities only borrow a shared handle
/// and never start or stop it.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Load `url` in the current session.
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Click the element matched by `selector`.
    async fn click(&self, selector: &Selector) -> Result<(), DriverError>;

    /// Replace the text content of an input with `text`.
    async fn fill(&self, selector: &Selector, text: &str) -> Result<(), DriverError>;

    /// Read the visible text of the element matched by `selector`.
    async fn text(&self, selector: &Selector) -> Result<String, DriverError>;

    /// Whether the element matched by `selector` is present and visible.
    async fn is_visible(&self, selector: &Selector) -> Result<bool, DriverError>;
}
