//! A driver that records every action and answers from canned state.

use crate::driver::{Driver, Selector};
use crate::error::DriverError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A recorded driver call for inspection in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverAction {
    /// `navigate(url)`
    Navigate(String),
    /// `click(selector)`
    Click(Selector),
    /// `fill(selector, text)`
    Fill(Selector, String),
    /// `text(selector)`
    Text(Selector),
    /// `is_visible(selector)`
    IsVisible(Selector),
}

/// A driver that records every call and never touches a browser.
///
/// `text` answers from [`RecordingDriver::with_text`] and fails with
/// [`DriverError::ElementNotFound`] for unknown selectors. `is_visible`
/// answers `true` only for selectors marked with
/// [`RecordingDriver::with_visible`]. `fill` also updates the text a later
/// `text` call returns. Use `.actions()` to inspect what was recorded.
pub struct RecordingDriver {
    actions: Mutex<Vec<DriverAction>>,
    texts: Mutex<HashMap<Selector, String>>,
    visible: HashSet<Selector>,
}

impl RecordingDriver {
    /// Create a driver with no canned state.
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            texts: Mutex::new(HashMap::new()),
            visible: HashSet::new(),
        }
    }

    /// Answer `text(selector)` with `text`. Also marks the element visible.
    pub fn with_text(self, selector: Selector, text: impl Into<String>) -> Self {
        self.texts.lock().unwrap().insert(selector.clone(), text.into());
        self.with_visible(selector)
    }

    /// Answer `is_visible(selector)` with `true`.
    pub fn with_visible(mut self, selector: Selector) -> Self {
        self.visible.insert(selector);
        self
    }

    /// Return a snapshot of all recorded actions.
    pub fn actions(&self) -> Vec<DriverAction> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: DriverAction) {
        self.actions.lock().unwrap().push(action);
    }
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.record(DriverAction::Navigate(url.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> Result<(), DriverError> {
        self.record(DriverAction::Click(selector.clone()));
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> Result<(), DriverError> {
        self.record(DriverAction::Fill(selector.clone(), text.to_string()));
        self.texts
            .lock()
            .unwrap()
            .insert(selector.clone(), text.to_string());
        Ok(())
    }

    async fn text(&self, selector: &Selector) -> Result<String, DriverError> {
        self.record(DriverAction::Text(selector.clone()));
        self.texts
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool, DriverError> {
        self.record(DriverAction::IsVisible(selector.clone()));
        Ok(self.visible.contains(selector))
    }
}
