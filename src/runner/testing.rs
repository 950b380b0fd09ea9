//! Scripted driver double
//!
//! Drives the runner without a browser. Every call lands in a shared
//! log so tests can assert on call order; page state is scripted
//! through the factory's builders.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::driver::session::DriverFactory;
use crate::driver::traits::{BrowserDriver, Selector};

/// Builds scripted drivers sharing one call log
pub struct ScriptedFactory {
    /// Number of drivers constructed through the factory
    pub created: Arc<AtomicUsize>,
    /// Calls made against any driver built by this factory, in order
    pub log: Arc<Mutex<Vec<String>>>,
    fail_init: bool,
    fail_actions: HashSet<String>,
    visible: HashSet<String>,
    url_on_click: Option<String>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self {
            created: Arc::new(AtomicUsize::new(0)),
            log: Arc::new(Mutex::new(Vec::new())),
            fail_init: false,
            fail_actions: HashSet::new(),
            visible: HashSet::new(),
            url_on_click: None,
        }
    }

    /// A factory whose driver construction always fails
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    /// Make the named driver action fail (e.g. "goto", "click")
    pub fn fail_action(mut self, action: &str) -> Self {
        self.fail_actions.insert(action.to_string());
        self
    }

    /// Script an element as present and visible
    pub fn visible(mut self, selector: &str) -> Self {
        self.visible.insert(selector.to_string());
        self
    }

    /// Script the page URL observed after a click
    pub fn url_on_click(mut self, url: &str) -> Self {
        self.url_on_click = Some(url.to_string());
        self
    }

    /// Build one driver directly, bypassing the factory counter
    pub fn build(&self) -> ScriptedDriver {
        ScriptedDriver {
            log: self.log.clone(),
            fail_actions: self.fail_actions.clone(),
            visible: self.visible.clone(),
            url_on_click: self.url_on_click.clone(),
            current_url: Arc::new(Mutex::new("about:blank".to_string())),
        }
    }
}

#[async_trait]
impl DriverFactory for ScriptedFactory {
    async fn create(&self) -> Result<Box<dyn BrowserDriver>> {
        if self.fail_init {
            bail!("browser binary missing");
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.build()))
    }
}

pub struct ScriptedDriver {
    pub log: Arc<Mutex<Vec<String>>>,
    fail_actions: HashSet<String>,
    visible: HashSet<String>,
    url_on_click: Option<String>,
    current_url: Arc<Mutex<String>>,
}

impl ScriptedDriver {
    fn record(&self, entry: String) {
        self.log.lock().expect("log lock").push(entry);
    }

    fn check(&self, action: &str) -> Result<()> {
        if self.fail_actions.contains(action) {
            bail!("scripted {action} failure");
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserDriver for ScriptedDriver {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.record(format!("goto {url}"));
        self.check("goto")?;
        *self.current_url.lock().expect("url lock") = url.to_string();
        Ok(())
    }

    async fn clear_field(&self, selector: &Selector) -> Result<()> {
        self.record(format!("clear {selector}"));
        self.check("clear")
    }

    async fn fill_field(&self, selector: &Selector, value: &str) -> Result<()> {
        self.record(format!("fill {selector}={value}"));
        self.check("fill")
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        self.record(format!("click {selector}"));
        self.check("click")?;
        if let Some(ref url) = self.url_on_click {
            *self.current_url.lock().expect("url lock") = url.clone();
        }
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        self.check("is_visible")?;
        Ok(self.visible.contains(&selector.to_string()))
    }

    async fn current_url(&self) -> Result<String> {
        self.check("current_url")?;
        Ok(self.current_url.lock().expect("url lock").clone())
    }

    async fn close(&self) -> Result<()> {
        self.record("close".to_string());
        self.check("close")
    }
}
