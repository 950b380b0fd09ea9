//! Browser session lifecycle
//!
//! One `SessionManager` owns at most one live browser connection. The
//! Sequencer acquires it lazily, scenarios borrow it for the duration
//! of one run, and `release` tears it down at the end.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::driver::traits::BrowserDriver;
use crate::driver::web::{WebDriver, WebDriverConfig};

/// The browser runtime could not be started. Fatal for the whole run;
/// never retried.
#[derive(Debug, Error)]
#[error("browser session could not be started: {reason}")]
pub struct SessionInitError {
    pub reason: String,
}

/// Constructs the concrete driver backing a session
#[async_trait]
pub trait DriverFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn BrowserDriver>>;
}

/// Factory for the Playwright-backed web driver
pub struct WebDriverFactory {
    config: WebDriverConfig,
}

impl WebDriverFactory {
    pub fn new(config: WebDriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DriverFactory for WebDriverFactory {
    async fn create(&self) -> Result<Box<dyn BrowserDriver>> {
        let driver = WebDriver::new(self.config.clone()).await?;
        Ok(Box::new(driver))
    }
}

/// Owns the lifecycle of one browser-automation session
pub struct SessionManager {
    factory: Box<dyn DriverFactory>,
    driver: Option<Box<dyn BrowserDriver>>,
}

impl SessionManager {
    pub fn new(factory: Box<dyn DriverFactory>) -> Self {
        Self {
            factory,
            driver: None,
        }
    }

    pub fn for_web(config: WebDriverConfig) -> Self {
        Self::new(Box::new(WebDriverFactory::new(config)))
    }

    /// Whether a live session currently exists
    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    /// Return the live session, constructing one if none exists.
    /// A session released earlier in the process is silently
    /// re-created on the next call.
    pub async fn acquire(&mut self) -> Result<&dyn BrowserDriver, SessionInitError> {
        let driver = match self.driver.take() {
            Some(driver) => driver,
            None => {
                log::info!("starting browser session");
                self.factory.create().await.map_err(|err| SessionInitError {
                    reason: format!("{err:#}"),
                })?
            }
        };

        Ok(&**self.driver.insert(driver))
    }

    /// Close and drop the session. A no-op when no session exists or
    /// it was already released.
    pub async fn release(&mut self) {
        if let Some(driver) = self.driver.take() {
            log::info!("closing browser session");
            if let Err(err) = driver.close().await {
                log::warn!("browser session close failed: {err:#}");
            }
        }
    }
}
