//! Web driver implementation using Playwright

use anyhow::{Context, Result};
use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::driver::traits::{BrowserDriver, Selector};

/// Web driver configuration
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        let headless = std::env::var("WEBCHECK_HEADLESS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            headless,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Web driver using Playwright
pub struct WebDriver {
    #[allow(dead_code)]
    playwright: Arc<Playwright>,
    #[allow(dead_code)]
    browser: Arc<Browser>,
    #[allow(dead_code)]
    context: Arc<BrowserContext>,
    page: Arc<Mutex<Page>>,
}

impl WebDriver {
    /// Launch a browser and open a fresh page
    pub async fn new(config: WebDriverConfig) -> Result<Self> {
        let playwright = Playwright::initialize()
            .await
            .context("Failed to initialize Playwright")?;

        let chromium = playwright.chromium();
        let mut launcher = chromium.launcher().headless(config.headless);

        let chromium_path_env = std::env::var("PLAYWRIGHT_CHROMIUM_EXECUTABLE_PATH").ok();
        if let Some(path) = &chromium_path_env {
            log::info!("using browser executable from env: {path}");
            launcher = launcher.executable(std::path::Path::new(path));
        }

        let args: Vec<String> = [
            "--no-sandbox",
            "--disable-setuid-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        launcher = launcher.args(&args);

        let browser = launcher
            .launch()
            .await
            .context("Failed to launch browser")?;

        let context = browser.context_builder().build().await?;
        let page = context.new_page().await?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await?;

        Ok(Self {
            playwright: Arc::new(playwright),
            browser: Arc::new(browser),
            context: Arc::new(context),
            page: Arc::new(Mutex::new(page)),
        })
    }

    /// Convert a Selector to a Playwright selector string
    fn selector_to_playwright(selector: &Selector) -> String {
        match selector {
            Selector::Css(css) => css.clone(),
            Selector::Id(id) => format!("#{id}"),
            Selector::Text(text) => format!("text=\"{text}\""),
            Selector::XPath(xpath) => format!("xpath={xpath}"),
        }
    }
}

#[async_trait]
impl BrowserDriver for WebDriver {
    fn name(&self) -> &str {
        "chromium"
    }

    async fn goto(&self, url: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.goto_builder(url)
            .goto()
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        Ok(())
    }

    async fn clear_field(&self, selector: &Selector) -> Result<()> {
        let page = self.page.lock().await;
        let sel = Self::selector_to_playwright(selector);
        match page.query_selector(&sel).await? {
            Some(element) => {
                element.fill_builder("").fill().await?;
                Ok(())
            }
            None => anyhow::bail!("Element not found: {selector}"),
        }
    }

    async fn fill_field(&self, selector: &Selector, value: &str) -> Result<()> {
        let page = self.page.lock().await;
        let sel = Self::selector_to_playwright(selector);
        match page.query_selector(&sel).await? {
            Some(element) => {
                element.fill_builder(value).fill().await?;
                Ok(())
            }
            None => anyhow::bail!("Element not found: {selector}"),
        }
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let page = self.page.lock().await;
        let sel = Self::selector_to_playwright(selector);
        page.click_builder(&sel)
            .click()
            .await
            .with_context(|| format!("Failed to click {selector}"))?;
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        let page = self.page.lock().await;
        let sel = Self::selector_to_playwright(selector);
        match page.query_selector(&sel).await? {
            Some(element) => Ok(element.is_visible().await?),
            None => Ok(false),
        }
    }

    async fn current_url(&self) -> Result<String> {
        let page = self.page.lock().await;
        let url: String = page
            .evaluate("() => window.location.href", ())
            .await
            .context("Failed to read current URL")?;
        Ok(url)
    }

    async fn close(&self) -> Result<()> {
        let page = self.page.lock().await;
        page.goto_builder("about:blank").goto().await?;
        Ok(())
    }
}
