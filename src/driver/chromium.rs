//! Chromium-backed driver using chromiumoxide.

use super::{UiDriver, UiElement};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outer bound on a single page navigation.
const NAV_TIMEOUT: Duration = Duration::from_secs(30);
/// How long element lookups keep polling while the page settles.
const SETTLE: Duration = Duration::from_secs(1);
const POLL: Duration = Duration::from_millis(100);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. ESCHEAT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("ESCHEAT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. ~/.escheat/chromium/ (a manually placed Chrome for Testing build)
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".escheat/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".escheat/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".escheat/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".escheat/chromium/chrome-linux64/chrome"),
                home.join(".escheat/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    if let Ok(path) = which::which("google-chrome") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium-browser") {
        return Some(path);
    }

    // 4. Common macOS locations
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-backed session: one headless browser, one page.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler_task: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a headless Chromium instance and open the session's page.
    pub async fn launch() -> Result<Self> {
        let chrome_path = find_chromium()
            .context("Chromium not found. Install google-chrome or set ESCHEAT_CHROMIUM_PATH.")?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Drive the CDP event stream for the lifetime of the browser.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open page")?;

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Close the browser and stop the event loop.
    pub async fn shutdown(mut self) -> Result<()> {
        let _ = self.browser.close().await;
        self.handler_task.abort();
        Ok(())
    }
}

#[async_trait]
impl UiDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<String> {
        let result = tokio::time::timeout(NAV_TIMEOUT, self.page.goto(url)).await;

        match result {
            Ok(Ok(_response)) => {
                // Wait for the load to finish before callers start looking
                // for elements.
                let _ = self.page.wait_for_navigation().await;

                let final_url = self
                    .page
                    .url()
                    .await
                    .unwrap_or_default()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| url.to_string());

                Ok(final_url)
            }
            Ok(Err(e)) => bail!("navigation to {url} failed: {e}"),
            Err(_) => bail!(
                "navigation to {url} timed out after {}s",
                NAV_TIMEOUT.as_secs()
            ),
        }
    }

    async fn element_by_id(&self, id: &str) -> Result<Box<dyn UiElement>> {
        let selector = format!("[id=\"{id}\"]");
        let deadline = Instant::now() + SETTLE;
        loop {
            match self.page.find_element(selector.as_str()).await {
                Ok(el) => {
                    return Ok(Box::new(ChromiumElement {
                        el,
                        page: self.page.clone(),
                    }))
                }
                Err(_) if Instant::now() < deadline => tokio::time::sleep(POLL).await,
                Err(e) => bail!("element #{id} not found: {e}"),
            }
        }
    }

    async fn elements_by_css(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>> {
        let deadline = Instant::now() + SETTLE;
        loop {
            let found = self
                .page
                .find_elements(selector)
                .await
                .with_context(|| format!("finding elements {selector}"))?;
            if !found.is_empty() || Instant::now() >= deadline {
                let page = &self.page;
                return Ok(found
                    .into_iter()
                    .map(|el| {
                        Box::new(ChromiumElement {
                            el,
                            page: page.clone(),
                        }) as Box<dyn UiElement>
                    })
                    .collect());
            }
            tokio::time::sleep(POLL).await;
        }
    }
}

/// Handle to one element on the session's page.
struct ChromiumElement {
    el: Element,
    page: Page,
}

#[async_trait]
impl UiElement for ChromiumElement {
    async fn text(&self) -> Result<String> {
        Ok(self.el.inner_text().await?.unwrap_or_default())
    }

    async fn clear(&self) -> Result<()> {
        self.el
            .call_js_fn("function() { this.value = ''; }", false)
            .await
            .context("failed to clear input")?;
        Ok(())
    }

    async fn send_keys(&self, keys: &str) -> Result<Option<String>> {
        let (text, submit) = match keys.strip_suffix('\n') {
            Some(text) => (text, true),
            None => (keys, false),
        };

        self.el.focus().await.context("failed to focus input")?;
        if !text.is_empty() {
            self.el.type_str(text).await.context("failed to type")?;
        }
        if !submit {
            return Ok(None);
        }
        self.el.press_key("Enter").await.context("failed to submit")?;
        // The form posts back; let the navigation finish, then report
        // where it landed.
        let _ = self.page.wait_for_navigation().await;
        Ok(self
            .page
            .url()
            .await
            .unwrap_or_default()
            .map(|u| u.to_string()))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.el.attribute(name).await?)
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn UiElement>>> {
        let found = self
            .el
            .find_elements(selector)
            .await
            .with_context(|| format!("finding {selector} within element"))?;
        let page = &self.page;
        Ok(found
            .into_iter()
            .map(|el| {
                Box::new(ChromiumElement {
                    el,
                    page: page.clone(),
                }) as Box<dyn UiElement>
            })
            .collect())
    }
}
