// Copyright 2026 scoutrs contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::engines::traits::{DriverError, PageDriver, PageSession};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

// Global browser instance to avoid re-launching Chrome for every session.
// Individual pages stay isolated; only the browser process is shared.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

// Asynchronously gets or initializes the shared browser instance.
// This function ensures that the browser is launched only once.
async fn get_browser() -> Result<&'static Browser, DriverError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

            let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    DriverError::Browser(format!("Failed to connect to remote Chrome: {}", e))
                })?
            } else {
                let mut builder = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30));

                builder = builder.arg("--disable-gpu").arg("--disable-dev-shm-usage");

                Browser::launch(
                    builder
                        .build()
                        .map_err(|e| DriverError::Browser(e.to_string()))?,
                )
                .await
                .map_err(|e| DriverError::Browser(e.to_string()))?
            };

            // Spawn a handler to process browser events
            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// Chromium页面驱动
///
/// 基于chromiumoxide实现的浏览器页面驱动，所有会话共享一个浏览器进程
pub struct ChromiumDriver;

impl ChromiumDriver {
    /// 创建新的Chromium页面驱动实例
    pub fn new() -> Self {
        Self
    }
}

impl Default for ChromiumDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    /// 打开一个新的页面会话
    ///
    /// # 返回值
    ///
    /// * `Ok(Box<dyn PageSession>)` - 新的页面会话
    /// * `Err(DriverError)` - 浏览器不可用或页面创建失败
    async fn open_session(&self) -> Result<Box<dyn PageSession>, DriverError> {
        let browser = get_browser().await?;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| DriverError::Browser(e.to_string()))?;
        Ok(Box::new(ChromiumSession { page: Some(page) }))
    }
}

/// Chromium页面会话
///
/// 包装一个浏览器页面，任务结束时必须调用close释放
struct ChromiumSession {
    page: Option<Page>,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, DriverError> {
        self.page
            .as_ref()
            .ok_or_else(|| DriverError::Browser("Session already closed".to_string()))
    }
}

#[async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.page()?
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn wait_ready(&mut self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page()?.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout);
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        self.page()?
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await
            .map_err(|e| DriverError::Browser(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, DriverError> {
        self.page()?
            .content()
            .await
            .map_err(|e| DriverError::Browser(e.to_string()))
    }

    async fn has_next_page(&mut self, selector: &str) -> Result<bool, DriverError> {
        let script = format!("document.querySelector('{}') !== null", selector);
        let result = self
            .page()?
            .evaluate(script)
            .await
            .map_err(|e| DriverError::Browser(format!("Next page detection failed: {}", e)))?;
        result
            .into_value::<bool>()
            .map_err(|e| DriverError::Browser(format!("Next page detection failed: {}", e)))
    }

    async fn click_next_page(&mut self, selector: &str) -> Result<(), DriverError> {
        let script = format!("document.querySelector('{}').click()", selector);
        self.page()?
            .evaluate(script)
            .await
            .map_err(|e| DriverError::Browser(format!("Next page click failed: {}", e)))?;
        Ok(())
    }

    async fn list_links(&mut self, selector: &str) -> Result<Vec<String>, DriverError> {
        let script = format!(
            "Array.from(document.querySelectorAll('{}')).map(a => a.href)",
            selector
        );
        let result = self
            .page()?
            .evaluate(script)
            .await
            .map_err(|e| DriverError::Browser(format!("Link enumeration failed: {}", e)))?;
        result
            .into_value::<Vec<String>>()
            .map_err(|e| DriverError::Browser(format!("Link enumeration failed: {}", e)))
    }

    async fn close(&mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::warn!("Failed to close browser page: {}", e);
            }
        }
    }
}
