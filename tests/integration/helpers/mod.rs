// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use scoutrs::config::settings::CrawlerSettings;
use scoutrs::domain::repositories::product_url_repository::{
    PersistOutcome, ProductUrlRepository,
};
use scoutrs::domain::repositories::visited_gateway::VisitedGateway;
use scoutrs::engines::traits::{DriverError, PageDriver, PageSession};
use scoutrs::utils::errors::RepositoryError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 测试用爬虫配置，无滚动延迟
pub fn test_settings() -> CrawlerSettings {
    CrawlerSettings {
        seeds: Vec::new(),
        workers: 4,
        task_timeout_secs: 5,
        scroll_attempts: 1,
        scroll_delay_min_ms: 0,
        scroll_delay_max_ms: 0,
        visited_ttl_secs: 86400,
        max_pages: 50,
        max_depth: 2,
        enable_recursion: true,
        enable_pagination: true,
        dedup_fail_open: false,
        ready_selector: "body".to_string(),
        next_page_selector: "a.next-page".to_string(),
        category_link_selector: "a.category-link".to_string(),
    }
}

/// 内存去重网关
///
/// 用互斥保护的集合模拟Redis的SET NX语义
pub struct InMemoryVisitedGateway {
    claimed: Mutex<HashSet<String>>,
    claim_calls: AtomicUsize,
}

impl InMemoryVisitedGateway {
    pub fn new() -> Self {
        Self {
            claimed: Mutex::new(HashSet::new()),
            claim_calls: AtomicUsize::new(0),
        }
    }

    /// 预置已认领的URL
    pub fn with_claimed(urls: &[&str]) -> Self {
        let gateway = Self::new();
        {
            let mut claimed = gateway.claimed.lock().unwrap();
            for url in urls {
                claimed.insert(url.to_string());
            }
        }
        gateway
    }

    pub fn claim_calls(&self) -> usize {
        self.claim_calls.load(Ordering::SeqCst)
    }

    pub fn is_claimed(&self, url: &str) -> bool {
        self.claimed.lock().unwrap().contains(url)
    }
}

#[async_trait]
impl VisitedGateway for InMemoryVisitedGateway {
    async fn claim(&self, url: &str) -> bool {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
        self.claimed.lock().unwrap().insert(url.to_string())
    }
}

/// 内存商品URL仓库
pub struct InMemoryProductUrlRepository {
    urls: Mutex<HashSet<String>>,
}

impl InMemoryProductUrlRepository {
    pub fn new() -> Self {
        Self {
            urls: Mutex::new(HashSet::new()),
        }
    }

    pub fn saved_urls(&self) -> HashSet<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductUrlRepository for InMemoryProductUrlRepository {
    async fn save(&self, _domain: &str, url: &str) -> Result<PersistOutcome, RepositoryError> {
        if self.urls.lock().unwrap().insert(url.to_string()) {
            Ok(PersistOutcome::Inserted)
        } else {
            Ok(PersistOutcome::Duplicate)
        }
    }
}

/// 对指定URL写入失败的仓库
///
/// 模拟单条记录的写入故障，其余URL正常入库
pub struct FailingUrlRepository {
    urls: Mutex<HashSet<String>>,
    fail_url: String,
}

impl FailingUrlRepository {
    pub fn new(fail_url: &str) -> Self {
        Self {
            urls: Mutex::new(HashSet::new()),
            fail_url: fail_url.to_string(),
        }
    }

    pub fn saved_urls(&self) -> HashSet<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductUrlRepository for FailingUrlRepository {
    async fn save(&self, _domain: &str, url: &str) -> Result<PersistOutcome, RepositoryError> {
        if url == self.fail_url {
            return Err(RepositoryError::DatabaseError("connection reset".to_string()));
        }
        if self.urls.lock().unwrap().insert(url.to_string()) {
            Ok(PersistOutcome::Inserted)
        } else {
            Ok(PersistOutcome::Duplicate)
        }
    }
}

/// 脚本化页面
///
/// pages按翻页顺序给出每一页的渲染内容
#[derive(Clone, Default)]
pub struct ScriptedPage {
    pub pages: Vec<String>,
    pub category_links: Vec<String>,
    pub fail_navigation: bool,
    pub hang_on_ready: bool,
}

impl ScriptedPage {
    pub fn single(content: &str) -> Self {
        Self {
            pages: vec![content.to_string()],
            ..Default::default()
        }
    }
}

/// 脚本化页面驱动
///
/// 按URL返回预置页面，并统计会话的打开/关闭次数
pub struct ScriptedDriver {
    site: HashMap<String, ScriptedPage>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    open_now: AtomicUsize,
    max_open: AtomicUsize,
}

impl ScriptedDriver {
    pub fn new(site: HashMap<String, ScriptedPage>) -> Self {
        Self {
            site,
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
            open_now: AtomicUsize::new(0),
            max_open: AtomicUsize::new(0),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// 同时打开会话数的峰值
    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }
}

/// 本地新类型包装，绕过孤儿规则为共享驱动实现PageDriver
pub struct SharedScriptedDriver(pub Arc<ScriptedDriver>);

#[async_trait]
impl PageDriver for SharedScriptedDriver {
    async fn open_session(&self) -> Result<Box<dyn PageSession>, DriverError> {
        self.0.opened.fetch_add(1, Ordering::SeqCst);
        let now = self.0.open_now.fetch_add(1, Ordering::SeqCst) + 1;
        self.0.max_open.fetch_max(now, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            driver: self.0.clone(),
            current: None,
            page_index: 0,
            closed: false,
        }))
    }
}

pub struct ScriptedSession {
    driver: Arc<ScriptedDriver>,
    current: Option<ScriptedPage>,
    page_index: usize,
    closed: bool,
}

#[async_trait]
impl PageSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let page = self.driver.site.get(url).cloned().unwrap_or_default();
        if page.fail_navigation {
            return Err(DriverError::Navigation(format!("cannot reach {}", url)));
        }
        self.current = Some(page);
        self.page_index = 0;
        Ok(())
    }

    async fn wait_ready(&mut self, _selector: &str, timeout: Duration) -> Result<(), DriverError> {
        if self.current.as_ref().is_some_and(|p| p.hang_on_ready) {
            tokio::time::sleep(timeout + Duration::from_secs(60)).await;
            return Err(DriverError::Timeout);
        }
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, DriverError> {
        let page = self
            .current
            .as_ref()
            .ok_or_else(|| DriverError::Browser("no page loaded".to_string()))?;
        Ok(page
            .pages
            .get(self.page_index)
            .cloned()
            .unwrap_or_default())
    }

    async fn has_next_page(&mut self, _selector: &str) -> Result<bool, DriverError> {
        let page = self
            .current
            .as_ref()
            .ok_or_else(|| DriverError::Browser("no page loaded".to_string()))?;
        Ok(self.page_index + 1 < page.pages.len())
    }

    async fn click_next_page(&mut self, _selector: &str) -> Result<(), DriverError> {
        self.page_index += 1;
        Ok(())
    }

    async fn list_links(&mut self, _selector: &str) -> Result<Vec<String>, DriverError> {
        let page = self
            .current
            .as_ref()
            .ok_or_else(|| DriverError::Browser("no page loaded".to_string()))?;
        Ok(page.category_links.clone())
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.driver.closed.fetch_add(1, Ordering::SeqCst);
            self.driver.open_now.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
