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

use crate::config::settings::CrawlerSettings;
use crate::domain::models::crawl_result::CrawlResult;
use crate::domain::models::task::CrawlTask;
use crate::domain::repositories::product_url_repository::{PersistOutcome, ProductUrlRepository};
use crate::domain::repositories::visited_gateway::VisitedGateway;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{DriverError, PageDriver, PageSession};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify, Semaphore};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, instrument, warn};

/// 单个任务的产出
///
/// 提取到的商品URL和发现的分类链接
struct PageHarvest {
    product_urls: Vec<String>,
    category_links: Vec<String>,
}

/// 任务完成后发往聚合通道的结果
struct TaskOutcome {
    seed: String,
    urls: Vec<String>,
}

/// 一次爬取运行的共享状态
///
/// outstanding在每次spawn时加一、任务结束时减一，归零即运行结束。
/// 仅按初始种子数量等待是不够的：任务会在运行期间动态派生子任务。
struct RunState {
    outstanding: AtomicUsize,
    done: Notify,
}

/// 并发爬取编排器
///
/// 将一组种子URL展开为有界、去重、可递归增长的任务集合，
/// 驱动每个任务完成页面交互协议并聚合各种子的结果。
/// 去重认领与显式深度上限共同保证递归爬取必然终止。
pub struct CrawlOrchestrator {
    gateway: Arc<dyn VisitedGateway>,
    repository: Arc<dyn ProductUrlRepository>,
    driver: Arc<dyn PageDriver>,
    config: CrawlerSettings,
    /// 并发浏览器会话的许可，与逻辑任务数无关
    permits: Arc<Semaphore>,
}

impl CrawlOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    ///
    /// * `gateway` - 去重网关
    /// * `repository` - 商品URL仓库
    /// * `driver` - 页面驱动
    /// * `config` - 爬虫配置
    pub fn new(
        gateway: Arc<dyn VisitedGateway>,
        repository: Arc<dyn ProductUrlRepository>,
        driver: Arc<dyn PageDriver>,
        config: CrawlerSettings,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            gateway,
            repository,
            driver,
            config,
            permits,
        }
    }

    /// 执行一次完整的爬取
    ///
    /// 为每个种子生成一个任务，等待全部任务（含动态派生的子任务）
    /// 完成后聚合结果。每个种子总会产生一个结果条目，失败或被跳过的
    /// 种子对应空URL列表。
    ///
    /// # 参数
    ///
    /// * `seeds` - 种子URL列表
    ///
    /// # 返回值
    ///
    /// 每个种子一个`CrawlResult`，顺序与输入种子一致
    pub async fn run(self: Arc<Self>, seeds: Vec<String>) -> Vec<CrawlResult> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let state = Arc::new(RunState {
            outstanding: AtomicUsize::new(0),
            done: Notify::new(),
        });

        info!("Starting crawl with {} seed(s)", seeds.len());
        for seed in &seeds {
            Self::spawn_task(&self, CrawlTask::seed(seed.clone()), state.clone(), tx.clone());
        }
        drop(tx);

        // Wait until the outstanding-work counter reaches zero. notify_one
        // stores a permit, so the final decrement is never lost.
        loop {
            if state.outstanding.load(Ordering::Acquire) == 0 {
                break;
            }
            state.done.notified().await;
        }

        // All senders are gone by now; drain without blocking producers.
        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        info!("All tasks completed, aggregating {} outcome(s)", outcomes.len());
        Self::aggregate(&seeds, outcomes)
    }

    /// 按种子聚合任务产出
    ///
    /// 结果映射用全部种子预置，确保失败的种子也有空条目；
    /// 同一种子下跨任务重复发现的URL只保留一次
    fn aggregate(seeds: &[String], outcomes: Vec<TaskOutcome>) -> Vec<CrawlResult> {
        let mut by_seed: HashMap<String, (HashSet<String>, Vec<String>)> = seeds
            .iter()
            .map(|s| (s.clone(), (HashSet::new(), Vec::new())))
            .collect();

        for outcome in outcomes {
            let (seen, urls) = by_seed.entry(outcome.seed).or_default();
            for url in outcome.urls {
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }

        seeds
            .iter()
            .map(|seed| CrawlResult {
                domain: seed.clone(),
                urls: by_seed.remove(seed).map(|(_, urls)| urls).unwrap_or_default(),
            })
            .collect()
    }

    /// 登记并启动一个任务
    ///
    /// 计数器先于spawn递增，任务结束后递减；子任务在父任务递减前
    /// 完成登记，保证计数器在尚有工作时不会过早归零
    fn spawn_task(
        this: &Arc<Self>,
        task: CrawlTask,
        state: Arc<RunState>,
        tx: mpsc::UnboundedSender<TaskOutcome>,
    ) {
        state.outstanding.fetch_add(1, Ordering::AcqRel);
        let orchestrator = Arc::clone(this);
        tokio::spawn(async move {
            let outcome = Self::process_task(&orchestrator, &task, &state, &tx).await;
            let _ = tx.send(outcome);
            if state.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
                state.done.notify_one();
            }
        });
    }

    /// 处理单个任务
    ///
    /// claim → 页面交互 → 持久化 → 派生子任务 → 产出结果。
    /// 任务级失败只影响本任务，产出空结果
    #[instrument(skip(this, task, state, tx), fields(task_id = %task.id, url = %task.url, depth = task.depth))]
    async fn process_task(
        this: &Arc<Self>,
        task: &CrawlTask,
        state: &Arc<RunState>,
        tx: &mpsc::UnboundedSender<TaskOutcome>,
    ) -> TaskOutcome {
        let empty = TaskOutcome {
            seed: task.seed.clone(),
            urls: Vec::new(),
        };

        // Admission control: no browser work without a successful claim
        if !this.gateway.claim(&task.url).await {
            debug!("Skipping already claimed URL");
            return empty;
        }

        // Cap concurrent browser sessions; the permit is held for the
        // session lifetime only, not for persistence or spawning.
        let permit = match this.permits.clone().acquire_owned().await {
            Ok(p) => p,
            Err(e) => {
                error!("Worker pool unavailable: {}", e);
                return empty;
            }
        };

        let harvest = match this.drive_page(task).await {
            Ok(h) => h,
            Err(e) => {
                error!("Page interaction failed: {}", e);
                drop(permit);
                return empty;
            }
        };
        drop(permit);

        debug!(
            products = harvest.product_urls.len(),
            categories = harvest.category_links.len(),
            "Page interaction complete"
        );

        // Persist record by record; one failed write must not abort the rest
        let mut inserted = 0u32;
        let mut duplicates = 0u32;
        for url in &harvest.product_urls {
            match this.repository.save(&task.seed, url).await {
                Ok(PersistOutcome::Inserted) => inserted += 1,
                Ok(PersistOutcome::Duplicate) => duplicates += 1,
                Err(e) => warn!("Failed to persist product URL {}: {}", url, e),
            }
        }
        debug!(inserted, duplicates, "Product URLs persisted");

        // Recurse into discovered category links, bounded by the depth limit
        if this.config.enable_recursion && task.depth < this.config.max_depth {
            for link in &harvest.category_links {
                Self::spawn_task(this, task.child(link.clone()), state.clone(), tx.clone());
            }
        }

        TaskOutcome {
            seed: task.seed.clone(),
            urls: harvest.product_urls,
        }
    }

    /// 在独占的页面会话中执行交互协议
    ///
    /// 整个交互受单任务超时约束；无论成功、失败还是超时，
    /// 会话都会在返回前被关闭
    async fn drive_page(&self, task: &CrawlTask) -> Result<PageHarvest, DriverError> {
        let mut session = self.driver.open_session().await?;

        let task_timeout = Duration::from_secs(self.config.task_timeout_secs);
        let result = timeout(task_timeout, self.interact(session.as_mut(), task)).await;

        session.close().await;

        match result {
            Ok(harvest) => harvest,
            Err(_) => Err(DriverError::Timeout),
        }
    }

    /// 页面交互协议
    ///
    /// 导航 → 等待就绪 → 滚动加载 → 读取内容并提取 → 翻页循环 →
    /// 枚举分类链接。滚动和翻页失败降级为部分结果，不判定任务失败
    async fn interact(
        &self,
        session: &mut dyn PageSession,
        task: &CrawlTask,
    ) -> Result<PageHarvest, DriverError> {
        session.navigate(&task.url).await?;
        session
            .wait_ready(
                &self.config.ready_selector,
                Duration::from_secs(self.config.task_timeout_secs),
            )
            .await?;

        // Scroll-and-wait cycles trigger lazy-loaded content; a cycle
        // failure aborts scrolling only
        for _ in 0..self.config.scroll_attempts {
            if let Err(e) = session.scroll_to_bottom().await {
                warn!("Scrolling failed, continuing with loaded content: {}", e);
                break;
            }
            sleep(self.scroll_delay()).await;
        }

        let content = session.content().await?;
        let mut product_urls = ExtractionService::extract(&content, &task.url);
        let mut seen: HashSet<String> = product_urls.iter().cloned().collect();

        if self.config.enable_pagination {
            let mut pages = 1u32;
            while pages < self.config.max_pages {
                match session.has_next_page(&self.config.next_page_selector).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        warn!("Next page detection failed, stopping pagination: {}", e);
                        break;
                    }
                }
                if let Err(e) = session.click_next_page(&self.config.next_page_selector).await {
                    warn!("Next page click failed, stopping pagination: {}", e);
                    break;
                }
                sleep(self.scroll_delay()).await;

                let page_content = match session.content().await {
                    Ok(c) => c,
                    Err(e) => {
                        warn!("Content read failed mid-pagination, keeping partial results: {}", e);
                        break;
                    }
                };
                for url in ExtractionService::extract(&page_content, &task.url) {
                    if seen.insert(url.clone()) {
                        product_urls.push(url);
                    }
                }
                pages += 1;
            }
        }

        // Category links are only worth enumerating if a child task could
        // still be spawned below the depth limit
        let category_links = if self.config.enable_recursion && task.depth < self.config.max_depth
        {
            match session.list_links(&self.config.category_link_selector).await {
                Ok(links) => links,
                Err(e) => {
                    warn!("Category link enumeration failed: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(PageHarvest {
            product_urls,
            category_links,
        })
    }

    /// 带抖动的滚动/翻页等待时间
    fn scroll_delay(&self) -> Duration {
        let lo = self.config.scroll_delay_min_ms;
        let hi = self.config.scroll_delay_max_ms.max(lo);
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}
