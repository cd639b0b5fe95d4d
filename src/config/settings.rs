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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、Redis、爬虫行为和输出等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
    /// 是否记录SQL语句日志
    pub sqlx_logging: bool,
}

/// Redis配置设置
#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
}

/// 爬虫配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 种子URL列表
    pub seeds: Vec<String>,
    /// 并发浏览器会话数上限
    pub workers: usize,
    /// 单任务超时时间（秒）
    pub task_timeout_secs: u64,
    /// 滚动加载尝试次数
    pub scroll_attempts: u32,
    /// 滚动间隔下限（毫秒）
    pub scroll_delay_min_ms: u64,
    /// 滚动间隔上限（毫秒）
    pub scroll_delay_max_ms: u64,
    /// 已访问URL的过期时间（秒）
    pub visited_ttl_secs: u64,
    /// 单任务翻页上限
    pub max_pages: u32,
    /// 递归深度上限
    pub max_depth: u32,
    /// 是否递归爬取分类链接
    pub enable_recursion: bool,
    /// 是否启用翻页
    pub enable_pagination: bool,
    /// 去重存储不可用时是否放行
    pub dedup_fail_open: bool,
    /// 页面就绪选择器
    pub ready_selector: String,
    /// 下一页选择器
    pub next_page_selector: String,
    /// 分类链接选择器
    pub category_link_selector: String,
}

/// 输出配置设置
#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    /// 结果批次文件路径
    pub path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default DB pool settings
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("database.sqlx_logging", false)?
            // Default crawler settings
            .set_default("crawler.seeds", Vec::<String>::new())?
            .set_default("crawler.workers", 4)?
            .set_default("crawler.task_timeout_secs", 30)?
            .set_default("crawler.scroll_attempts", 5)?
            .set_default("crawler.scroll_delay_min_ms", 2000)?
            .set_default("crawler.scroll_delay_max_ms", 5000)?
            .set_default("crawler.visited_ttl_secs", 86400)?
            .set_default("crawler.max_pages", 50)?
            .set_default("crawler.max_depth", 2)?
            .set_default("crawler.enable_recursion", true)?
            .set_default("crawler.enable_pagination", true)?
            .set_default("crawler.dedup_fail_open", false)?
            .set_default("crawler.ready_selector", "body")?
            .set_default("crawler.next_page_selector", "a.next-page")?
            .set_default("crawler.category_link_selector", "a.category-link")?
            // Default output settings
            .set_default("output.path", "output.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCOUTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
