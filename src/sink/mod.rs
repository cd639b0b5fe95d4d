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

use crate::domain::models::crawl_result::CrawlResult;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// 结果接收器
///
/// 消费一次爬取运行的完整聚合结果批次
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// 消费结果批次
    ///
    /// # 参数
    ///
    /// * `results` - 每个种子一个条目的结果批次
    async fn consume(&self, results: &[CrawlResult]) -> anyhow::Result<()>;
}

/// JSON文件接收器
///
/// 将结果批次以JSON格式写入文件
pub struct JsonFileSink {
    /// 输出文件路径
    path: PathBuf,
}

impl JsonFileSink {
    /// 创建新的JSON文件接收器实例
    ///
    /// # 参数
    ///
    /// * `path` - 输出文件路径
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResultSink for JsonFileSink {
    async fn consume(&self, results: &[CrawlResult]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(results)?;
        tokio::fs::write(&self.path, json).await?;
        info!("Wrote {} result(s) to {}", results.len(), self.path.display());
        Ok(())
    }
}
