// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use uuid::Uuid;

/// 任务类型
///
/// 区分种子任务和由分类链接派生的任务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 种子任务
    Seed,
    /// 分类派生任务
    Category,
}

/// 爬取任务
///
/// 一个任务对应访问并处理一个URL，创建后不可变，仅被消费一次
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// 任务ID
    pub id: Uuid,
    /// 目标URL
    pub url: String,
    /// 来源种子URL
    pub seed: String,
    /// 发现深度（种子为0）
    pub depth: u32,
    /// 任务类型
    pub kind: TaskKind,
}

impl CrawlTask {
    /// 创建种子任务
    pub fn seed(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: Uuid::new_v4(),
            seed: url.clone(),
            url,
            depth: 0,
            kind: TaskKind::Seed,
        }
    }

    /// 从当前任务派生分类子任务
    ///
    /// 子任务继承来源种子，深度加一
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            seed: self.seed.clone(),
            depth: self.depth + 1,
            kind: TaskKind::Category,
        }
    }
}
