// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 爬取结果
///
/// 每个种子产生一个结果条目，URL顺序无语义
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrawlResult {
    /// 种子域标识
    pub domain: String,
    /// 该种子下发现的商品URL集合
    pub urls: Vec<String>,
}
