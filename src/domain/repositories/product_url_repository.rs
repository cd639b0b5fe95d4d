// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 持久化结果
///
/// 重复URL是正常结果而非错误，需要与写入失败区分开
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// 新记录已写入
    Inserted,
    /// URL已存在，跳过
    Duplicate,
}

/// 商品URL仓库接口
///
/// URL在持久化存储中全局唯一；记录创建后不再修改或删除
#[async_trait]
pub trait ProductUrlRepository: Send + Sync {
    /// 保存商品URL
    ///
    /// # 参数
    ///
    /// * `domain` - 来源种子域
    /// * `url` - 规范化的商品URL
    ///
    /// # 返回值
    ///
    /// * `Ok(PersistOutcome)` - 写入或重复跳过
    /// * `Err(RepositoryError)` - 写入过程中出现的错误
    async fn save(&self, domain: &str, url: &str) -> Result<PersistOutcome, RepositoryError>;
}
