// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

/// 去重网关接口
///
/// claim是URL级互斥的唯一同步原语：两个任务对同一URL并发claim时，
/// 恰好一个获得true。未成功claim的任务必须跳过该URL的全部后续工作。
#[async_trait]
pub trait VisitedGateway: Send + Sync {
    /// 原子地认领一个URL
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// 认领成功返回true；已被认领（或按失败策略跳过）返回false
    async fn claim(&self, url: &str) -> bool;
}
