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

use crate::domain::repositories::visited_gateway::VisitedGateway;
use crate::infrastructure::cache::redis_client::RedisClient;
use async_trait::async_trait;
use tracing::warn;

/// 基于Redis的去重网关
///
/// claim通过单条SET NX EX命令实现，原子性由Redis保证。
/// 存储不可用时按配置的策略放行或跳过，默认跳过（fail closed），
/// 避免存储故障期间对同一URL产生重复的并发浏览器会话。
pub struct RedisVisitedGateway {
    redis: RedisClient,
    /// 认领的过期时间（秒）
    ttl_seconds: u64,
    /// 存储不可用时是否放行
    fail_open: bool,
}

impl RedisVisitedGateway {
    /// 创建新的去重网关实例
    ///
    /// # 参数
    ///
    /// * `redis` - Redis客户端
    /// * `ttl_seconds` - 认领的过期时间（秒）
    /// * `fail_open` - 存储不可用时是否放行
    pub fn new(redis: RedisClient, ttl_seconds: u64, fail_open: bool) -> Self {
        Self {
            redis,
            ttl_seconds,
            fail_open,
        }
    }
}

#[async_trait]
impl VisitedGateway for RedisVisitedGateway {
    async fn claim(&self, url: &str) -> bool {
        match self.redis.set_nx_ex(url, "1", self.ttl_seconds).await {
            Ok(claimed) => claimed,
            Err(e) => {
                warn!(
                    "Dedup store unreachable, running degraded ({}): {}",
                    if self.fail_open {
                        "fail open, proceeding"
                    } else {
                        "fail closed, skipping"
                    },
                    e
                );
                self.fail_open
            }
        }
    }
}
