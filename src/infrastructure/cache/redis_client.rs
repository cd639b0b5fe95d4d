// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;

/// Redis客户端
///
/// 提供对Redis数据库的异步操作接口
#[derive(Clone)]
pub struct RedisClient {
    /// Redis客户端
    client: redis::Client,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisClient)` - Redis客户端实例
    /// * `Err(anyhow::Error)` - 创建过程中出现的错误
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// 条件设置键值对并指定过期时间
    ///
    /// 仅在键不存在时设置（SET NX EX），整个操作在Redis端原子执行
    ///
    /// # 参数
    ///
    /// * `key` - 键
    /// * `value` - 值
    /// * `ttl_seconds` - 过期时间（秒）
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 键不存在，设置成功
    /// * `Ok(false)` - 键已存在，未设置
    /// * `Err(anyhow::Error)` - 设置过程中出现的错误
    pub async fn set_nx_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<bool> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let result: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut con)
            .await?;
        Ok(result.is_some())
    }
}
