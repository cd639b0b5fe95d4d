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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 页面驱动错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),
}

/// 页面会话
///
/// 一个会话对应一个浏览器页面，在任务生命周期内被该任务独占。
/// 无论任务成功或失败，会话都必须通过close释放。
#[async_trait]
pub trait PageSession: Send {
    /// 导航到目标URL
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// 等待页面主要内容就绪
    ///
    /// # 参数
    ///
    /// * `selector` - 结构性就绪信号的选择器
    /// * `timeout` - 本步骤的超时时间
    async fn wait_ready(&mut self, selector: &str, timeout: Duration) -> Result<(), DriverError>;

    /// 滚动到页面底部以触发懒加载内容
    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError>;

    /// 读取完整渲染后的页面内容
    async fn content(&mut self) -> Result<String, DriverError>;

    /// 检测是否存在下一页入口
    async fn has_next_page(&mut self, selector: &str) -> Result<bool, DriverError>;

    /// 点击下一页入口
    async fn click_next_page(&mut self, selector: &str) -> Result<(), DriverError>;

    /// 枚举页面中匹配选择器的链接
    async fn list_links(&mut self, selector: &str) -> Result<Vec<String>, DriverError>;

    /// 关闭会话并释放浏览器页面
    async fn close(&mut self);
}

/// 页面驱动
///
/// 负责创建页面会话，会话数量由编排器限制
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 打开一个新的页面会话
    async fn open_session(&self) -> Result<Box<dyn PageSession>, DriverError>;
}
