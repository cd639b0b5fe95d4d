// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现基于浏览器的页面驱动
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库、缓存等
pub mod infrastructure;

/// 编排器模块
///
/// 实现并发爬取任务的调度和聚合
pub mod orchestrator;

/// 结果输出模块
///
/// 将聚合结果写入外部目标
pub mod sink;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
