// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬取结果模型
pub mod crawl_result;

/// 爬取任务模型
pub mod task;
