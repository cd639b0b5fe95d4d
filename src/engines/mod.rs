// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基于chromiumoxide的页面驱动实现
pub mod chromium_driver;

/// 页面驱动接口定义
pub mod traits;
