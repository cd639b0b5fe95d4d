// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库连接管理
pub mod connection;

/// 数据库实体定义
pub mod entities;
