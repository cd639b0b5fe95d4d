// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Redis客户端
pub mod redis_client;

/// 基于Redis的去重网关实现
pub mod visited_gateway_impl;
