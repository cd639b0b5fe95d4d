// Copyright (c) 2026 scoutrs contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 商品URL仓库接口
pub mod product_url_repository;

/// 去重网关接口
pub mod visited_gateway;
