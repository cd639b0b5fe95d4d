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

use crate::utils::url_utils;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 商品详情页路径模式
///
/// 识别 /dp/、/gp/product/、/product/、/item/、/shop/、/p/ 后跟标识符的路径段
static PRODUCT_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(dp|gp/product|product|item|shop|p)/[a-zA-Z0-9-_]+(/|$)").unwrap()
});

/// 商品URL提取服务
///
/// 纯函数实现：不访问网络、存储或浏览器，相同输入总是产生相同输出
pub struct ExtractionService;

impl ExtractionService {
    /// 从渲染后的页面内容中提取商品URL
    ///
    /// 解析页面中的链接，解析为绝对URL，保留与基准URL同源且路径
    /// 匹配商品模式的条目，并按首次出现顺序去重
    ///
    /// # 参数
    ///
    /// * `content` - 渲染后的页面内容
    /// * `base_url` - 基准URL，用于解析相对链接
    ///
    /// # 返回值
    ///
    /// 去重后的绝对商品URL列表；无匹配或基准URL非法时返回空列表
    pub fn extract(content: &str, base_url: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };

        let document = Html::parse_document(content);
        let selector = Selector::parse("a").unwrap();

        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Ok(resolved) = url_utils::resolve_url(&base, href) else {
                continue;
            };

            if !url_utils::same_origin(&base, &resolved) {
                continue;
            }

            if !PRODUCT_PATH_PATTERN.is_match(resolved.path()) {
                continue;
            }

            let url_str = resolved.to_string();
            if seen.insert(url_str.clone()) {
                urls.push(url_str);
            }
        }

        urls
    }
}
