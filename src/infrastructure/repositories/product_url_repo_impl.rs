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

use crate::domain::repositories::product_url_repository::{PersistOutcome, ProductUrlRepository};
use crate::infrastructure::database::entities::product_url as product_url_entity;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 商品URL仓库实现
pub struct ProductUrlRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ProductUrlRepositoryImpl {
    /// 创建新的商品URL仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的商品URL仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductUrlRepository for ProductUrlRepositoryImpl {
    async fn save(&self, domain: &str, url: &str) -> Result<PersistOutcome, RepositoryError> {
        let active_model = product_url_entity::ActiveModel {
            domain: Set(domain.to_string()),
            url: Set(url.to_string()),
            ..Default::default()
        };

        // Single-statement upsert-or-skip; the unique index on url resolves races
        let result = product_url_entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(product_url_entity::Column::Url)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await;

        match result {
            Ok(_) => Ok(PersistOutcome::Inserted),
            Err(DbErr::RecordNotInserted) => Ok(PersistOutcome::Duplicate),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
