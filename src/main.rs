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

use anyhow::Context;
use scoutrs::config::settings::Settings;
use scoutrs::engines::chromium_driver::ChromiumDriver;
use scoutrs::infrastructure::cache::redis_client::RedisClient;
use scoutrs::infrastructure::cache::visited_gateway_impl::RedisVisitedGateway;
use scoutrs::infrastructure::database::connection;
use scoutrs::infrastructure::repositories::product_url_repo_impl::ProductUrlRepositoryImpl;
use scoutrs::orchestrator::crawler::CrawlOrchestrator;
use scoutrs::sink::{JsonFileSink, ResultSink};
use scoutrs::utils::telemetry;
use std::sync::Arc;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行爬取
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting scoutrs...");

    // 2. Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    let seeds = settings.crawler.seeds.clone();
    if seeds.is_empty() {
        anyhow::bail!("No seed URLs configured (set crawler.seeds)");
    }
    info!("Configuration loaded, {} seed(s)", seeds.len());

    // 3. Connect to database and apply migrations
    let db = connection::create_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None)
        .await
        .context("Failed to apply database migrations")?;
    info!("Database connection established");

    // 4. Initialize Redis client
    let redis_client = RedisClient::new(&settings.redis.url)
        .await
        .context("Failed to initialize Redis client")?;
    info!("Redis client initialized");

    // 5. Initialize components
    let gateway = Arc::new(RedisVisitedGateway::new(
        redis_client,
        settings.crawler.visited_ttl_secs,
        settings.crawler.dedup_fail_open,
    ));
    let repository = Arc::new(ProductUrlRepositoryImpl::new(db.clone()));
    let driver = Arc::new(ChromiumDriver::new());

    // 6. Run the crawl
    let orchestrator = Arc::new(CrawlOrchestrator::new(
        gateway,
        repository,
        driver,
        settings.crawler.clone(),
    ));
    let results = orchestrator.run(seeds).await;
    info!("Crawl complete, {} seed result(s)", results.len());

    // 7. Hand the batch to the result sink
    let sink = JsonFileSink::new(&settings.output.path);
    sink.consume(&results)
        .await
        .context("Failed to write output batch")?;
    info!("Results saved to {}", settings.output.path);

    Ok(())
}
