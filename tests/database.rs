use product_catalog::config::DatabaseConfig;
use product_catalog::database;
use sqlx::PgPool;

#[sqlx::test]
async fn health_check_reports_ok(pool: PgPool) {
    database::check_health(&pool).await.unwrap();
}

#[tokio::test]
async fn create_pool_connects_and_migrates() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    dotenv::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let config = DatabaseConfig {
        url,
        max_connections: 2,
    };

    let pool = database::create_pool(&config).await.unwrap();
    database::check_health(&pool).await.unwrap();
}
