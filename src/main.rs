use std::sync::Arc;

use expense_tracker::config::Config;
use expense_tracker::repositories::{PostgresExpenseRepository, PostgresUserRepository};
use expense_tracker::routes::build_router;
use expense_tracker::services::{
    AuthService, AuthServiceImpl, ExpenseService, ExpenseServiceImpl,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_tracker=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let expense_repository = Arc::new(PostgresExpenseRepository::new(pool));

    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        user_repository,
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    ));
    let expense_service: Arc<dyn ExpenseService> = Arc::new(ExpenseServiceImpl::new(
        expense_repository,
        config.default_pagination_limit,
        config.maximum_pagination_limit,
    ));

    let app = build_router(auth_service, expense_service);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "expense tracker listening");

    axum::serve(listener, app).await?;

    Ok(())
}
