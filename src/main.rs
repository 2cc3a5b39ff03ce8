use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_server::{
    database::{build_pool, get_db_conn, run_migrations},
    routes, AppState, Config,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,actix_web=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let pool = build_pool(&config.database_url, config.pool_size)?;
    {
        let mut conn = get_db_conn(&pool)?;
        run_migrations(&mut conn).context("Failed to create tables")?;
    }

    let bind = config.bind_addr.clone();
    info!(%bind, database = %config.database_url, "starting clinic server");

    let state = web::Data::new(AppState { pool, config });
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind(&bind)
    .with_context(|| format!("Failed to bind {}", bind))?
    .run()
    .await
    .context("Server error")
}
