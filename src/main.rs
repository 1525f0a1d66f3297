use actix_web::{App, HttpServer, middleware, web};

use apister::auth::session::session_middleware;
use apister::config::AppConfig;
use apister::state::AppState;
use apister::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    let state = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url).await.map_err(std::io::Error::other)?;
            db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
            AppState::postgres(pool, &config.app_name)
        }
        None => {
            log::warn!("No DATABASE_URL set, using the in-memory store (data lost on restart)");
            AppState::in_memory(&config.app_name)
        }
    };

    if config.seed_users {
        db::seed_users(state.users.as_ref())
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    let secret_key = config.session_key();
    let state = web::Data::new(state);

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(routes::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
