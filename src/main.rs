use actix_web::{middleware::Logger, web, App, HttpServer};

use kiroku::auth::SessionKeys;
use kiroku::{app_config, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let port = std::env::var("PORT").expect("env PORT");
    let database_url = std::env::var("DATABASE_URL").expect("env DATABASE_URL");
    let secret_key = std::env::var("SECRET_KEY").expect("env SECRET_KEY");

    let pool = db::build_pool(&database_url).expect("failed to create a sqlite pool");
    {
        let mut connection = pool.get().expect("failed to check out a connection");
        db::run_migrations(&mut connection).expect("failed to run pending migrations");
    }

    let pool = web::Data::new(pool);
    let keys = web::Data::new(SessionKeys::from_secret(&secret_key));

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(keys.clone())
            .wrap(Logger::default())
            .configure(app_config)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
