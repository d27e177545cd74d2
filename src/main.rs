use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;
use sqlx::PgPool;
use std::sync::Arc;

use fleetdesk::auth::AuthMiddleware;
use fleetdesk::config::Config;
use fleetdesk::notify::RelayMailer;
use fleetdesk::routes::{self, health};
use fleetdesk::store::{EmployeeStore, TaskStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let mailer = RelayMailer::new(config.mail_relay_url.clone(), config.mail_from.clone())
        .expect("Failed to build mail relay client");

    let task_store = TaskStore::new(pool.clone(), Arc::new(mailer));
    let employee_store = EmployeeStore::new(pool.clone());

    info!("Starting fleetdesk server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .app_data(web::Data::new(employee_store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
