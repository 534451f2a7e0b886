use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use employee_directory::config::Config;
use employee_directory::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("{}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let employee_db = db::create_db(&config).await.map_err(|err| {
        error!("{}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string())
    })?;
    let employee_db = web::Data::new(employee_db);

    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(employee_db.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
