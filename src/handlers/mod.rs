pub mod employee;

use actix_web::web;

use crate::client::EMPLOYEES_PATH;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(EMPLOYEES_PATH)
            .route(web::get().to(employee::get_employees)),
    );
}
