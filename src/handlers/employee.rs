use actix_web::{web, HttpResponse};
use log::debug;

use crate::db::EmployeeDb;

/// `GET /api/employees`: the whole collection, in seed order. No paging or filtering.
pub async fn get_employees(db: web::Data<EmployeeDb>) -> Result<HttpResponse, actix_web::Error> {
    if !db.latency.is_zero() {
        tokio::time::sleep(db.latency).await;
    }
    debug!("Serving {} employees", db.employees.len());
    Ok(HttpResponse::Ok().json(&db.employees))
}
