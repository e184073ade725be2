use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::store::SwitchStore;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub backend: String,
}

#[get("/health")]
pub async fn health_check(store: web::Data<SwitchStore>) -> HttpResponse {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        backend: store.backend_name().to_string(),
    };

    HttpResponse::Ok().json(response)
}
