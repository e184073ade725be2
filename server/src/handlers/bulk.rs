use actix_web::{get, http::header::ContentType, web, HttpResponse};
use serde::Deserialize;

use crate::{
    config::ServerConfig,
    error::{Result, SwitchError},
    store::SwitchStore,
};

#[derive(Debug, Deserialize)]
pub struct MakeQuery {
    pub count: Option<String>,
    pub password: Option<String>,
}

/// Missing or empty `count` means one switch.
pub fn parse_count(raw: Option<&str>, max_batch: usize) -> Result<usize> {
    let raw = match raw {
        None | Some("") => return Ok(1),
        Some(raw) => raw,
    };

    let count: usize = raw
        .parse()
        .map_err(|_| SwitchError::InvalidCount(raw.to_string()))?;

    if count == 0 || count > max_batch {
        return Err(SwitchError::InvalidCount(format!(
            "{} (expected 1..={})",
            count, max_batch
        )));
    }

    Ok(count)
}

#[get("/mk")]
pub async fn make_switches(
    query: web::Query<MakeQuery>,
    store: web::Data<SwitchStore>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse> {
    let count = parse_count(query.count.as_deref(), config.switches.max_batch)?;
    let password = query.password.as_deref().unwrap_or_default();

    let ids = store.create_many(count, password).await.inspect_err(|err| {
        log::error!("Bulk creation of {} switches failed: {}", count, err);
    })?;

    let body: String = ids
        .iter()
        .map(|id| format!("<chck value=\"{}\"></chck>\n", id))
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(body))
}
