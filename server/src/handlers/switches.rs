use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use ident::{SwitchId, PASSWORD_LEN};
use serde::Deserialize;

use crate::{
    error::{Result, SwitchError},
    store::SwitchStore,
};

#[derive(Debug, Default, Deserialize)]
pub struct PasswordQuery {
    pub password: Option<String>,
}

/// A non-empty body wins over the `password` query parameter. Only the first
/// `PASSWORD_LEN` characters of the body are considered.
pub fn resolve_password(query: &PasswordQuery, body: &[u8]) -> String {
    if body.is_empty() {
        query.password.clone().unwrap_or_default()
    } else {
        String::from_utf8_lossy(body)
            .chars()
            .take(PASSWORD_LEN)
            .collect()
    }
}

fn state_response(state: bool) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(if state { "1" } else { "0" })
}

fn peer(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// `GET /{id}`
pub async fn get_state(
    path: web::Path<String>,
    store: web::Data<SwitchStore>,
) -> Result<HttpResponse> {
    let id = SwitchId::parse(path.into_inner())?;
    let state = store.state(id.as_str()).await?;
    Ok(state_response(state))
}

/// `PUT /{id}`
pub async fn toggle(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<PasswordQuery>,
    body: web::Bytes,
    store: web::Data<SwitchStore>,
) -> Result<HttpResponse> {
    let id = SwitchId::parse(path.into_inner())?;
    let password = resolve_password(&query, &body);

    match store.toggle(id.as_str(), &password).await {
        Ok(state) => Ok(state_response(state)),
        Err(SwitchError::Unauthorized) => {
            log::warn!("Incorrect password for '{}' from {}", id, peer(&req));
            Err(SwitchError::Unauthorized)
        }
        Err(SwitchError::Nonexistent) => {
            log::warn!("Toggle of nonexistent id '{}' from {}", id, peer(&req));
            Err(SwitchError::Nonexistent)
        }
        Err(err) => {
            log::error!("Toggle of '{}' failed: {}", id, err);
            Err(err)
        }
    }
}

/// `POST /{id}`
pub async fn create(
    path: web::Path<String>,
    query: web::Query<PasswordQuery>,
    body: web::Bytes,
    store: web::Data<SwitchStore>,
) -> Result<HttpResponse> {
    let raw = path.into_inner();
    let password = resolve_password(&query, &body);

    match store.create(&raw, &password).await {
        Ok(()) => {
            log::info!("Created switch '{}'", raw);
            Ok(HttpResponse::Ok()
                .insert_header(ContentType::plaintext())
                .body(raw))
        }
        Err(SwitchError::AlreadyExists) => {
            log::info!("Already exists: '{}'", raw);
            Err(SwitchError::AlreadyExists)
        }
        Err(err @ SwitchError::InvalidId(_)) => {
            log::info!("Unacceptable id '{}': {}", raw, err);
            Err(err)
        }
        Err(err @ SwitchError::Database(_)) => {
            log::error!("Create of '{}' failed: {}", raw, err);
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// `OPTIONS /{id}`, answered so browsers can send `PUT` cross-origin.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_overrides_query() {
        let query = PasswordQuery {
            password: Some("fromquery".into()),
        };
        assert_eq!(resolve_password(&query, b"frombody"), "frombody");
        assert_eq!(resolve_password(&query, b""), "fromquery");
    }

    #[test]
    fn test_missing_password_is_empty() {
        assert_eq!(resolve_password(&PasswordQuery::default(), b""), "");
    }

    #[test]
    fn test_body_truncated_to_limit() {
        let long = "x".repeat(PASSWORD_LEN + 8);
        let resolved = resolve_password(&PasswordQuery::default(), long.as_bytes());
        assert_eq!(resolved.len(), PASSWORD_LEN);
    }

    #[test]
    fn test_body_truncated_on_char_boundary() {
        let body = format!("{}\u{e9}\u{e9}", "a".repeat(PASSWORD_LEN - 1));
        let resolved = resolve_password(&PasswordQuery::default(), body.as_bytes());
        assert_eq!(resolved.chars().count(), PASSWORD_LEN);
        assert!(resolved.ends_with('\u{e9}'));
        assert!(!resolved.contains('\u{fffd}'));
    }
}
