use actix_web::{error::ResponseError, http::header::ContentType, http::StatusCode, HttpResponse};

#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("Invalid switch id: {0}")]
    InvalidId(#[from] ident::InvalidId),

    #[error("Switch already exists")]
    AlreadyExists,

    #[error("Switch does not exist")]
    Nonexistent,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Password longer than {limit} characters")]
    PasswordTooLong { limit: usize },

    #[error("Invalid count: {0}")]
    InvalidCount(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError for SwitchError {
    fn status_code(&self) -> StatusCode {
        match self {
            SwitchError::InvalidId(_) => StatusCode::NOT_ACCEPTABLE,
            SwitchError::AlreadyExists => StatusCode::CONFLICT,
            SwitchError::Nonexistent => StatusCode::NOT_FOUND,
            SwitchError::Unauthorized => StatusCode::UNAUTHORIZED,
            SwitchError::PasswordTooLong { .. } => StatusCode::BAD_REQUEST,
            SwitchError::InvalidCount(_) => StatusCode::BAD_REQUEST,
            SwitchError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SwitchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Store failures stay in the log, not in the response.
        let body = if status.is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status)
            .insert_header(ContentType::plaintext())
            .body(body)
    }
}

pub type Result<T> = std::result::Result<T, SwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = ident::SwitchId::parse("bad id").unwrap_err();
        assert_eq!(
            SwitchError::from(invalid).status_code(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(SwitchError::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(SwitchError::Nonexistent.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            SwitchError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SwitchError::InvalidCount("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let resp = SwitchError::Config("secret path".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
