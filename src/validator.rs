use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

/// JSON extractor that validates the body once at the boundary.
///
/// Body shape problems (malformed JSON, missing or mistyped fields) map to
/// 400; constraint violations map to 422 with the failing fields' messages.
/// Handlers receiving a `ValidatedJson<T>` can assume the shape holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(anyhow::anyhow!(rejection_message(&rejection)))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow::anyhow!(collect_messages(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            if let Some(field) = missing_field(&text) {
                format!("{field} is required")
            } else if text.contains("invalid type") {
                "Invalid field type in request".to_string()
            } else {
                "Invalid request body".to_string()
            }
        }
        _ => "Invalid request body".to_string(),
    }
}

// serde reports an absent required field as: missing field `<name>`
fn missing_field(text: &str) -> Option<&str> {
    text.split("missing field `").nth(1)?.split('`').next()
}

/// Joins every field's violation messages into one line, sorted so the
/// response is stable regardless of map iteration order.
fn collect_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
