use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Multipart, Path, Request,
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use learnhub_core::AppError;
use learnhub_core::errors::format_validation_errors;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Every failure, whether malformed JSON, a missing field, or a rule
/// violation, is a 400 with a readable message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"));
    }

    let error_msg = rejection.body_text();

    if let Some(rest) = error_msg.split("missing field `").nth(1) {
        let field = rest.split('`').next().unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("unknown variant") {
        return AppError::bad_request(anyhow!("Invalid value in request: {}", error_msg));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_validation_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// `Path` extractor whose rejection is an [`AppError`], so a malformed id in
/// the URL answers with the usual `{"error": ...}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    AppError::new(
        rejection.status(),
        anyhow!("Invalid path parameter: {}", rejection.body_text()),
    )
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection_to_error)?;

        Ok(ValidatedPath(value))
    }
}

/// `Multipart` extractor that reports a missing or malformed
/// `multipart/form-data` content type as an [`AppError`].
#[derive(Debug)]
pub struct ValidatedMultipart(pub Multipart);

fn multipart_rejection_to_error(rejection: MultipartRejection) -> AppError {
    if matches!(rejection, MultipartRejection::InvalidBoundary(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: multipart/form-data' header"
        ));
    }

    AppError::new(rejection.status(), anyhow!(rejection.body_text()))
}

impl<S> FromRequest<S> for ValidatedMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(ValidatedMultipart)
            .map_err(multipart_rejection_to_error)
    }
}
