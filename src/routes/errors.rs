use blogicum_models::Error;
use rocket::{
    http::Status,
    request::Request,
    response::{self, status::Custom, Responder},
};
use rocket_contrib::json::Json;
use serde_json::json;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> ApiError {
        ApiError(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> ApiError {
        tracing::warn!("rejected invalid form: {}", errors);
        ApiError(Error::InvalidValue)
    }
}

impl<'r> Responder<'r> for ApiError {
    fn respond_to(self, req: &Request<'_>) -> response::Result<'r> {
        let (status, message) = match self.0 {
            Error::NotFound => (Status::NotFound, "Page not found"),
            Error::Unauthorized => (Status::Forbidden, "You are not allowed to do this"),
            Error::InvalidValue => (Status::UnprocessableEntity, "Invalid form data"),
            other => {
                tracing::error!("internal error: {:?}", other);
                (Status::InternalServerError, "Internal error")
            }
        };
        Custom(status, Json(json!({ "error": message }))).respond_to(req)
    }
}

#[catch(404)]
pub fn not_found(_req: &Request<'_>) -> Json<serde_json::Value> {
    Json(json!({ "error": "Page not found" }))
}

#[catch(500)]
pub fn server_error(_req: &Request<'_>) -> Json<serde_json::Value> {
    Json(json!({ "error": "Internal error" }))
}
