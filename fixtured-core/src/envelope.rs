//! Response envelopes
//!
//! Every outcome maps to a fixed JSON shape and one of six status codes
//! (200, 201, 400, 404, 405, 500). The shapes are part of the wire contract;
//! change them only deliberately.

use serde_json::json;

use crate::db::users::User;
use crate::error::Error;
use crate::event::ApiResponse;

pub fn user_list(users: &[User]) -> ApiResponse {
    ApiResponse::json(200, &json!({ "users": users }))
}

pub fn user(user: &User) -> ApiResponse {
    ApiResponse::json(200, &json!(user))
}

pub fn created(id: i32, name: &str, email: &str) -> ApiResponse {
    ApiResponse::json(
        201,
        &json!({
            "message": "User added successfully",
            "id": id,
            "name": name,
            "email": email,
        }),
    )
}

pub fn deleted() -> ApiResponse {
    ApiResponse::json(200, &json!({ "message": "User deleted successfully" }))
}

pub fn deleted_all(count: u64) -> ApiResponse {
    ApiResponse::json(
        200,
        &json!({
            "message": "All users deleted successfully",
            "count": count,
        }),
    )
}

pub fn bad_request(message: &str) -> ApiResponse {
    ApiResponse::json(400, &json!({ "error": message }))
}

pub fn user_not_found() -> ApiResponse {
    ApiResponse::json(404, &json!({ "error": "User not found" }))
}

pub fn endpoint_not_found() -> ApiResponse {
    ApiResponse::json(404, &json!({ "error": "Endpoint not found" }))
}

pub fn method_not_allowed() -> ApiResponse {
    ApiResponse::json(405, &json!({ "error": "Method not allowed" }))
}

/// Storage and pool failures surface their diagnostic in the body; this is
/// an internal endpoint, not a public-facing one.
pub fn internal_error(err: &Error) -> ApiResponse {
    ApiResponse::json(
        500,
        &json!({
            "error": "Internal server error",
            "message": err.to_string(),
        }),
    )
}
