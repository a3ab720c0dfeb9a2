//! Request routing
//!
//! A pure classification function over (method, path). The table is explicit
//! and evaluated in a fixed order: the `/users` collection first, then the
//! `/users/{id}` item, then fallthrough. Precedence lives here, not in a
//! regex.

/// The outcome of classifying an inbound (method, path) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListUsers,
    CreateUser,
    DeleteAllUsers,
    GetUser(i32),
    DeleteUser(i32),
    /// Known path, unsupported method (405).
    MethodNotAllowed,
    /// No matching path (404).
    NotFound,
}

/// Classify a request. Method comparison is case-insensitive.
pub fn classify(method: &str, path: &str) -> Route {
    if path == "/users" {
        return if method.eq_ignore_ascii_case("GET") {
            Route::ListUsers
        } else if method.eq_ignore_ascii_case("POST") {
            Route::CreateUser
        } else if method.eq_ignore_ascii_case("DELETE") {
            Route::DeleteAllUsers
        } else {
            Route::MethodNotAllowed
        };
    }

    if let Some(id) = path.strip_prefix("/users/").and_then(parse_user_id) {
        return if method.eq_ignore_ascii_case("GET") {
            Route::GetUser(id)
        } else if method.eq_ignore_ascii_case("DELETE") {
            Route::DeleteUser(id)
        } else {
            Route::MethodNotAllowed
        };
    }

    Route::NotFound
}

/// Parse the id segment: one or more ASCII decimal digits, nothing else.
/// A non-numeric or overflowing segment does not match the item route, so
/// the caller falls through to `NotFound`.
fn parse_user_id(segment: &str) -> Option<i32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
