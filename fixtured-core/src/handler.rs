//! Request dispatch
//!
//! Classification and client-input checks run before storage is touched;
//! only a matched, well-formed request acquires a pool handle. Internal
//! failures are caught at this boundary and rendered as the 500 envelope,
//! so `handle` itself never fails.

use crate::body::CreateUser;
use crate::db::pool::PoolManager;
use crate::db::users::UserRepo;
use crate::envelope;
use crate::error::Error;
use crate::event::{ApiRequest, ApiResponse};
use crate::routes::{classify, Route};

#[derive(Clone)]
pub struct Handler {
    pool: PoolManager,
}

impl Handler {
    pub fn new(pool: PoolManager) -> Self {
        Self { pool }
    }

    pub async fn handle(&self, req: &ApiRequest) -> ApiResponse {
        tracing::info!(method = %req.http_method, path = %req.path, "request received");

        match self.dispatch(req).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(error = %err, "request failed");
                envelope::internal_error(&err)
            }
        }
    }

    async fn dispatch(&self, req: &ApiRequest) -> Result<ApiResponse, Error> {
        match classify(&req.http_method, &req.path) {
            Route::NotFound => Ok(envelope::endpoint_not_found()),
            Route::MethodNotAllowed => Ok(envelope::method_not_allowed()),

            Route::ListUsers => {
                let pool = self.pool.acquire().await?;
                let users = UserRepo::new(&pool).list().await?;
                Ok(envelope::user_list(&users))
            }

            Route::GetUser(id) => {
                let pool = self.pool.acquire().await?;
                match UserRepo::new(&pool).get(id).await? {
                    Some(user) => Ok(envelope::user(&user)),
                    None => Ok(envelope::user_not_found()),
                }
            }

            Route::CreateUser => {
                let payload = match CreateUser::parse(req.body.as_deref()) {
                    Ok(payload) => payload,
                    Err(err) => return Ok(envelope::bad_request(&err.to_string())),
                };

                let pool = self.pool.acquire().await?;
                match UserRepo::new(&pool).insert(&payload.name, &payload.email).await {
                    Ok(id) => Ok(envelope::created(id, &payload.name, &payload.email)),
                    Err(err @ Error::Validation { .. }) => {
                        Ok(envelope::bad_request(&err.to_string()))
                    }
                    Err(err) => Err(err),
                }
            }

            Route::DeleteUser(id) => {
                let pool = self.pool.acquire().await?;
                if UserRepo::new(&pool).delete(id).await? {
                    Ok(envelope::deleted())
                } else {
                    Ok(envelope::user_not_found())
                }
            }

            Route::DeleteAllUsers => {
                let pool = self.pool.acquire().await?;
                let count = UserRepo::new(&pool).delete_all().await?;
                Ok(envelope::deleted_all(count))
            }
        }
    }
}
