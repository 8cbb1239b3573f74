use actix_web::HttpRequest;
use helsa_notify_domain::{User, ID};
use helsa_notify_infra::HelsaContext;

use crate::error::HelsaError;

/// Name of the header that carries the id of the authenticated user.
/// The gateway in front of this service verifies the session token and
/// forwards the resolved user id in this header.
pub const USER_ID_HEADER: &str = "x-helsa-user-id";

fn get_user_id(req: &HttpRequest) -> Result<ID, HelsaError> {
    let header = match req.headers().get(USER_ID_HEADER) {
        Some(header) => header,
        None => {
            return Err(HelsaError::Unauthorized(format!(
                "Missing the `{}` header",
                USER_ID_HEADER
            )))
        }
    };
    let header = header.to_str().map_err(|_| {
        HelsaError::Unauthorized(format!("Malformed `{}` header", USER_ID_HEADER))
    })?;
    header.parse::<ID>().map_err(|_| {
        HelsaError::Unauthorized(format!(
            "The `{}` header is not a valid user id",
            USER_ID_HEADER
        ))
    })
}

pub async fn protect_route(req: &HttpRequest, ctx: &HelsaContext) -> Result<User, HelsaError> {
    let user_id = get_user_id(req)?;
    ctx.repos
        .users
        .find(&user_id)
        .await
        .ok_or_else(|| HelsaError::Unauthorized("No user found for the given user id".into()))
}
