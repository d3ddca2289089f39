use crate::error::TaskwardenError;
use actix_web::HttpRequest;
use taskwarden_infra::TaskwardenContext;

pub const ADMIN_API_KEY_HEADER: &str = "taskwarden-admin-api-key";

/// Routes that can mutate state without a user session, like the manual
/// deadline-check trigger, require the admin api key header.
pub fn protect_admin_route(
    http_req: &HttpRequest,
    ctx: &TaskwardenContext,
) -> Result<(), TaskwardenError> {
    let api_key = match http_req.headers().get(ADMIN_API_KEY_HEADER) {
        Some(key) => match key.to_str() {
            Ok(key) => key,
            Err(_) => {
                return Err(TaskwardenError::Unauthorized(
                    "Malformed api key provided".into(),
                ))
            }
        },
        None => {
            return Err(TaskwardenError::Unauthorized(format!(
                "Missing the `{}` header",
                ADMIN_API_KEY_HEADER
            )))
        }
    };

    if api_key != ctx.config.api_key {
        return Err(TaskwardenError::Unauthorized(
            "Invalid admin api key provided".into(),
        ));
    }
    Ok(())
}
