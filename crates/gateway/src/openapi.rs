//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::error::{CallableErrorBody, CallableErrorResponse};
use crate::handlers::{DeleteUserRequest, DeleteUserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::deletion_handler::delete_user),
    components(schemas(
        DeleteUserRequest,
        DeleteUserResponse,
        CallableErrorResponse,
        CallableErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags((name = "Users", description = "User account deletion"))
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
