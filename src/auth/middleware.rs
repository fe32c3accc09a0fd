use std::future::{ready, Ready};

use actix_web::{dev::ServiceRequest, web, Error, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;

use crate::{
    auth::{Claims, JwtService},
    errors::AppError,
};

/// Bearer validator for `HttpAuthentication::bearer`. Valid tokens leave
/// their claims in the request extensions.
pub async fn validate_bearer(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let Some(jwt_service) = req.app_data::<web::Data<JwtService>>() else {
        log::error!("JWT service not configured");
        return Err((
            AppError::InternalError("JWT service not configured".to_string()).into(),
            req,
        ));
    };

    match jwt_service.validate_token(credentials.token()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => {
            log::warn!("Rejected bearer token: {}", e);
            Err((AppError::Unauthorized("Invalid or expired token".to_string()).into(), req))
        }
    }
}

// Extractor for authenticated user in handlers
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
