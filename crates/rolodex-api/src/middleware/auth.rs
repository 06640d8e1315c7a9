//! Bearer-token authentication middleware.
//!
//! Validates the `Authorization: Bearer <token>` header against the
//! configured JWT secret and attaches the verified identity to request
//! extensions. Requests without a valid token get 401 before any
//! handler runs. Role checks happen in the handlers that need them,
//! against this verified context rather than anything client-supplied.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use log::debug;
use rolodex_auth::{validate_token, AuthSettings};
use rolodex_commons::Role;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::models::MessageResponse;

/// Verified identity of the caller, attached to request extensions by
/// [`AuthMiddleware`] and read back via the `FromRequest` impl.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("authentication required")),
        )
    }
}

/// Authentication middleware factory.
pub struct AuthMiddleware {
    settings: Rc<AuthSettings>,
}

impl AuthMiddleware {
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings: Rc::new(settings) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            settings: self.settings.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    settings: Rc<AuthSettings>,
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<AuthenticatedUser, &'static str> {
        let header = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or("Missing authorization header")?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or("Invalid authorization header format")?;

        let claims = validate_token(token, &self.settings.jwt_secret)
            .map_err(|_| "Invalid or expired token")?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(reason) => {
                debug!("rejected request to {}: {}", req.path(), reason);
                let (request, _) = req.into_parts();
                let response = HttpResponse::Unauthorized()
                    .json(MessageResponse::new(reason))
                    .map_into_right_body();
                Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
            }
        }
    }
}
