//! # Access Gate
//!
//! Middleware protecting vendor routes. Extracts the bearer token from
//! the `Authorization` header, verifies it, and attaches the decoded
//! [`Claims`] to the request extensions for downstream handlers. A
//! request failing the gate never reaches the wrapped service.
//!
//! Status mapping:
//! - missing header or token segment → `401 Unauthorized`
//! - invalid signature or expired token → `403 Forbidden`

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::models::responses::ErrorBody;

use super::jwt::{extract_bearer, TokenIssuer};
use super::AuthError;

/// Middleware factory wrapping protected scopes.
///
/// ```rust,ignore
/// web::scope("/vendors")
///     .wrap(AccessGate::new(tokens.clone()))
///     .route("", web::get().to(handlers::get_vendors))
/// ```
#[derive(Clone)]
pub struct AccessGate {
    tokens: Rc<TokenIssuer>,
}

impl AccessGate {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self {
            tokens: Rc::new(tokens),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

/// Service wrapper produced by [`AccessGate`].
pub struct AccessGateMiddleware<S> {
    service: S,
    tokens: Rc<TokenIssuer>,
}

impl<S> AccessGateMiddleware<S> {
    /// Pull and verify the bearer token from the request headers.
    fn authenticate(&self, req: &ServiceRequest) -> Result<crate::auth::Claims, AuthError> {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token = extract_bearer(header).ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token)
    }
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => {
                let response = match e {
                    AuthError::MissingToken => HttpResponse::Unauthorized()
                        .json(ErrorBody::message("401 Unauthorized", "Token required.")),
                    _ => HttpResponse::Forbidden().json(ErrorBody::message(
                        "403 Forbidden",
                        "Invalid or expired token.",
                    )),
                };
                let res = req.into_response(response).map_into_right_body();
                Box::pin(ready(Ok(res)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("gate-test-secret", 3600)
    }

    #[actix_rt::test]
    async fn missing_header_yields_401() {
        let app = test::init_service(
            App::new()
                .wrap(AccessGate::new(issuer()))
                .route("/guarded", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get().uri("/guarded").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_rt::test]
    async fn missing_token_segment_yields_401() {
        let app = test::init_service(
            App::new()
                .wrap(AccessGate::new(issuer()))
                .route("/guarded", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, "Bearer"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_rt::test]
    async fn garbage_token_yields_403() {
        let app = test::init_service(
            App::new()
                .wrap(AccessGate::new(issuer()))
                .route("/guarded", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, "Bearer not-a-real-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 403);
    }

    #[actix_rt::test]
    async fn token_from_wrong_secret_yields_403() {
        let app = test::init_service(
            App::new()
                .wrap(AccessGate::new(issuer()))
                .route("/guarded", web::get().to(protected)),
        )
        .await;

        let token = TokenIssuer::new("different-secret", 3600)
            .issue("a@b.com")
            .unwrap();
        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 403);
    }

    #[actix_rt::test]
    async fn valid_token_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(AccessGate::new(issuer()))
                .route("/guarded", web::get().to(protected)),
        )
        .await;

        let token = issuer().issue("a@b.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
    }
}
