//! Trivia API routes and the assembled application router.
//! Routes are unprefixed; CORS applies to all of them.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::handlers::{
    create_question, delete_question, list_categories, list_questions, next_question, questions_by_category,
    search_questions,
};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub(crate) const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn trivia_routes(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:category_id/questions", get(questions_by_category))
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/:question_id", delete(delete_question))
        .route("/quizzes", post(next_question))
        .with_state(state)
}

/// Permissive CORS matching the trivia frontend: configured origin, the usual headers and methods.
pub fn cors_layer(allow_origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = if allow_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(allow_origin.trim()).map_err(|_| ConfigError::InvalidValue {
            key: "CORS_ALLOW_ORIGIN",
            value: allow_origin.to_string(),
        })?;
        AllowOrigin::exact(value)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
}

async fn not_found() -> AppError {
    AppError::NotFound("no such route".into())
}

/// axum answers a wrong method with an empty 405 and the body limit rejects an oversized
/// `Content-Length` with a plain-text 413; give both the error envelope.
async fn envelope_bare_errors(response: Response) -> Response {
    match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            let allow = response.headers().get(header::ALLOW).cloned();
            let mut enveloped = AppError::MethodNotAllowed.into_response();
            if let Some(allow) = allow {
                enveloped.headers_mut().insert(header::ALLOW, allow);
            }
            enveloped
        }
        StatusCode::PAYLOAD_TOO_LARGE if !is_enveloped(&response) => AppError::PayloadTooLarge {
            limit: BODY_LIMIT_BYTES,
        }
        .into_response(),
        _ => response,
    }
}

fn is_enveloped(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Full application: trivia and common routes, CORS, request tracing, and a 64 KiB body limit.
/// 404, 405 and 413 all answer with the JSON error envelope.
pub fn app(state: AppState, settings: &Settings) -> Result<Router, ConfigError> {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(trivia_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(cors_layer(&settings.cors_allow_origin)?)
        .layer(TraceLayer::new_for_http());
    Ok(router)
}
