use actix_web::{web, HttpResponse, Responder};
use crate::core::deck::SwipeError;
use crate::models::{ErrorResponse, Recovery, SwipeRequest};
use crate::routes::AppState;
use crate::services::SessionError;
use uuid::Uuid;

/// Configure preference session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}/swipe", web::post().to(swipe));
}

/// Start a preference session
///
/// POST /api/v1/sessions
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let view = state.sessions.start().await;
    HttpResponse::Created().json(view)
}

/// Current session state
///
/// GET /api/v1/sessions/{id}
async fn get_session(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    match state.sessions.view(id.into_inner()).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => session_error(e),
    }
}

/// Swipe the current card
///
/// POST /api/v1/sessions/{id}/swipe
///
/// Request body:
/// ```json
/// { "direction": "left|right" }
/// ```
///
/// The swipe that completes the deck carries `redirect`, the landing
/// address with the encoded result.
async fn swipe(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    match state.sessions.swipe(id.into_inner(), req.direction).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => session_error(e),
    }
}

fn session_error(err: SessionError) -> HttpResponse {
    match err {
        SessionError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session not found".to_string(),
            message: err.to_string(),
            status_code: 404,
            recovery: Some(Recovery::ReturnToStart),
        }),
        SessionError::Swipe(SwipeError::Debounced { .. }) => HttpResponse::TooManyRequests().json(ErrorResponse {
            error: "Swipe too soon".to_string(),
            message: err.to_string(),
            status_code: 429,
            recovery: None,
        }),
        SessionError::Swipe(SwipeError::NotReady(_)) => HttpResponse::Conflict().json(ErrorResponse {
            error: "Swipe not accepted".to_string(),
            message: err.to_string(),
            status_code: 409,
            recovery: None,
        }),
    }
}
