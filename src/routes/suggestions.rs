use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::core::{presentation::suggestion_view, transfer};
use crate::routes::AppState;

/// Configure landing page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/suggestions", web::get().to(suggestions));
}

/// Decode the transfer payload for the result page
///
/// GET /api/v1/suggestions?data=...
/// GET /api/v1/suggestions?error=...
///
/// Always answers 200 with a `SuggestionView`; decode failures are a page
/// state, not a transport error.
async fn suggestions(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let outcome = transfer::land(req.query_string(), state.landing.min_display()).await;

    match &outcome {
        Ok(recommendation) => tracing::info!(
            "Landing decoded recommendation for menu {}",
            recommendation.recommended_menu.item.id
        ),
        Err(e) => tracing::info!("Landing shows error state: {}", e),
    }

    HttpResponse::Ok().json(suggestion_view(&outcome, &state.landing.page_url()))
}
