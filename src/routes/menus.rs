use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{errors::LoadError, presentation::menu_detail_view};
use crate::models::{ErrorResponse, MenuPath, Recovery};
use crate::routes::AppState;

/// Configure menu detail routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/menus/{id}", web::get().to(menu_detail));
}

/// Menu detail with its shop
///
/// GET /api/v1/menus/{id}
async fn menu_detail(state: web::Data<AppState>, path: web::Path<MenuPath>) -> impl Responder {
    if let Err(errors) = path.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            recovery: Some(Recovery::Back),
        });
    }

    match state.catalog.menu_detail(path.id).await {
        Ok(detail) => HttpResponse::Ok().json(menu_detail_view(&detail)),
        Err(e @ LoadError::NotFound { .. }) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Menu not found".to_string(),
            message: e.to_string(),
            status_code: 404,
            recovery: Some(Recovery::Back),
        }),
        Err(e) => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Menu not found".to_string(),
            message: e.to_string(),
            status_code: 502,
            recovery: Some(Recovery::Back),
        }),
    }
}
