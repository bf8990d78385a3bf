use actix_web::{web, HttpResponse};
use hotlist_core::{TrendingItem, TrendingService};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Envelope returned by the trending endpoints. `count` is only present on
/// success; error responses carry an explicit `data: null`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub success: bool,
    pub data: Option<Vec<TrendingItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub message: String,
}

impl TrendingResponse {
    fn ok(items: Vec<TrendingItem>, message: &str) -> Self {
        let count = items.len();
        Self {
            success: true,
            data: Some(items),
            count: Some(count),
            message: message.to_owned(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message,
        }
    }
}

async fn get_trending(service: web::Data<TrendingService>) -> HttpResponse {
    match service.current().await {
        Ok(items) => HttpResponse::Ok().json(TrendingResponse::ok(items, "trending list loaded")),
        Err(error) => {
            error!(%error, "could not serve trending list");
            HttpResponse::InternalServerError().json(TrendingResponse::failure(format!(
                "failed to load trending list: {}",
                error
            )))
        }
    }
}

async fn refresh_trending(service: web::Data<TrendingService>) -> HttpResponse {
    match service.force_refresh().await {
        Ok(items) => {
            HttpResponse::Ok().json(TrendingResponse::ok(items, "trending list refreshed"))
        }
        Err(error) => {
            error!(%error, "manual refresh failed");
            HttpResponse::InternalServerError().json(TrendingResponse::failure(format!(
                "failed to refresh trending list: {}",
                error
            )))
        }
    }
}

/// Liveness plus readiness: 503 until the startup refresh has completed.
async fn health(service: web::Data<TrendingService>) -> HttpResponse {
    if service.is_ready() {
        HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "starting" }))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/trending").route(web::get().to(get_trending)))
        .service(web::resource("/api/trending/refresh").route(web::post().to(refresh_trending)))
        .service(web::resource("/health").route(web::get().to(health)));
}
