//! HTTP handler functions for the REAL-UP map server.

use actix_files::NamedFile;
use actix_multipart::form::{MultipartForm, text::Text};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, http::header::ContentType, web};
use realup_map_plot_models::{PlotFailure, PlotOutcome};
use serde::Serialize;

use crate::{AppState, pages};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Always `true` while the server is answering.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// Multipart form posted by the index page.
///
/// The submit button's `action` field is ignored.
#[derive(Debug, MultipartForm)]
pub struct MapForm {
    /// Selected city.
    #[multipart(rename = "scenario-group")]
    pub city: Option<Text<String>>,
    /// Selected period.
    #[multipart(rename = "period-group")]
    pub period: Option<Text<String>>,
}

impl MapForm {
    /// Returns `(city, period)`, with missing fields as empty strings.
    #[must_use]
    pub fn selection(self) -> (String, String) {
        (
            self.city.map(|city| city.0).unwrap_or_default(),
            self.period.map(|period| period.0).unwrap_or_default(),
        )
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /`
///
/// Serves the city/period selection form.
pub async fn index() -> HttpResponse {
    log::info!("Serving homepage");
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::index_page())
}

/// `POST /realup-map`
///
/// Runs the plot pipeline on the blocking pool and renders the success page
/// or the error page with the matching status.
pub async fn realup_map(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<MapForm>,
) -> HttpResponse {
    let (city, period) = form.selection();
    log::info!("Map request started: city={city:?} period={period:?}");

    let config = state.plot.clone();
    let (city_log, period_log) = (city.clone(), period.clone());
    let outcome = web::block(move || realup_map_plot::plot(&config, &city, &period))
        .await
        .unwrap_or_else(|e| PlotOutcome::Failure(PlotFailure::new(e.to_string())));

    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    log::info!(
        "Map request finished: city={city_log:?} period={period_log:?} status={}",
        status.as_u16()
    );

    let body = match &outcome {
        PlotOutcome::Success(summary) => pages::layout_page(summary),
        PlotOutcome::Failure(failure) => pages::error_page(failure),
    };

    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// `GET /map`
///
/// Serves the most recently rendered map, or 404 if none exists yet.
pub async fn map_view(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    match NamedFile::open_async(&state.plot.map_path).await {
        Ok(file) => file
            .use_etag(false)
            .use_last_modified(false)
            .into_response(&req),
        Err(e) => {
            log::debug!("No rendered map at {}: {e}", state.plot.map_path.display());
            HttpResponse::NotFound().body("No map has been rendered yet")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use actix_web::{App, http::header, test};
    use realup_map_plot::PlotConfig;

    use super::*;
    use crate::configure;

    const BOUNDARY: &str = "realupboundary";

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "display_name": "Lincoln Park",
                    "display_emotions": "joy(0.8), trust(0.2)",
                    "display_sentiment": "positive(0.9)",
                    "display_review": "Quiet streets and a great park."
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-87.65, 41.92], [-87.63, 41.92], [-87.63, 41.93], [-87.65, 41.92]]]
                }
            }
        ]
    }"#;

    const LISTINGS: &str = "id,name,neighbourhood,latitude,longitude,room_type,price,last_review\n\
        1,Loft,Lincoln Park,41.92,-87.64,Entire home/apt,150,2018-06-30\n\
        2,Room,Lincoln Park,41.921,-87.641,Private room,60,\n\
        3,Couch,Lincoln Park,41.922,-87.642,Shared room,25,2018-12-01\n";

    /// Creates `<tmp>/realup_map_server_tests/<name>` with a Chicago dataset
    /// for the whole-year period.
    fn fixture(name: &str) -> PlotConfig {
        let root = std::env::temp_dir()
            .join("realup_map_server_tests")
            .join(name);
        let _ = std::fs::remove_dir_all(&root);
        let city_dir = root.join("data/chicago");
        std::fs::create_dir_all(&city_dir).unwrap();
        std::fs::write(city_dir.join("all-2018.geojson"), REGIONS).unwrap();
        std::fs::write(city_dir.join(realup_map_plot::LISTINGS_FILE), LISTINGS).unwrap();

        PlotConfig {
            data_dir: root.join("data"),
            map_path: root.join("templates/map.html"),
            event_logging: false,
            ..PlotConfig::default()
        }
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn map_request(fields: &[(&str, &str)]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/realup-map")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(fields))
    }

    fn state(config: PlotConfig) -> web::Data<AppState> {
        web::Data::new(AppState {
            plot: Arc::new(config),
        })
    }

    fn read_map(path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    #[actix_web::test]
    async fn index_serves_form() {
        let app = test::init_service(
            App::new()
                .app_data(state(PlotConfig::default()))
                .configure(configure),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("scenario-group"));
        assert!(body.contains("period-group"));
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(
            App::new()
                .app_data(state(PlotConfig::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn chicago_whole_year_renders_layout() {
        let config = fixture("chicago_whole_year");
        let map_path = config.map_path.clone();
        let app = test::init_service(App::new().app_data(state(config)).configure(configure)).await;

        let req = map_request(&[
            ("scenario-group", "chicago"),
            ("period-group", "3"),
            ("action", "plot"),
        ])
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Chicago, IL"), "{body}");
        assert!(body.contains("3 listings plotted"), "{body}");

        let map = read_map(&map_path).expect("map was written");
        assert!(map.contains("Lincoln Park"));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/map").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let served = test::read_body(resp).await;
        assert_eq!(std::str::from_utf8(&served).unwrap(), map);
    }

    #[actix_web::test]
    async fn missing_geojson_renders_error_and_keeps_map() {
        let config = fixture("missing_geojson");
        let map_path = config.map_path.clone();
        std::fs::create_dir_all(map_path.parent().unwrap()).unwrap();
        std::fs::write(&map_path, "previous map").unwrap();
        let app = test::init_service(App::new().app_data(state(config)).configure(configure)).await;

        let req = map_request(&[("scenario-group", "chicago"), ("period-group", "1")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("type error"), "{body}");
        assert!(body.contains("monthly-jul-2018.geojson"), "{body}");
        assert_eq!(read_map(&map_path).as_deref(), Some("previous map"));
    }

    #[actix_web::test]
    async fn missing_fields_fail_data_loading() {
        let config = fixture("missing_fields");
        let map_path = config.map_path.clone();
        let app = test::init_service(App::new().app_data(state(config)).configure(configure)).await;

        let req = map_request(&[("action", "plot")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(read_map(&map_path).is_none());
    }

    #[actix_web::test]
    async fn map_view_is_404_before_first_render() {
        let config = fixture("no_map_yet");
        let app = test::init_service(App::new().app_data(state(config)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/map").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
