// Integration tests for Ramen Swipe

use actix_web::{test, web, App};
use mockito::{Matcher, Server, ServerGuard};
use ramen_swipe::config::LandingSettings;
use ramen_swipe::core::{transfer, DeckPhase, ImageNormalizer, RecommendationClient, SwipeError};
use ramen_swipe::models::{MenuItem, PhaseView, Recovery, SubmissionResult, SuggestionView, SwipeDirection};
use ramen_swipe::routes::{configure_routes, AppState};
use ramen_swipe::services::{MenuApiClient, MenuCatalog, SessionError, SessionManager, SessionStore};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const IMAGE_BASE: &str = "https://ramen.test";

fn api_client(url: &str) -> Arc<MenuApiClient> {
    Arc::new(MenuApiClient::new(url, Duration::from_secs(2), ImageNormalizer::new(IMAGE_BASE)).unwrap())
}

fn manager(url: &str, fallback: Vec<MenuItem>) -> SessionManager {
    let api = api_client(url);
    SessionManager::new(
        SessionStore::new(100, Duration::from_secs(60)),
        Arc::new(MenuCatalog::new(api.clone(), fallback)),
        RecommendationClient::new(api),
        Duration::ZERO,
        "/suggestions",
    )
}

fn deck_body() -> String {
    json!({
        "menus": [
            { "id": 1, "name": "Shoyu", "genre_name": "ramen", "noodle_name": "medium", "soup_name": "shoyu", "image_url": "/images/1.jpg" },
            { "id": 2, "name": "Miso", "genre_name": "ramen", "noodle_name": "thick", "soup_name": "miso", "image_url": "https://cdn.test/2.jpg" },
            { "id": 3, "name": "Shio", "genre_name": "ramen", "noodle_name": "thin", "soup_name": "shio", "image_url": null }
        ]
    })
    .to_string()
}

fn recommendation_body() -> String {
    json!({
        "recommended_menu": {
            "id": 3,
            "name": "Shio",
            "genre_name": "ramen",
            "noodle_name": "thin",
            "soup_name": "shio",
            "image_url": "/images/3.jpg",
            "shop": { "name": "Ramen Taro", "address": "Shibuya, Tokyo", "google_map_url": "https://maps.google.com" }
        },
        "reason": "You liked light soups."
    })
    .to_string()
}

async fn mock_deck(server: &mut ServerGuard, body: String) -> mockito::Mock {
    server
        .mock("GET", "/random_menus")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_deck_images_are_normalized() {
    let mut server = Server::new_async().await;
    let mock = mock_deck(&mut server, deck_body()).await;

    let menus = api_client(&server.url()).get_random_menus().await.unwrap();

    mock.assert_async().await;
    assert_eq!(menus.len(), 3);
    assert_eq!(menus[0].image_url.as_deref(), Some("https://ramen.test/images/1.jpg"));
    assert_eq!(menus[1].image_url.as_deref(), Some("https://cdn.test/2.jpg"));
    assert_eq!(menus[2].image_url, None);
}

#[tokio::test]
async fn test_empty_likes_skip_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommended_menus")
        .expect(0)
        .create_async()
        .await;

    let client = RecommendationClient::new(api_client(&server.url()));
    let result = client.submit(&[], &[1, 2, 3]).await;

    mock.assert_async().await;
    assert_eq!(result, SubmissionResult::failure("no liked items"));
}

#[tokio::test]
async fn test_submit_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommended_menus")
        .match_body(Matcher::Json(json!({
            "select_menu_ids": [1, 3],
            "not_selected_menu_ids": [2]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recommendation_body())
        .create_async()
        .await;

    let client = RecommendationClient::new(api_client(&server.url()));
    let result = client.submit(&[1, 3], &[2]).await;

    mock.assert_async().await;
    match result {
        SubmissionResult::Success(recommendation) => {
            assert_eq!(recommendation.recommended_menu.item.id, 3);
            assert_eq!(
                recommendation.recommended_menu.item.image_url.as_deref(),
                Some("https://ramen.test/images/3.jpg")
            );
            assert_eq!(recommendation.reason, "You liked light soups.");
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_service_error_becomes_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommended_menus")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let client = RecommendationClient::new(api_client(&server.url()));
    let result = client.submit(&[1], &[]).await;

    mock.assert_async().await;
    assert_eq!(result, SubmissionResult::failure("recommendation service error"));
}

#[tokio::test]
async fn test_missing_recommended_menu_becomes_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommended_menus")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "reason": "nothing" }).to_string())
        .create_async()
        .await;

    let client = RecommendationClient::new(api_client(&server.url()));
    let result = client.submit(&[1], &[]).await;

    mock.assert_async().await;
    assert_eq!(
        result,
        SubmissionResult::failure("recommendation response is missing a recommended menu")
    );
}

#[tokio::test]
async fn test_unreachable_service_becomes_failure() {
    let client = RecommendationClient::new(api_client("http://127.0.0.1:1"));
    let result = client.submit(&[1], &[]).await;

    assert!(!result.is_success());
}

async fn mock_slow_recommendation(server: &mut ServerGuard, delay: Duration) -> mockito::Mock {
    server
        .mock("POST", "/recommended_menus")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(move |w| {
            std::thread::sleep(delay);
            w.write_all(recommendation_body().as_bytes())
        })
        .create_async()
        .await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_becomes_failure() {
    let mut server = Server::new_async().await;
    let _recommend = mock_slow_recommendation(&mut server, Duration::from_millis(1500)).await;

    let api = MenuApiClient::new(
        server.url(),
        Duration::from_millis(300),
        ImageNormalizer::new(IMAGE_BASE),
    )
    .unwrap();
    let client = RecommendationClient::new(Arc::new(api));
    let result = client.submit(&[1], &[2]).await;

    assert_eq!(result, SubmissionResult::failure("recommendation service error"));
}

#[tokio::test]
async fn test_menu_detail_images_are_normalized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/menu_with_shops/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 5,
                "name": "Tsukemen",
                "genre_name": "tsukemen",
                "noodle_name": "thick",
                "soup_name": "gyokai",
                "image_url": "/a.jpg",
                "shop": { "id": 7, "name": "Ramen Taro", "address": "Shibuya, Tokyo" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let catalog = MenuCatalog::new(api_client(&server.url()), vec![]);
    let detail = catalog.menu_detail(5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(detail.item.id, 5);
    assert_eq!(detail.item.image_url.as_deref(), Some("https://ramen.test/a.jpg"));
    assert_eq!(detail.shop.name, "Ramen Taro");
}

fn single_card_deck() -> String {
    json!({
        "menus": [
            { "id": 3, "name": "Shio", "genre_name": "ramen", "noodle_name": "thin", "soup_name": "shio", "image_url": null }
        ]
    })
    .to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_swipe_while_submitting_is_rejected() {
    let mut server = Server::new_async().await;
    let _deck = mock_deck(&mut server, single_card_deck()).await;
    let _recommend = mock_slow_recommendation(&mut server, Duration::from_millis(800)).await;

    let sessions = manager(&server.url(), vec![]);
    let id = sessions.start().await.session_id;

    let completing = tokio::spawn({
        let sessions = sessions.clone();
        async move { sessions.swipe(id, SwipeDirection::Right).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(matches!(
        sessions.swipe(id, SwipeDirection::Left).await,
        Err(SessionError::Swipe(SwipeError::NotReady(DeckPhase::Submitting)))
    ));

    let view = completing.await.unwrap().unwrap();
    assert!(view.redirect.is_some_and(|r| r.starts_with("/suggestions?data=")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_result_discarded_when_session_ends_mid_submission() {
    let mut server = Server::new_async().await;
    let _deck = mock_deck(&mut server, single_card_deck()).await;
    let _recommend = mock_slow_recommendation(&mut server, Duration::from_millis(800)).await;

    let sessions = manager(&server.url(), vec![]);
    let id = sessions.start().await.session_id;

    let completing = tokio::spawn({
        let sessions = sessions.clone();
        async move { sessions.swipe(id, SwipeDirection::Right).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(sessions.store().remove(&id).await.is_some());

    assert!(matches!(
        completing.await.unwrap(),
        Err(SessionError::NotFound(gone)) if gone == id
    ));
}

#[tokio::test]
async fn test_session_end_to_end() {
    let mut server = Server::new_async().await;
    let _deck = mock_deck(&mut server, deck_body()).await;
    let recommend = server
        .mock("POST", "/recommended_menus")
        .match_body(Matcher::Json(json!({
            "select_menu_ids": [1, 3],
            "not_selected_menu_ids": [2]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recommendation_body())
        .expect(1)
        .create_async()
        .await;

    let sessions = manager(&server.url(), vec![]);
    let view = sessions.start().await;
    let id = view.session_id;

    assert_eq!(view.phase, PhaseView::Ready);
    assert_eq!(view.progress.as_deref(), Some("1 / 3"));

    let view = sessions.swipe(id, SwipeDirection::Right).await.unwrap();
    assert_eq!(view.redirect, None);
    let view = sessions.swipe(id, SwipeDirection::Left).await.unwrap();
    assert_eq!(view.progress.as_deref(), Some("3 / 3"));
    let view = sessions.swipe(id, SwipeDirection::Right).await.unwrap();

    recommend.assert_async().await;
    assert_eq!(view.phase, PhaseView::Completed);

    let redirect = view.redirect.expect("completing swipe carries the redirect");
    let (path, query) = redirect.split_once('?').unwrap();
    assert_eq!(path, "/suggestions");

    let recommendation = transfer::decode_query(query).unwrap();
    assert_eq!(recommendation.recommended_menu.item.id, 3);

    // the session is consumed once its result has been handed off
    assert!(matches!(
        sessions.swipe(id, SwipeDirection::Right).await,
        Err(SessionError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_all_passed_redirects_with_error() {
    let mut server = Server::new_async().await;
    let _deck = mock_deck(&mut server, deck_body()).await;
    let recommend = server
        .mock("POST", "/recommended_menus")
        .expect(0)
        .create_async()
        .await;

    let sessions = manager(&server.url(), vec![]);
    let id = sessions.start().await.session_id;

    let mut last = None;
    for _ in 0..3 {
        last = Some(sessions.swipe(id, SwipeDirection::Left).await.unwrap());
    }

    recommend.assert_async().await;
    assert_eq!(
        last.and_then(|view| view.redirect).as_deref(),
        Some("/suggestions?error=no%20liked%20items")
    );
}

#[tokio::test]
async fn test_empty_deck_never_submits() {
    let mut server = Server::new_async().await;
    let _deck = mock_deck(&mut server, json!({ "menus": [] }).to_string()).await;
    let recommend = server
        .mock("POST", "/recommended_menus")
        .expect(0)
        .create_async()
        .await;

    let sessions = manager(&server.url(), vec![]);
    let view = sessions.start().await;

    assert_eq!(view.phase, PhaseView::Empty);
    assert_eq!(view.recovery, Some(Recovery::ReturnToStart));
    assert!(sessions.swipe(view.session_id, SwipeDirection::Right).await.is_err());
    recommend.assert_async().await;
}

#[tokio::test]
async fn test_deck_failure_uses_fallback_when_configured() {
    let mut server = Server::new_async().await;
    let _deck = server
        .mock("GET", "/random_menus")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let without = manager(&server.url(), vec![]).start().await;
    assert_eq!(without.phase, PhaseView::LoadFailed);

    let fallback = vec![MenuItem {
        id: 999,
        name: "Sample ramen".to_string(),
        genre_name: "ramen".to_string(),
        noodle_name: "medium".to_string(),
        soup_name: "shoyu".to_string(),
        image_url: Some("/images/sample.jpg".to_string()),
    }];
    let with = manager(&server.url(), fallback).start().await;

    assert_eq!(with.phase, PhaseView::Ready);
    let card = with.current.unwrap();
    assert_eq!(card.id, 999);
    assert_eq!(card.image.as_deref(), Some("https://ramen.test/images/sample.jpg"));
}

fn app_state(url: &str) -> AppState {
    let api = api_client(url);
    let catalog = Arc::new(MenuCatalog::new(api.clone(), vec![]));
    AppState {
        sessions: SessionManager::new(
            SessionStore::new(100, Duration::from_secs(60)),
            catalog.clone(),
            RecommendationClient::new(api),
            Duration::ZERO,
            "/suggestions",
        ),
        catalog,
        landing: LandingSettings {
            min_display_ms: 0,
            suggestions_path: "/suggestions".to_string(),
            share_origin: "https://ramen.test".to_string(),
        },
    }
}

#[actix_web::test]
async fn test_suggestions_route_error_precedence() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:1")))
            .configure(configure_routes),
    )
    .await;

    let data = urlencoding::encode(&recommendation_body()).into_owned();
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/suggestions?data={}&error=foo", data))
        .to_request();
    let view: SuggestionView = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        view,
        SuggestionView::Error {
            message: "foo".to_string(),
            recovery: Recovery::ReturnToStart,
        }
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/suggestions?data={}", data))
        .to_request();
    let view: SuggestionView = test::call_and_read_body_json(&app, req).await;

    match view {
        SuggestionView::Loaded { id, shop, share_url, .. } => {
            assert_eq!(id, 3);
            assert_eq!(shop.map(|s| s.name).as_deref(), Some("Ramen Taro"));
            assert!(share_url.contains(&*urlencoding::encode("https://ramen.test/suggestions")));
        }
        other => panic!("expected loaded view, got {:?}", other),
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/suggestions?data=%7Bbroken")
        .to_request();
    let view: SuggestionView = test::call_and_read_body_json(&app, req).await;
    assert!(matches!(view, SuggestionView::Error { .. }));
}

#[actix_web::test]
async fn test_menu_detail_not_found() {
    let mut server = Server::new_async().await;
    let _detail = server
        .mock("GET", "/menu_with_shops/42")
        .with_status(404)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/menus/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get().uri("/api/v1/menus/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
