use actix_web::{http::StatusCode, test, web, App};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use student_stress::api;
use student_stress::config::EstimatorSettings;
use student_stress::StressEstimator;

fn estimator() -> StressEstimator {
    StressEstimator::with_rng(&EstimatorSettings { latency_ms: 10 }, StdRng::seed_from_u64(99))
}

macro_rules! app {
    ($estimator:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($estimator.clone()))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_and_homepage() {
    let est = estimator();
    let app = app!(est);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("id=\"sleep_hours\""));
}

#[actix_web::test]
async fn test_estimate_with_body() {
    let est = estimator();
    let app = app!(est);

    let req = test::TestRequest::post()
        .uri("/estimate")
        .set_json(json!({
            "study_hours": 6.0,
            "sleep_hours": 7.0,
            "gpa": 3.0,
            "physical_activity": 3.0,
            "social_activity": 3.0
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["estimate"]["level"], "High");
    assert_eq!(body["score_display"], "86.0%");
    assert_eq!(body["interpretation"]["severity"], "danger");

    let req = test::TestRequest::get().uri("/estimate/state").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["state"], "resolved");
    assert_eq!(state["estimate"]["level"], "High");
}

#[actix_web::test]
async fn test_estimate_uses_held_inputs_when_body_empty() {
    let est = estimator();
    let app = app!(est);

    let req = test::TestRequest::patch()
        .uri("/inputs")
        .set_json(json!({ "study_hours": 4.0, "sleep_hours": 8.0, "physical_activity": 5.0, "social_activity": 5.0 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["changed"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::post()
        .uri("/estimate?locale=id")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["estimate"]["level"], "Low");
    assert_eq!(body["interpretation"]["label"], "Rendah");
    assert_eq!(body["interpretation"]["severity"], "success");
}

#[actix_web::test]
async fn test_patch_same_value_reports_no_change() {
    let est = estimator();
    let app = app!(est);

    for expected in [1, 0] {
        let req = test::TestRequest::patch()
            .uri("/inputs")
            .set_json(json!({ "gpa": 3.8 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"].as_array().unwrap().len(), expected);
        assert_eq!(body["inputs"]["gpa"], 3.8);
    }

    let req = test::TestRequest::get().uri("/estimate/state").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["state"], "idle");
}

#[actix_web::test]
async fn test_rejected_patch_leaves_inputs_untouched() {
    let est = estimator();
    let app = app!(est);

    // One unrepresentable value rejects the whole patch.
    let req = test::TestRequest::patch()
        .uri("/inputs")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{ "study_hours": 12.0, "gpa": 1e999 }"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/inputs").to_request();
    let inputs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(inputs["study_hours"], 6.0);
    assert_eq!(inputs["gpa"], 3.0);
}

#[actix_web::test]
async fn test_busy_estimator_returns_conflict() {
    let est = estimator();
    let app = app!(est);

    let pending = est.request_current().unwrap();
    let req = test::TestRequest::post().uri("/estimate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    pending.await.unwrap();
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let est = estimator();
    let app = app!(est);

    let req = test::TestRequest::post()
        .uri("/estimate")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"study_hours\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_interpretation_lookup() {
    let est = estimator();
    let app = app!(est);

    let req = test::TestRequest::get().uri("/interpretation/moderate").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["severity"], "warning");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::get().uri("/interpretation/extreme").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_insights_endpoint() {
    let est = estimator();
    let app = app!(est);

    let req = test::TestRequest::get().uri("/insights").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_students"], 2000);
    assert_eq!(body["distribution"][2]["level"], "High");
    assert_eq!(body["distribution"][2]["percentage"], 51.5);

    let importance = body["feature_importance"].as_array().unwrap();
    assert_eq!(importance.len(), 5);
    assert_eq!(importance[0]["factor"], "Study hours");
    assert_eq!(importance[0]["importance"], 0.28);
    assert_eq!(importance[0]["percentage"], 28.0);
    assert_eq!(importance[4]["factor"], "Social activity");
    assert_eq!(body["model_summary"]["accuracy_percentage"], 87.3);
    assert_eq!(body["headline_facts"][0]["percentage"], 75.0);
}
