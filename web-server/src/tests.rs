//! Router tests against stub classifiers

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use health_assistant_core::{
    ClassLabel, Classifier, DomainId, FeatureVector, HealthAssistant, InferenceError, ModelRegistry,
    ValidationPolicy,
};

use crate::{config::Config, create_router, AppState};

struct Fixed(ClassLabel);

impl Classifier for Fixed {
    fn predict(&self, _: &FeatureVector) -> Result<ClassLabel, InferenceError> {
        Ok(self.0)
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

struct Broken;

impl Classifier for Broken {
    fn predict(&self, _: &FeatureVector) -> Result<ClassLabel, InferenceError> {
        Err(InferenceError::new("session poisoned"))
    }

    fn kind(&self) -> &'static str {
        "broken"
    }
}

/// Diabetes predicts positive, heart disease negative, Parkinson's has no model
fn app() -> Router {
    let registry = ModelRegistry::new()
        .with_classifier(DomainId::Diabetes, Arc::new(Fixed(1)))
        .with_classifier(DomainId::HeartDisease, Arc::new(Fixed(0)));
    app_with(registry)
}

fn app_with(registry: ModelRegistry) -> Router {
    let assistant = HealthAssistant::new(Arc::new(registry), ValidationPolicy::default()).unwrap();
    create_router(AppState {
        assistant: Arc::new(assistant),
        config: Config::default(),
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const DIABETES_FORM: &str = "Pregnancies=2&Glucose=130&BloodPressure=80&SkinThickness=25\
    &Insulin=90&BMI=28.5&DiabetesPedigreeFunction=0.5&Age=35";

#[tokio::test]
async fn test_health_check() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["models_loaded"], 2);
}

#[tokio::test]
async fn test_root_redirects_to_diabetes() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/diabetes");
}

#[tokio::test]
async fn test_form_page_renders() {
    let response = app().oneshot(get("/diabetes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Diabetes Prediction using ML"));
    assert!(html.contains("Glucose Level"));
    assert!(html.contains("href=\"/parkinsons\""));
    assert!(!html.contains("notice-warning"));
}

#[tokio::test]
async fn test_page_warns_when_model_missing() {
    let response = app().oneshot(get("/parkinsons")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("notice-warning"));
    assert!(html.contains("Parkinson&#39;s model is not loaded."));
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let response = app().oneshot(get("/kidney")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("kidney"));
}

#[tokio::test]
async fn test_form_submission_positive() {
    let response = app().oneshot(post_form("/diabetes", DIABETES_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("notice-risk"));
    assert!(html.contains("The person is diabetic"));
    assert!(html.contains("value=\"28.5\""));
}

#[tokio::test]
async fn test_form_submission_missing_field() {
    let form = DIABETES_FORM.replace("Glucose=130", "Glucose=");
    let response = app().oneshot(post_form("/diabetes", &form)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("notice-error"));
    assert!(html.contains("Please enter a value for &#39;Glucose Level&#39;."));
}

#[tokio::test]
async fn test_form_echo_is_escaped() {
    let form = DIABETES_FORM.replace("BMI=28.5", "BMI=%3Cscript%3E");
    let response = app().oneshot(post_form("/diabetes", &form)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn test_heart_form_with_labels() {
    let form = "age=54&sex=Male&cp=Asymptomatic&trestbps=140&chol=239&fbs=No&restecg=Normal\
        &thalach=160&exang=Yes&oldpeak=1.2&slope=Flat&ca=0&thal=Reversible+defect";
    let response = app().oneshot(post_form("/heart_disease", form)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("notice-clear"));
    assert!(html.contains("The person does not have any heart disease"));
    assert!(html.contains("<option value=\"Asymptomatic\" selected>"));
}

#[tokio::test]
async fn test_form_submission_model_missing() {
    let response = app().oneshot(post_form("/parkinsons", "fo=120")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(response).await.contains("Parkinson&#39;s model is not loaded."));
}

#[tokio::test]
async fn test_api_predict() {
    let body = json!({ "fields": {
        "Pregnancies": 2, "Glucose": 130, "BloodPressure": 80, "SkinThickness": 25,
        "Insulin": 90, "BMI": "28.5", "DiabetesPedigreeFunction": 0.5, "Age": 35,
    }});
    let response = app().oneshot(post_json("/api/v1/predict/diabetes", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json(response).await;
    assert_eq!(outcome["domain"], "diabetes");
    assert_eq!(outcome["is_positive"], true);
    assert_eq!(outcome["message"], "The person is diabetic");
}

#[tokio::test]
async fn test_api_validation_error() {
    let body = json!({ "fields": { "Glucose": "abc" } });
    let response = app().oneshot(post_json("/api/v1/predict/diabetes", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["status"], 400);
    assert!(error["error"].as_str().unwrap().starts_with("Please enter a value for"));
}

#[tokio::test]
async fn test_api_malformed_body_is_json_error() {
    let body = json!({ "fields": { "Glucose": true } });
    let response = app().oneshot(post_json("/api/v1/predict/diabetes", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let error = body_json(response).await;
    assert_eq!(error["status"], 400);
    assert!(error["error"].as_str().unwrap().starts_with("Invalid request body"));

    let response = app()
        .oneshot(post_json("/api/v1/predict/diabetes", json!(["not", "an", "object"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_domains_report_missing_artifact() {
    let registry = ModelRegistry::new().with_classifier(DomainId::Diabetes, Arc::new(Fixed(1)));
    registry.register(DomainId::HeartDisease, "/nonexistent/heart_disease_model.onnx");
    let app = app_with(registry);

    let response = app.clone().oneshot(get("/api/v1/domains")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let domains = body_json(response).await;
    assert_eq!(domains[0]["available"], true);
    assert_eq!(domains[1]["available"], false);
    assert!(domains[1]["reason"].as_str().unwrap().contains("not found"));

    let response = app.oneshot(get("/api/v1/models")).await.unwrap();
    let models = body_json(response).await;
    assert!(models[1]["last_error"].as_str().unwrap().contains("heart_disease_model.onnx"));
    assert_eq!(models[0]["last_error"], Value::Null);
}

#[tokio::test]
async fn test_api_status_codes() {
    let response = app()
        .oneshot(post_json("/api/v1/predict/parkinsons", json!({ "fields": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app()
        .oneshot(post_json("/api/v1/predict/kidney", json!({ "fields": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_inference_failure_is_500() {
    let app = app_with(ModelRegistry::new().with_classifier(DomainId::Diabetes, Arc::new(Broken)));
    let form_values: serde_json::Map<String, Value> = DIABETES_FORM
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();

    let response = app
        .oneshot(post_json("/api/v1/predict/diabetes", json!({ "fields": form_values })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error = body_json(response).await;
    assert_eq!(error["error"], "Prediction failed");
    assert!(!error.to_string().contains("session poisoned"));
}

#[tokio::test]
async fn test_api_domains_and_models() {
    let response = app().oneshot(get("/api/v1/domains")).await.unwrap();
    let domains = body_json(response).await;
    assert_eq!(domains.as_array().unwrap().len(), 3);
    assert_eq!(domains[2]["available"], false);

    let response = app().oneshot(get("/api/v1/domains/heart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["domain"], "heart_disease");
    assert_eq!(detail["schema"]["fields"].as_array().unwrap().len(), 13);
    assert_eq!(detail["layout"]["feature_count"], 13);

    let response = app().oneshot(get("/api/v1/models")).await.unwrap();
    let models = body_json(response).await;
    assert_eq!(models[0]["model_loaded"], true);
    assert_eq!(models[2]["model_loaded"], false);
}

#[test]
fn test_router_outside_async_test() {
    let config = Config::default();
    assert_eq!(config.port, 8080);
    assert!(!config.is_production());

    let response = tokio_test::block_on(app().oneshot(get("/api/v1/domains/parkinsons")));
    let response = tokio_test::assert_ok!(response);
    assert_eq!(response.status(), StatusCode::OK);
}
