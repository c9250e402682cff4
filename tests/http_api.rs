//! HTTP-path coverage against a stub backend: shape normalization over the
//! wire, error-message extraction, 404 handling, and the submit asymmetry.

use careers_client::form::{ApplicationForm, FilePayload};
use careers_client::{ClientConfig, JobQuery, JobsClient, Language};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> JobsClient {
    let config = ClientConfig {
        api_base: Some(server.uri()),
        ..Default::default()
    };
    JobsClient::new(&config).unwrap()
}

fn filled_form() -> ApplicationForm {
    let mut form = ApplicationForm::new();
    form.first_name = "Ada".to_string();
    form.last_name = "Lovelace".to_string();
    form.email = "ada@example.com".to_string();
    form.phone_number = "0812345678".to_string();
    form.source_channel = "Friend".to_string();
    form.terms_accepted = true;
    form.set_resume(FilePayload::new("resume.pdf", b"%PDF-1.4".to_vec()))
        .unwrap();
    form
}

#[tokio::test]
async fn list_jobs_normalizes_rows_shape_and_omits_all_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("lang", "en"))
        .and(query_param("country", "Thailand"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("department"))
        .and(query_param_is_missing("level"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "version": "v7",
            "rows": [
                { "job_id": "A-1", "title": "One", "status": "published", "quantity": "2" },
                { "job_id": "", "title": "dropped" }
            ],
            "total": 50
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut query = JobQuery::new(Language::En);
    query.country = "Thailand".to_string();
    // ALL-valued facets must not appear as query params; the stub only
    // matches when lang and country are the sole constraints sent.
    let r = client.list_jobs(&query).await.unwrap();

    assert_eq!(r.jobs.len(), 1);
    assert_eq!(r.total, 1); // post-filter count, not the server's 50
    assert_eq!(r.version.as_deref(), Some("v7"));
    assert_eq!(r.jobs[0].headcount(), 2);
}

#[tokio::test]
async fn list_jobs_error_prefers_detail_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "feed unavailable", "message": "ignored" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_jobs(&JobQuery::new(Language::En)).await.unwrap_err();
    assert_eq!(err.to_string(), "feed unavailable");
}

#[tokio::test]
async fn list_jobs_error_falls_back_to_raw_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_jobs(&JobQuery::new(Language::En)).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("502"), "got: {msg}");
    assert!(msg.contains("Bad Gateway"), "got: {msg}");
}

#[tokio::test]
async fn non_json_200_body_yields_empty_response_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let r = client.list_jobs(&JobQuery::new(Language::En)).await.unwrap();
    assert!(r.jobs.is_empty());
    assert_eq!(r.total, 0);
}

#[tokio::test]
async fn get_job_404_is_none_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/GONE-001"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let job = client.get_job("GONE-001", Language::En).await.unwrap();
    assert!(job.is_none());
}

#[tokio::test]
async fn get_job_unwraps_nested_detail_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/A-1"))
        .and(query_param("lang", "th"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "job": { "job_id": "A-1", "title": "One", "country": "Thailand" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let job = client.get_job("A-1", Language::Th).await.unwrap().unwrap();
    assert_eq!(job.title, "One");
}

#[tokio::test]
async fn get_job_server_error_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/A-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_job("A-1", Language::En).await.unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn submit_rejection_is_a_failed_outcome_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apply/A-1"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "resume unreadable" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = filled_form().build_payload().unwrap();
    let outcome = client.submit_application("A-1", payload).await.unwrap();

    assert!(!outcome.ok);
    assert_eq!(outcome.message.as_deref(), Some("resume unreadable"));
}

#[tokio::test]
async fn submit_success_carries_application_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apply/A-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "application_id": "app-42"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = filled_form().build_payload().unwrap();
    let outcome = client.submit_application("A-1", payload).await.unwrap();

    assert!(outcome.ok);
    assert_eq!(outcome.application_id.as_deref(), Some("app-42"));
}
