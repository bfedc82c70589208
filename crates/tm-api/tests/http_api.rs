//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tm_core::data_spec::today;
use tm_core::enums::JobState;
use tm_core::generator::Submission;
use tm_db::service::TmService;
use tm_api::{AppState, router};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let service = TmService::new_local(":memory:").await.unwrap();
        let state = AppState::new(service);
        Self {
            router: router(state.clone()),
            state,
        }
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_workspace(&self, spec: Value) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/workspace/",
                Some(json!({"name": "ws", "data_specification": spec})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_template(&self, name: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/document-template/",
                Some(json!({
                    "name": name,
                    "template_filename": format!("{name}.pdf"),
                    "template_file_type": "PDF",
                    "uploaded_at": "2024-01-01T00:00:00Z",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_job(&self, workspace_id: i64, template_ids: &[i64]) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/template-matching-job/",
                Some(json!({
                    "workspace_id": workspace_id,
                    "document_template_ids": template_ids,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Force a job into a given state, bypassing the random draw.
    async fn force_state(&self, job_id: i64, state: JobState) {
        self.state
            .service
            .submit_job(
                job_id,
                &Submission {
                    job_id: "forced".into(),
                    job_state: state,
                },
            )
            .await
            .unwrap();
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn workspace_crud() {
    let app = TestApp::new().await;
    let week_ago = today().checked_sub_days(Days::new(7)).unwrap();
    let spec = json!({"file_type": "IMAGE", "date_from": iso(week_ago), "date_to": iso(today())});

    let id = app.create_workspace(spec.clone()).await;

    let (status, body) = app.request("GET", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "ws");
    assert_eq!(body["data_specification"], spec);
    assert!(body["created_at"].is_string());

    let (status, list) = app.request("GET", "/api/workspace", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app
        .request("PATCH", &format!("/api/workspace/{id}"), Some(json!({"name": "renamed"})))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = app.request("GET", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(body["name"], "renamed");
    assert_eq!(body["data_specification"], spec);

    let (status, _) = app.request("DELETE", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.request("GET", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Workspace not found");
}

#[tokio::test]
async fn absent_spec_fields_serialize_as_null() {
    let app = TestApp::new().await;
    let id = app.create_workspace(json!({})).await;
    let (_, body) = app.request("GET", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(
        body["data_specification"],
        json!({"file_type": null, "date_from": null, "date_to": null})
    );
}

#[rstest]
#[case::future_date_from(json!({"date_from": iso(today().checked_add_days(Days::new(1)).unwrap())}), vec!["date_from"])]
#[case::future_date_to(json!({"date_to": iso(today().checked_add_days(Days::new(3)).unwrap())}), vec!["date_to"])]
#[case::inverted(json!({"date_from": "2024-02-01", "date_to": "2024-01-01"}), vec!["date_from", "date_to"])]
#[tokio::test]
async fn invalid_specification_is_422(#[case] spec: Value, #[case] fields: Vec<&str>) {
    let app = TestApp::new().await;
    let (status, body) = app
        .request(
            "POST",
            "/api/workspace/",
            Some(json!({"name": "bad", "data_specification": spec})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<String> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"][2].as_str().unwrap().to_string())
        .collect();
    assert_eq!(locs, fields);

    let (_, list) = app.request("GET", "/api/workspace/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[rstest]
#[case::unknown_file_type(json!({"name": "bad", "data_specification": {"file_type": "TXT"}}))]
#[case::missing_name(json!({"data_specification": {}}))]
#[case::missing_spec(json!({"name": "bad"}))]
#[case::bad_date(json!({"name": "bad", "data_specification": {"date_from": "yesterday"}}))]
#[tokio::test]
async fn malformed_workspace_body_is_422(#[case] body: Value) {
    let app = TestApp::new().await;
    let (status, response) = app.request("POST", "/api/workspace/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["detail"].is_array());
}

#[tokio::test]
async fn patch_validates_specification() {
    let app = TestApp::new().await;
    let id = app.create_workspace(json!({"file_type": "PDF"})).await;

    let (status, _) = app
        .request(
            "PATCH",
            &format!("/api/workspace/{id}"),
            Some(json!({"data_specification": {"date_from": "2024-03-01", "date_to": "2024-01-01"}})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = app.request("GET", &format!("/api/workspace/{id}"), None).await;
    assert_eq!(body["data_specification"]["file_type"], "PDF");
}

#[tokio::test]
async fn missing_workspace_routes_are_404() {
    let app = TestApp::new().await;
    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(json!({"name": "x"}))),
        ("DELETE", None),
    ] {
        let (status, _) = app.request(method, "/api/workspace/99", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
    }
}

#[rstest]
#[case("GET", "/api/workspace")]
#[case("PATCH", "/api/workspace")]
#[case("DELETE", "/api/workspace")]
#[case("GET", "/api/document-template")]
#[case("DELETE", "/api/document-template")]
#[case("GET", "/api/template-matching-job")]
#[case("DELETE", "/api/template-matching-job")]
#[tokio::test]
async fn id_routes_decode_the_path_id(#[case] method: &str, #[case] prefix: &str) {
    let app = TestApp::new().await;
    let body = (method == "PATCH").then(|| json!({"name": "x"}));

    let (status, _) = app.request(method, &format!("{prefix}/77"), body.clone()).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method} {prefix}/77");

    let (status, response) = app.request(method, &format!("{prefix}/x7"), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method} {prefix}/x7");
    assert_eq!(response["detail"][0]["loc"], json!(["path", "id"]));
}

#[rstest]
#[case("GET", "results")]
#[case("POST", "submit")]
#[tokio::test]
async fn job_action_routes_decode_the_path_id(#[case] method: &str, #[case] action: &str) {
    let app = TestApp::new().await;
    let (status, _) = app
        .request(method, &format!("/api/template-matching-job/77/{action}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(method, &format!("/api/template-matching-job/x7/{action}"), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/api/workspace/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
}

// ---------------------------------------------------------------------------
// Document templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn document_template_crud() {
    let app = TestApp::new().await;
    let id = app.create_template("invoice").await;

    let (status, body) = app
        .request("GET", &format!("/api/document-template/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template_filename"], "invoice.pdf");

    let (_, list) = app.request("GET", "/api/document-template", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app
        .request("DELETE", &format!("/api/document-template/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .request("DELETE", &format!("/api/document-template/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_job_submits_and_expands() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let a = app.create_template("a").await;
    let b = app.create_template("b").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/template-matching-job/",
            Some(json!({"workspace_id": ws, "document_template_ids": [b, a]})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let state = body["job_state"].as_str().unwrap();
    assert!(["SUBMITTED", "RUNNING", "FAILED", "SUCCEEDED"].contains(&state));
    assert_eq!(body["job_id"].as_str().unwrap().len(), 36);
    assert_eq!(body["workspace"]["id"], ws);
    let ids: Vec<i64> = body["document_templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);

    let (status, list) = app.request("GET", "/api/template-matching-job", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], body["id"]);
}

#[rstest]
#[case::null_workspace(json!({"workspace_id": null, "document_template_ids": []}))]
#[case::unknown_workspace(json!({"workspace_id": 4242, "document_template_ids": []}))]
#[tokio::test]
async fn job_without_workspace_is_404(#[case] body: Value) {
    let app = TestApp::new().await;
    let (status, response) = app
        .request("POST", "/api/template-matching-job/", Some(body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["detail"], "Workspace not found");
}

#[tokio::test]
async fn job_without_workspace_key_is_422() {
    let app = TestApp::new().await;
    let (status, response) = app
        .request(
            "POST",
            "/api/template-matching-job/",
            Some(json!({"document_template_ids": []})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["detail"].is_array());
    let (_, list) = app.request("GET", "/api/template-matching-job/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn job_with_unknown_template_is_404() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let (status, _) = app
        .request(
            "POST",
            "/api/template-matching-job/",
            Some(json!({"workspace_id": ws, "document_template_ids": [5]})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = app.request("GET", "/api/template-matching-job/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn results_only_for_succeeded_jobs() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let t = app.create_template("t").await;
    let job = app.create_job(ws, &[t]).await;
    let uri = format!("/api/template-matching-job/{job}/results");

    for state in [JobState::Submitted, JobState::Running, JobState::Failed] {
        app.force_state(job, state).await;
        let (status, _) = app.request("GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{state}");
    }

    app.force_state(job, JobState::Succeeded).await;
    let (status, body) = app.request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results_per_template"][0]["template_id"], t);
    let run_time = body["total_run_time"].as_u64().unwrap();
    assert!((1_000..=10_000).contains(&run_time));

    let (status, _) = app
        .request("GET", "/api/template-matching-job/777/results", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn results_respect_workspace_specification() {
    let app = TestApp::new().await;
    let ws = app
        .create_workspace(json!({"file_type": "PDF", "date_from": "2024-01-10", "date_to": "2024-01-12"}))
        .await;
    let a = app.create_template("a").await;
    let b = app.create_template("b").await;
    let job = app.create_job(ws, &[a, b]).await;
    app.force_state(job, JobState::Succeeded).await;

    let (_, body) = app
        .request("GET", &format!("/api/template-matching-job/{job}/results"), None)
        .await;
    let per_template = body["results_per_template"].as_array().unwrap();
    assert_eq!(per_template.len(), 2);

    let mut expected_id = 1;
    for template in per_template {
        for sample in template["sample_results"].as_array().unwrap() {
            assert_eq!(sample["sample_id"], expected_id);
            expected_id += 1;
            assert_eq!(sample["file_type"], "PDF");
            let created = sample["created_at"].as_str().unwrap();
            assert!(created.ends_with("T00:00:00"), "{created}");
            assert!(
                ["2024-01-10", "2024-01-11", "2024-01-12"].contains(&&created[..10]),
                "{created}"
            );
            let score = sample["score"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&score));
        }
    }
}

#[tokio::test]
async fn results_after_workspace_delete_use_default_specification() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({"file_type": "IMAGE"})).await;
    let t = app.create_template("t").await;
    let job = app.create_job(ws, &[t]).await;
    app.force_state(job, JobState::Succeeded).await;

    app.request("DELETE", &format!("/api/workspace/{ws}"), None).await;

    let (_, detail) = app
        .request("GET", &format!("/api/template-matching-job/{job}"), None)
        .await;
    assert!(detail["workspace"].is_null());

    let (status, body) = app
        .request("GET", &format!("/api/template-matching-job/{job}/results"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let today = iso(today());
    for sample in body["results_per_template"][0]["sample_results"].as_array().unwrap() {
        assert!(sample["created_at"].as_str().unwrap().starts_with(&today));
    }
}

#[tokio::test]
async fn resubmit_assigns_fresh_token() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let job = app.create_job(ws, &[]).await;
    app.force_state(job, JobState::Failed).await;

    let (status, _) = app
        .request("POST", &format!("/api/template-matching-job/{job}/submit"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app
        .request("GET", &format!("/api/template-matching-job/{job}"), None)
        .await;
    assert_ne!(body["job_id"], "forced");
    assert!(body["job_state"].is_string());

    let (status, _) = app
        .request("POST", "/api/template-matching-job/31337/submit", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_job() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let job = app.create_job(ws, &[]).await;
    let uri = format!("/api/template-matching-job/{job}");

    let (status, _) = app.request("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_template_drops_it_from_jobs() {
    let app = TestApp::new().await;
    let ws = app.create_workspace(json!({})).await;
    let a = app.create_template("a").await;
    let b = app.create_template("b").await;
    let job = app.create_job(ws, &[a, b]).await;

    app.request("DELETE", &format!("/api/document-template/{a}"), None)
        .await;

    let (_, body) = app
        .request("GET", &format!("/api/template-matching-job/{job}"), None)
        .await;
    let templates = body["document_templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["id"], b);
}

#[tokio::test]
async fn missing_content_type_is_415() {
    let app = TestApp::new().await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::post("/api/workspace/")
                .body(Body::from(r#"{"name": "x", "data_specification": {}}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
