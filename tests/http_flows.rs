use std::time::Duration;

use anyhow::Result;
use http::StatusCode;
use jenkins_lite::{Build, BuildResult, Client, Error, Job, Server};
use serde_json::{Value, json};
use tokio::task;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn job_payload(base: &str, name: &str, builds: &[u64]) -> Value {
    let builds: Vec<Value> = builds
        .iter()
        .map(|n| {
            json!({
                "_class": "hudson.model.FreeStyleBuild",
                "number": n,
                "url": format!("{base}/job/{name}/{n}/")
            })
        })
        .collect();
    let last_build = builds.first().cloned().unwrap_or(Value::Null);
    let color = if builds.is_empty() { "notbuilt" } else { "blue" };
    let next_build_number = builds.len() + 1;

    json!({
        "_class": "hudson.model.FreeStyleProject",
        "name": name,
        "description": format!("{name} pipeline"),
        "displayName": name.to_uppercase(),
        "url": format!("{base}/job/{name}/"),
        "buildable": true,
        "builds": builds,
        "color": color,
        "inQueue": false,
        "healthReport": [
            {"description": "Build stability: No recent builds failed.", "iconUrl": "health-80plus.png", "score": 100}
        ],
        "nextBuildNumber": next_build_number,
        "lastBuild": last_build,
        "lastFailedBuild": null
    })
}

fn build_payload(number: u64, building: bool, result: Option<&str>) -> Value {
    let duration = if building { 0 } else { 42_000 };
    json!({
        "_class": "hudson.model.FreeStyleBuild",
        "actions": [{"_class": "hudson.model.CauseAction"}, {}],
        "building": building,
        "displayName": format!("#{number}"),
        "duration": duration,
        "estimatedDuration": 40_000,
        "id": number.to_string(),
        "number": number,
        "result": result,
        "timestamp": 1_700_000_000_000_i64
    })
}

async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_lists_jobs_and_summaries_resolve() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/api/json",
        ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.model.Hudson",
            "mode": "NORMAL",
            "nodeDescription": "the master Jenkins node",
            "numExecutors": 2,
            "jobs": [
                {"_class": "hudson.model.FreeStyleProject", "name": "core", "url": format!("{base}/job/core/"), "color": "blue"},
                {"_class": "hudson.model.FreeStyleProject", "name": "docs", "url": format!("{base}/job/docs/"), "color": "red"}
            ]
        })),
        1,
    )
    .await;
    mock_get(
        &server,
        "/job/core/api/json",
        ResponseTemplate::new(200).set_body_json(job_payload(&base, "core", &[2, 1])),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let jenkins = Server::new(&client, format!("{base}/"))?;

        assert_eq!(jenkins.api_url().as_str(), format!("{base}/api/json"));
        assert_eq!(jenkins.num_executors(), Some(2));
        let names: Vec<&str> = jenkins.jobs().iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["core", "docs"]);
        assert_eq!(jenkins.jobs()[1].color.as_deref(), Some("red"));

        let summary = jenkins.find_job("core").expect("core listed");
        let job = summary.resolve(&client)?;
        assert_eq!(job.name(), Some(summary.name.as_str()));
        assert_eq!(job.reported_url(), Some(summary.url.as_str()));
        assert_eq!(job.display_name(), Some("CORE"));
        assert_eq!(job.description(), Some("core pipeline"));
        assert_eq!(job.color(), Some("blue"));
        assert!(!job.in_queue());
        assert_eq!(job.health_reports()[0].score, 100);
        assert_eq!(job.next_build_number(), Some(3));
        let numbers: Vec<u64> = job.builds().iter().map(|b| b.number).collect();
        assert_eq!(numbers, [2, 1]);

        assert!(jenkins.find_job("missing").is_none());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_sends_basic_auth() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(header("Authorization", "Basic dXNlcjp0b2tlbg=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobs": []})))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let base = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = Client::builder()
            .username("user")
            .password("token")
            .build()?;
        let jenkins = client.server(&base)?;
        assert!(jenkins.jobs().is_empty());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn username_without_password_fails_before_any_request() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobs": []})))
        .expect(0)
        .mount(&server)
        .await;

    task::spawn_blocking(move || -> Result<()> {
        let err = Client::builder()
            .username("user")
            .build()
            .expect_err("expected missing password to be rejected");
        assert!(matches!(err, Error::InvalidConfig { .. }));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn job_without_builds_has_no_summaries() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/fresh/api/json",
        ResponseTemplate::new(200).set_body_json(job_payload(&base, "fresh", &[])),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        // An already-normalized URL must not grow a second suffix.
        let job = Job::new(&client, format!("{base}/job/fresh/api/json"))?;
        assert!(job.builds().is_empty());
        assert_eq!(job.color(), Some("notbuilt"));
        assert!(job.last_build()?.is_none());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_build_is_not_started_until_refresh() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/core/3/api/json",
        ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"),
        1,
    )
    .await;
    mock_get(
        &server,
        "/job/core/3/api/json",
        ResponseTemplate::new(200).set_body_json(build_payload(3, false, Some("SUCCESS"))),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let mut build = Build::new(&client, format!("{base}/job/core/3"))?;
        assert!(!build.started());
        assert_eq!(build.pending_status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(build.duration(), None);
        assert_eq!(build.estimated_duration(), None);

        build.refresh()?;
        assert!(build.started());
        assert_eq!(build.pending_status(), None);
        assert_eq!(build.number(), Some(3));
        assert_eq!(build.id(), Some("3"));
        assert_eq!(build.duration(), Some(Duration::from_secs(42)));
        assert_eq!(build.estimated_duration(), Some(Duration::from_secs(40)));
        assert_eq!(build.result(), Some(BuildResult::Success));
        assert!(build.complete());
        assert!(build.successful());
        assert_eq!(build.actions().len(), 2);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn build_server_error_is_reported_as_not_started() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/core/9/api/json",
        ResponseTemplate::new(500),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let build = client.build(format!("{base}/job/core/9/"))?;
        assert!(!build.started());
        assert_eq!(build.pending_status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn build_decode_error_propagates() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/core/4/api/json",
        ResponseTemplate::new(200).set_body_string("<html>login</html>"),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let err = Build::new(&client, format!("{base}/job/core/4/"))
            .expect_err("expected decode error");
        match err {
            Error::Decode {
                status,
                body_snippet,
                ..
            } => {
                assert_eq!(status, StatusCode::OK);
                assert!(body_snippet.as_deref().unwrap_or_default().contains("login"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn job_http_error_propagates() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/ghost/api/json",
        ResponseTemplate::new(404).set_body_json(json!({"message": "no such job"})),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let err = Job::new(&client, format!("{base}/job/ghost/")).expect_err("expected 404");
        match err {
            Error::NotFound(http) => {
                assert_eq!(http.status, StatusCode::NOT_FOUND);
                assert_eq!(http.path(), "/job/ghost/api/json");
                assert_eq!(http.message.as_deref(), Some("no such job"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn job_refresh_picks_up_new_builds() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/core/api/json",
        ResponseTemplate::new(200).set_body_json(job_payload(&base, "core", &[])),
        1,
    )
    .await;
    mock_get(
        &server,
        "/job/core/api/json",
        ResponseTemplate::new(200).set_body_json(job_payload(&base, "core", &[1])),
        1,
    )
    .await;
    mock_get(
        &server,
        "/job/core/1/api/json",
        ResponseTemplate::new(200).set_body_json(build_payload(1, true, None)),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let mut job = client.job(format!("{base}/job/core"))?;
        assert!(job.builds().is_empty());

        job.refresh()?;
        assert_eq!(job.builds().len(), 1);

        let build = job.builds()[0].resolve(&client)?;
        assert_eq!(build.number(), Some(job.builds()[0].number));
        assert!(build.started());
        assert!(build.building());
        assert!(!build.complete());
        assert_eq!(build.result(), None);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_under_base_path_fetches_folder_jobs_and_builds() -> Result<()> {
    let server = MockServer::start().await;
    let base = format!("{}/jenkins", server.uri());

    mock_get(
        &server,
        "/jenkins/api/json",
        ResponseTemplate::new(200).set_body_json(json!({"jobs": []})),
        1,
    )
    .await;
    mock_get(
        &server,
        "/jenkins/job/team/job/app/api/json",
        ResponseTemplate::new(200).set_body_json(job_payload(
            &format!("{base}/job/team"),
            "app",
            &[5],
        )),
        1,
    )
    .await;
    mock_get(
        &server,
        "/jenkins/job/team/job/app/5/api/json",
        ResponseTemplate::new(200).set_body_json(build_payload(5, false, Some("FAILURE"))),
        2,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let jenkins = Server::new(&client, &base)?;
        assert_eq!(jenkins.url().as_str(), format!("{base}/"));

        let job = jenkins.job("team/app")?;
        assert_eq!(job.url().as_str(), format!("{base}/job/team/job/app/"));

        let by_number = job.build(5)?;
        let latest = job.last_build()?.expect("last build present");
        assert_eq!(by_number.number(), latest.number());
        assert_eq!(latest.result(), Some(BuildResult::Failure));
        assert!(latest.complete());
        assert!(!latest.successful());
        assert!(job.last_failed_build()?.is_none());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_json_normalizes_arbitrary_resources() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/computer/api/json",
        ResponseTemplate::new(200).set_body_json(json!({"totalExecutors": 4, "busyExecutors": 1})),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let computers: Value = client.get_json(format!("{base}/computer/"))?;
        assert_eq!(computers["totalExecutors"], 4);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_refresh_replaces_job_list() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/api/json",
        ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"name": "core", "url": format!("{base}/job/core/"), "color": "blue"}]
        })),
        1,
    )
    .await;
    mock_get(
        &server,
        "/api/json",
        ResponseTemplate::new(200).set_body_json(json!({
            "numExecutors": 4,
            "jobs": [
                {"name": "core", "url": format!("{base}/job/core/"), "color": "red"},
                {"name": "docs", "url": format!("{base}/job/docs/"), "color": "notbuilt"}
            ]
        })),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let mut jenkins = client.server(&base)?;
        assert_eq!(jenkins.jobs().len(), 1);
        assert!(jenkins.find_job("docs").is_none());
        assert_eq!(jenkins.num_executors(), None);

        jenkins.refresh()?;
        let names: Vec<&str> = jenkins.jobs().iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["core", "docs"]);
        assert_eq!(jenkins.jobs()[0].color.as_deref(), Some("red"));
        assert_eq!(jenkins.num_executors(), Some(4));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_job_path_is_rejected_without_request() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/api/json",
        ResponseTemplate::new(200).set_body_json(json!({"jobs": []})),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let jenkins = client.server(&base)?;
        for path in ["", "/", "//"] {
            let err = jenkins.job(path).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig { .. }), "{path:?}: {err}");
        }
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn job_with_null_fields_loads_with_defaults() -> Result<()> {
    let server = MockServer::start().await;
    let base = server.uri();

    mock_get(
        &server,
        "/job/core/api/json",
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "core",
            "inQueue": null,
            "healthReport": [{"description": null, "score": null}],
            "builds": null
        })),
        1,
    )
    .await;

    task::spawn_blocking(move || -> Result<()> {
        let client = Client::new()?;
        let job = client.job(format!("{base}/job/core/"))?;
        assert_eq!(job.name(), Some("core"));
        assert!(!job.in_queue());
        assert!(job.builds().is_empty());
        assert_eq!(job.health_reports()[0].score, 0);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}
