use crate::helpers::test_app::TestApp;

#[tokio::test]
async fn metrics_include_the_session_gauges() {
    let app = TestApp::spawn_app().await;
    let _client = app.connect_client().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/metrics", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("fishbowl_active_sessions"));
    assert!(body.contains("fishbowl_connected_clients"));
}
