use crowdcontrol::{Credentials, CrowdClient};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_NAME: &str = "crowdcontrol";
pub const APP_PASSWORD: &str = "app-secret";

#[derive(Deserialize)]
pub struct Fixture {
    pub request: FixtureRequest,
    pub response: FixtureResponse,
}

#[derive(Deserialize)]
pub struct FixtureRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub query: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct FixtureResponse {
    pub status_code: u16,
    pub body: Option<serde_json::Value>,
    pub raw_body: Option<String>,
}

pub struct CrowdMock {
    pub server: MockServer,
}

impl CrowdMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    /// Mounts a fixture that only answers requests carrying the application's
    /// basic auth, the JSON accept header and the fixture's query and body.
    pub async fn mount_fixture(&self, fixture_path: &str) {
        let full_path = Self::fixtures_dir().join(fixture_path);

        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", full_path.display(), e));

        let fixture: Fixture = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", full_path.display(), e));

        let mut mock = Mock::given(method(fixture.request.method.as_str()))
            .and(path(format!("/crowd{}", fixture.request.path)))
            .and(basic_auth(APP_NAME, APP_PASSWORD))
            .and(header("accept", "application/json"));

        for (key, value) in &fixture.request.query {
            mock = mock.and(query_param(key.as_str(), value.as_str()));
        }

        if let Some(body) = &fixture.request.body {
            mock = mock
                .and(header("content-type", "application/json"))
                .and(body_json(body));
        }

        let template = ResponseTemplate::new(fixture.response.status_code);
        let template = match (&fixture.response.body, &fixture.response.raw_body) {
            (Some(body), _) => template.set_body_json(body),
            (None, Some(raw)) => template.set_body_string(raw.clone()),
            (None, None) => template,
        };

        mock.respond_with(template).expect(1).mount(&self.server).await;
    }

    pub fn base_url(&self) -> String {
        format!("{}/crowd", self.server.uri())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.base_url(), APP_NAME, APP_PASSWORD).unwrap()
    }

    pub fn client(&self) -> CrowdClient {
        CrowdClient::new(self.credentials())
    }
}
