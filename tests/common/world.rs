use anyhow::{Context, Result};
use calcline::config::ServiceProfile;
use calcline::io::{MockEventStream, MockRenderStream, MockScreen};
use calcline::AppController;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cucumber::World;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on
const UNREACHABLE_SERVER: &str = "http://127.0.0.1:1";

type App = AppController<MockEventStream, MockRenderStream>;

/// Application state for calculator scenarios
#[derive(World)]
#[world(init = Self::new)]
pub struct CalclineWorld {
    /// Real controller wired to mock terminal streams
    pub app: Option<App>,

    /// Shared view of what the mock terminal shows
    pub screen: Option<MockScreen>,

    /// Mock arithmetic service
    pub mock_server: Option<MockServer>,

    /// Server the calculator is pointed at
    pub server_uri: String,
}

impl std::fmt::Debug for CalclineWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalclineWorld")
            .field("server_uri", &self.server_uri)
            .field("started", &self.app.is_some())
            .field("display", &self.app.as_ref().map(|app| app.calculator().display_text()))
            .finish()
    }
}

impl CalclineWorld {
    pub fn new() -> Self {
        Self {
            app: None,
            screen: None,
            mock_server: None,
            server_uri: UNREACHABLE_SERVER.to_string(),
        }
    }

    pub async fn start_mock_server(&mut self) {
        let server = MockServer::start().await;
        self.server_uri = server.uri();
        self.mock_server = Some(server);
    }

    pub fn use_unreachable_server(&mut self) {
        self.mock_server = None;
        self.server_uri = UNREACHABLE_SERVER.to_string();
    }

    fn server(&self) -> Result<&MockServer> {
        self.mock_server
            .as_ref()
            .context("Mock arithmetic service is not running")
    }

    /// Answer `operation` with a successful result
    pub async fn mock_result(&self, operation: &str, result: &str, request_id: &str) -> Result<()> {
        let result: Value = serde_json::from_str(result)
            .with_context(|| format!("Result '{result}' is not a JSON value"))?;
        Mock::given(method("GET"))
            .and(path(format!("/{operation}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-request-id", request_id)
                    .set_body_json(json!({ "result": result })),
            )
            .mount(self.server()?)
            .await;
        Ok(())
    }

    /// Answer `operation` with a successful result after `delay`
    pub async fn mock_delayed_result(
        &self,
        operation: &str,
        delay: Duration,
        result: &str,
        request_id: &str,
    ) -> Result<()> {
        let result: Value = serde_json::from_str(result)
            .with_context(|| format!("Result '{result}' is not a JSON value"))?;
        Mock::given(method("GET"))
            .and(path(format!("/{operation}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .insert_header("x-request-id", request_id)
                    .set_body_json(json!({ "result": result })),
            )
            .mount(self.server()?)
            .await;
        Ok(())
    }

    /// Answer `operation` with an error status and message
    pub async fn mock_error(&self, operation: &str, status: u16, message: &str) -> Result<()> {
        Mock::given(method("GET"))
            .and(path(format!("/{operation}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": message })))
            .mount(self.server()?)
            .await;
        Ok(())
    }

    /// Every request the mock service saw, as `path?query`
    pub async fn received_requests(&self) -> Result<Vec<String>> {
        let requests = self.server()?.received_requests().await.unwrap_or_default();
        Ok(requests
            .iter()
            .map(|request| match request.url.query() {
                Some(query) => format!("{}?{query}", request.url.path()),
                None => request.url.path().to_string(),
            })
            .collect())
    }

    pub fn start_app(&mut self) -> Result<()> {
        let render_stream = MockRenderStream::with_size((60, 10));
        self.screen = Some(render_stream.screen());
        let app = AppController::with_io_streams(
            &ServiceProfile::new(&self.server_uri),
            MockEventStream::new(Vec::new()),
            render_stream,
        )?;
        self.app = Some(app);
        self.app_mut()?.calculator_mut().render()
    }

    pub fn app(&self) -> Result<&App> {
        self.app.as_ref().context("Calculator has not been started")
    }

    pub fn app_mut(&mut self) -> Result<&mut App> {
        self.app.as_mut().context("Calculator has not been started")
    }

    pub fn screen(&self) -> Result<&MockScreen> {
        self.screen.as_ref().context("Calculator has not been started")
    }

    pub async fn send_key(&mut self, code: KeyCode) -> Result<()> {
        let app = self.app_mut()?;
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))?;
        if code == KeyCode::Char('=') {
            app.calculator_mut().wait_remote().await?;
        }
        Ok(())
    }

    /// Press keys without waiting for a response to `=`
    pub fn type_keys_in_flight(&mut self, keys: &str) -> Result<()> {
        let app = self.app_mut()?;
        for ch in keys.chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))?;
        }
        Ok(())
    }

    /// Give outstanding responses time to land, then apply whatever arrived
    pub async fn settle(&mut self, wait: Duration) -> Result<bool> {
        tokio::time::sleep(wait).await;
        self.app_mut()?.calculator_mut().poll_remote()
    }

    pub async fn type_keys(&mut self, keys: &str) -> Result<()> {
        for ch in keys.chars() {
            self.send_key(KeyCode::Char(ch)).await?;
        }
        Ok(())
    }
}

impl Default for CalclineWorld {
    fn default() -> Self {
        Self::new()
    }
}
