use egui_kittest::Harness;
use quizdesk_ui::QuizdeskApp;
use quizdesk_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    /// Kept alive so the mocked endpoints exist for the whole test; its
    /// drop also verifies any `.expect(..)` call counts.
    mock_server: MockServer,
    harness: Harness<'a, QuizdeskApp>,
}

impl<'a> TestCtx<'a> {
    /// App harness against a backend whose directory endpoint serves `users`.
    #[allow(unused)]
    pub async fn new_app(users: serde_json::Value) -> Self {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/utenti"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&mock_server)
            .await;

        Self::over(mock_server)
    }

    /// App harness whose directory endpoint answers with `status_code`.
    #[allow(unused)]
    pub async fn new_app_with_status(status_code: u16) -> Self {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/utenti"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&mock_server)
            .await;

        Self::over(mock_server)
    }

    /// App harness over an already-staged server, for tests that mount
    /// their own responses or call counts.
    #[allow(unused)]
    pub fn over(mock_server: MockServer) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let state = State::test(mock_server.uri());
        let app = QuizdeskApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, QuizdeskApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, QuizdeskApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}
