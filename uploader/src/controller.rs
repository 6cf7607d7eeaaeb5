//! Upload-and-status state machine shared by every data-source modal.
//!
//! ```text
//!   select_file ──▶ submit ──┬─ no file ─────────────▶ warning
//!                            ├─ already in flight ───▶ rejected (no I/O)
//!                            └─ POST endpoint ──┬─ 2xx ─┬─ no follow-up ─▶ success
//!                                               │       └─ authorize ────▶ GET token ─▶ navigate
//!                                               ├─ non-2xx ──────────────▶ danger (+ server error)
//!                                               └─ transport error ──────▶ danger
//! ```
//!
//! The controller runs on one thread (the browser event loop, or one CLI
//! task). State lives in `RefCell`/`Cell` and is never borrowed across an
//! `.await`.
//!
//! Three guards replace what a naive modal leaves implicit:
//!
//! - **Re-entrancy**: a submit while another is in flight is rejected
//!   before any I/O.
//! - **Liveness**: [`UploadController::close`] starts a new session epoch;
//!   a response that settles in an older epoch is dropped.
//! - **Auto-close**: the delayed close is an [`AutoClose`] ticket that any
//!   later close or submit invalidates.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::time::Duration;

use crate::error::{TransportError, UploadError};
use crate::navigate::Navigator;
use crate::source::{FollowUp, SourceConfig};
use crate::state::{SelectedFile, UploadState};
use crate::status::StatusBanner;
use crate::transport::{HttpReply, Transport};

/// Callback invoked with a fresh snapshot after every state change.
pub type StateListener<F> = Box<dyn Fn(&UploadState<F>)>;

/// What a submit or authenticate call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Upload accepted, success banner shown.
    Uploaded { file_name: String },
    /// Upload accepted and the user was sent to `url`.
    Redirected { url: String },
    /// Another request from this controller was still in flight.
    Rejected,
    /// Failure, already reflected in the banner.
    Failed(UploadError),
    /// The modal was closed before the request settled; nothing was updated.
    Discarded,
}

/// Pending delayed close, valid until the next close or submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoClose {
    seq: u64,
    epoch: u64,
    delay: Duration,
}

impl AutoClose {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Result of [`UploadController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: Outcome,
    /// Set when the source closes itself after a terminal status.
    pub auto_close: Option<AutoClose>,
}

impl Submission {
    fn without_timer(outcome: Outcome) -> Self {
        Self {
            outcome,
            auto_close: None,
        }
    }
}

/// Generic controller for one upload modal.
pub struct UploadController<T: Transport, N: Navigator> {
    source: SourceConfig,
    transport: T,
    navigator: N,
    state: RefCell<UploadState<T::File>>,
    /// Epoch of the outstanding request, if any.
    in_flight: Cell<Option<u64>>,
    /// Advanced by every close; responses from older epochs are ignored.
    epoch: Cell<u64>,
    /// Advanced by every close and submit; stale auto-close tickets never fire.
    timer_seq: Cell<u64>,
    listeners: RefCell<Vec<StateListener<T::File>>>,
    on_close: RefCell<Option<Box<dyn Fn()>>>,
}

/// Marks the controller busy for the lifetime of one request.
///
/// Dropping it always clears the in-flight flag, and clears the loading
/// flag too unless the session has been closed meanwhile.
struct InFlight<'a, T: Transport, N: Navigator> {
    controller: &'a UploadController<T, N>,
    epoch: u64,
}

impl<'a, T: Transport, N: Navigator> InFlight<'a, T, N> {
    fn enter(controller: &'a UploadController<T, N>) -> Self {
        let epoch = controller.epoch.get();
        controller.in_flight.set(Some(epoch));
        controller.update(|state| state.is_loading = true);
        Self { controller, epoch }
    }
}

impl<T: Transport, N: Navigator> Drop for InFlight<'_, T, N> {
    fn drop(&mut self) {
        self.controller.in_flight.set(None);
        if self.controller.is_live(self.epoch) {
            self.controller.update(|state| state.is_loading = false);
        }
    }
}

impl<T: Transport, N: Navigator> UploadController<T, N> {
    pub fn new(source: SourceConfig, transport: T, navigator: N) -> Self {
        Self {
            source,
            transport,
            navigator,
            state: RefCell::new(UploadState::default()),
            in_flight: Cell::new(None),
            epoch: Cell::new(0),
            timer_seq: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            on_close: RefCell::new(None),
        }
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UploadState<T::File> {
        self.state.borrow().clone()
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get().is_some()
    }

    /// Register a state listener. Listeners must not call `subscribe`.
    pub fn subscribe(&self, listener: impl Fn(&UploadState<T::File>) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Hook run by [`close`](Self::close), typically hiding the modal.
    pub fn set_on_close(&self, hook: impl Fn() + 'static) {
        *self.on_close.borrow_mut() = Some(Box::new(hook));
    }

    /// Replace the selected file.
    pub fn select_file(&self, file: Option<T::File>) {
        self.update(|state| state.selected_file = file);
    }

    /// Upload the selected file and report the outcome in the banner.
    pub async fn submit(&self) -> Submission {
        if self.is_busy() {
            log::warn!("⏳ [{}] Upload already in flight, submit ignored", self.source.id);
            return Submission::without_timer(self.reject());
        }

        self.bump_timer();
        let epoch = self.epoch.get();

        let selected = self.state.borrow().selected_file.clone();
        let Some(file) = selected else {
            log::warn!("⚠️ [{}] Submit without a selected file", self.source.id);
            let outcome = self.fail(UploadError::NoFileSelected);
            return self.settle(outcome, epoch);
        };

        let outcome = {
            let _in_flight = InFlight::enter(self);
            self.upload(&file, epoch).await
        };
        self.settle(outcome, epoch)
    }

    /// Fetch the authorization URL and navigate to it.
    ///
    /// Runs automatically after a successful upload for sources with an
    /// [`FollowUp::Authorize`] step.
    pub async fn authenticate(&self) -> Outcome {
        if self.is_busy() {
            log::warn!("⏳ [{}] Request already in flight, authenticate ignored", self.source.id);
            return self.reject();
        }

        let Some(FollowUp::Authorize { token_endpoint }) = self.source.follow_up.clone() else {
            let err = UploadError::Authorization(format!(
                "source '{}' has no authorization step",
                self.source.id
            ));
            log::error!("❌ [{}] {}", self.source.id, err);
            return self.fail(err);
        };

        let epoch = self.epoch.get();
        let _in_flight = InFlight::enter(self);
        self.authorize(&token_endpoint, epoch).await
    }

    /// Reset all state, cancel any pending auto-close, and hide the modal.
    pub fn close(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.bump_timer();
        self.update(UploadState::reset);
        if let Some(hook) = self.on_close.borrow().as_ref() {
            hook();
        }
    }

    /// Close if `ticket` is still the latest one. Returns whether it fired.
    pub fn fire_auto_close(&self, ticket: AutoClose) -> bool {
        if ticket.seq != self.timer_seq.get() || !self.is_live(ticket.epoch) {
            log::debug!("[{}] Stale auto-close ignored", self.source.id);
            return false;
        }
        log::debug!("[{}] Auto-closing after {:?}", self.source.id, ticket.delay);
        self.close();
        true
    }

    /// Await `sleep`, then [`fire_auto_close`](Self::fire_auto_close).
    ///
    /// The caller picks the timer (`tokio::time::sleep`, `gloo_timers`, ...).
    pub async fn auto_close_after<S>(&self, ticket: AutoClose, sleep: S) -> bool
    where
        S: Future<Output = ()>,
    {
        sleep.await;
        self.fire_auto_close(ticket)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    async fn upload(&self, file: &T::File, epoch: u64) -> Outcome {
        let file_name = file.name();
        log::info!(
            "📤 [{}] Uploading {} to {}",
            self.source.id,
            file_name,
            self.source.endpoint
        );

        let result = self
            .transport
            .post_file(&self.source.endpoint, &self.source.file_field, file)
            .await;

        if !self.is_live(epoch) {
            log::debug!("[{}] Modal closed, dropping upload response", self.source.id);
            return Outcome::Discarded;
        }

        if let Err(err) = check_reply(result) {
            log::error!("❌ [{}] Upload of {} failed: {}", self.source.id, file_name, err);
            return self.fail(err);
        }

        match &self.source.follow_up {
            Some(FollowUp::Authorize { token_endpoint }) => {
                log::info!("✅ [{}] {} uploaded, requesting authorization", self.source.id, file_name);
                self.authorize(token_endpoint, epoch).await
            }
            None => {
                log::info!("✅ [{}] {} uploaded", self.source.id, file_name);
                self.set_banner(StatusBanner::success(self.source.success_message(&file_name)));
                Outcome::Uploaded { file_name }
            }
        }
    }

    async fn authorize(&self, token_endpoint: &str, epoch: u64) -> Outcome {
        let result = self.transport.get(token_endpoint).await;

        if !self.is_live(epoch) {
            log::debug!("[{}] Modal closed, dropping token response", self.source.id);
            return Outcome::Discarded;
        }

        let url = match authorization_url(result) {
            Ok(url) => url,
            Err(err) => {
                log::error!("❌ [{}] {}", self.source.id, err);
                return self.fail(err);
            }
        };

        if let Err(reason) = self.navigator.navigate(&url) {
            let err = UploadError::Authorization(reason);
            log::error!("❌ [{}] {}", self.source.id, err);
            return self.fail(err);
        }

        log::info!("🔑 [{}] Redirecting to {}", self.source.id, url);
        self.set_banner(StatusBanner::info(self.source.messages.redirecting.clone()));
        Outcome::Redirected { url }
    }

    /// Show `err` in the banner and wrap it as an outcome.
    fn fail(&self, err: UploadError) -> Outcome {
        let text = err.banner_text(&self.source.messages);
        self.set_banner(StatusBanner::new(err.severity(), text));
        Outcome::Failed(err)
    }

    /// Refuse a call while busy. A request left over from a closed session
    /// is invisible to the user, so say why nothing happens.
    fn reject(&self) -> Outcome {
        if let Some(owner) = self.in_flight.get() {
            if !self.is_live(owner) {
                self.set_banner(StatusBanner::info(self.source.messages.still_finishing.clone()));
            }
        }
        Outcome::Rejected
    }

    /// Arm the auto-close timer after a terminal banner.
    fn settle(&self, outcome: Outcome, epoch: u64) -> Submission {
        let terminal = matches!(outcome, Outcome::Uploaded { .. } | Outcome::Failed(_));
        let auto_close = match self.source.auto_close() {
            Some(delay) if terminal && self.is_live(epoch) => Some(AutoClose {
                seq: self.bump_timer(),
                epoch,
                delay,
            }),
            _ => None,
        };
        Submission { outcome, auto_close }
    }

    fn set_banner(&self, banner: StatusBanner) {
        self.update(|state| state.banner = banner);
    }

    fn update(&self, apply: impl FnOnce(&mut UploadState<T::File>)) {
        apply(&mut *self.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    fn is_live(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    fn bump_timer(&self) -> u64 {
        let next = self.timer_seq.get().wrapping_add(1);
        self.timer_seq.set(next);
        next
    }
}

/// Map an upload reply to success or the matching error.
fn check_reply(result: Result<HttpReply, TransportError>) -> Result<HttpReply, UploadError> {
    let reply = result?;
    if reply.is_success() {
        Ok(reply)
    } else {
        Err(UploadError::Server {
            status: reply.status,
            message: reply.error_field(),
        })
    }
}

/// Extract `authorization_url` from the token endpoint reply.
fn authorization_url(result: Result<HttpReply, TransportError>) -> Result<String, UploadError> {
    let reply = result.map_err(|e| UploadError::Authorization(e.to_string()))?;
    if !reply.is_success() {
        let detail = reply
            .error_field()
            .unwrap_or_else(|| format!("token endpoint returned {}", reply.status));
        return Err(UploadError::Authorization(detail));
    }
    reply
        .string_field("authorization_url")
        .ok_or_else(|| UploadError::Authorization("response has no authorization_url".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ServerConfig;
    use crate::status::UploadStatus;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct TestFile(&'static str);

    impl SelectedFile for TestFile {
        fn name(&self) -> String {
            self.0.to_string()
        }
    }

    /// Replays canned replies and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
        requests: RefCell<Vec<String>>,
        yield_first: bool,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<Result<HttpReply, TransportError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                ..Self::default()
            }
        }

        /// Suspend once per request so concurrent calls can interleave.
        fn slow(mut self) -> Self {
            self.yield_first = true;
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }

        async fn next_reply(&self) -> Result<HttpReply, TransportError> {
            if self.yield_first {
                tokio::task::yield_now().await;
            }
            let next = self.replies.borrow_mut().pop_front();
            next.unwrap_or_else(|| Err(TransportError::Request("no scripted reply".into())))
        }
    }

    impl Transport for ScriptedTransport {
        type File = TestFile;

        async fn post_file(
            &self,
            url: &str,
            field: &str,
            file: &TestFile,
        ) -> Result<HttpReply, TransportError> {
            self.requests
                .borrow_mut()
                .push(format!("POST {} {}={}", url, field, file.0));
            self.next_reply().await
        }

        async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
            self.requests.borrow_mut().push(format!("GET {}", url));
            self.next_reply().await
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
        refuse: bool,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) -> Result<(), String> {
            if self.refuse {
                return Err("popup blocked".to_string());
            }
            self.visited.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    type TestController = UploadController<ScriptedTransport, RecordingNavigator>;

    fn ok(body: &str) -> Result<HttpReply, TransportError> {
        Ok(HttpReply::new(200, body))
    }

    fn controller(source: SourceConfig, transport: ScriptedTransport) -> TestController {
        UploadController::new(source, transport, RecordingNavigator::default())
    }

    fn ocr() -> SourceConfig {
        SourceConfig::ocr(&ServerConfig::default())
    }

    fn gmail() -> SourceConfig {
        SourceConfig::gmail(&ServerConfig::default())
    }

    #[tokio::test]
    async fn test_submit_without_file_sends_nothing() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok("")]));

        let submission = c.submit().await;

        assert_eq!(submission.outcome, Outcome::Failed(UploadError::NoFileSelected));
        assert!(c.transport().requests().is_empty());
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Warning);
        assert_eq!(state.banner.message(), "Please select a file before submitting");
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_successful_upload_names_the_file() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok("File successfully processed")]));
        c.select_file(Some(TestFile("report.pdf")));

        let submission = c.submit().await;

        assert_eq!(
            submission.outcome,
            Outcome::Uploaded { file_name: "report.pdf".into() }
        );
        assert_eq!(
            c.transport().requests(),
            vec!["POST http://localhost:5000/ocr file=report.pdf"]
        );
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Success);
        assert!(state.banner.message().contains("report.pdf"));
        assert!(!state.is_loading);
        assert_eq!(state.selected_file, Some(TestFile("report.pdf")));
    }

    #[tokio::test]
    async fn test_server_error_field_reaches_the_banner() {
        let c = controller(
            ocr(),
            ScriptedTransport::with(vec![Ok(HttpReply::new(500, r#"{"error":"bad file"}"#))]),
        );
        c.select_file(Some(TestFile("scan.png")));

        let submission = c.submit().await;

        assert!(matches!(
            submission.outcome,
            Outcome::Failed(UploadError::Server { status: 500, .. })
        ));
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Danger);
        assert!(state.banner.message().contains("bad file"));
    }

    #[tokio::test]
    async fn test_plain_text_error_still_reports_danger() {
        let c = controller(
            ocr(),
            ScriptedTransport::with(vec![Ok(HttpReply::new(400, "No selected file"))]),
        );
        c.select_file(Some(TestFile("scan.png")));

        c.submit().await;

        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Danger);
        assert_eq!(state.banner.message(), "Error uploading file");
    }

    #[tokio::test]
    async fn test_transport_failure_clears_loading() {
        let seen_loading = Rc::new(RefCell::new(Vec::new()));
        let c = controller(
            ocr(),
            ScriptedTransport::with(vec![Err(TransportError::Request("connection refused".into()))]),
        );
        let sink = Rc::clone(&seen_loading);
        c.subscribe(move |state| sink.borrow_mut().push(state.is_loading));
        c.select_file(Some(TestFile("scan.png")));

        let submission = c.submit().await;

        assert!(matches!(
            submission.outcome,
            Outcome::Failed(UploadError::Transport(TransportError::Request(_)))
        ));
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Danger);
        assert!(!state.is_loading);
        assert!(!c.is_busy());

        let seen = seen_loading.borrow();
        assert!(seen.contains(&true), "loading flag was never raised");
        assert_eq!(seen.last(), Some(&false));
    }

    #[tokio::test]
    async fn test_gmail_chains_into_redirect() {
        let c = controller(
            gmail(),
            ScriptedTransport::with(vec![
                ok(r#"{"message":"stored"}"#),
                ok(r#"{"authorization_url":"https://x"}"#),
            ]),
        );
        c.select_file(Some(TestFile("credentials.json")));

        let submission = c.submit().await;

        assert_eq!(submission.outcome, Outcome::Redirected { url: "https://x".into() });
        assert_eq!(submission.auto_close, None);
        assert_eq!(
            c.transport().requests(),
            vec![
                "POST http://localhost:5000/upload_credentials file=credentials.json",
                "GET http://localhost:5000/generate_token",
            ]
        );
        assert_eq!(*c.navigator().visited.borrow(), vec!["https://x".to_string()]);
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Info);
        assert!(!state.banner.message().is_empty());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_gmail_upload_failure_skips_authorization() {
        let c = controller(
            gmail(),
            ScriptedTransport::with(vec![Ok(HttpReply::new(400, r#"{"error":"invalid json"}"#))]),
        );
        c.select_file(Some(TestFile("credentials.json")));

        c.submit().await;

        assert_eq!(c.transport().requests().len(), 1);
        assert!(c.navigator().visited.borrow().is_empty());
        let state = c.snapshot();
        assert_eq!(state.banner.message(), "Error uploading file: invalid json");
    }

    #[tokio::test]
    async fn test_token_endpoint_failure_is_reported() {
        let c = controller(
            gmail(),
            ScriptedTransport::with(vec![
                ok("{}"),
                Ok(HttpReply::new(400, r#"{"error":"Credentials file not found"}"#)),
            ]),
        );
        c.select_file(Some(TestFile("credentials.json")));

        let submission = c.submit().await;

        assert_eq!(
            submission.outcome,
            Outcome::Failed(UploadError::Authorization("Credentials file not found".into()))
        );
        assert!(c.navigator().visited.borrow().is_empty());
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Danger);
        assert_eq!(state.banner.message(), "Error during authentication");
    }

    #[tokio::test]
    async fn test_token_without_url_is_reported() {
        let c = controller(gmail(), ScriptedTransport::with(vec![ok("{}"), ok(r#"{"state":"abc"}"#)]));
        c.select_file(Some(TestFile("credentials.json")));

        let submission = c.submit().await;

        assert!(matches!(
            submission.outcome,
            Outcome::Failed(UploadError::Authorization(_))
        ));
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Danger);
    }

    #[tokio::test]
    async fn test_navigation_failure_is_reported() {
        let c = UploadController::new(
            gmail(),
            ScriptedTransport::with(vec![ok("{}"), ok(r#"{"authorization_url":"https://x"}"#)]),
            RecordingNavigator {
                refuse: true,
                ..RecordingNavigator::default()
            },
        );
        c.select_file(Some(TestFile("credentials.json")));

        let submission = c.submit().await;

        assert_eq!(
            submission.outcome,
            Outcome::Failed(UploadError::Authorization("popup blocked".into()))
        );
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Danger);
    }

    #[tokio::test]
    async fn test_legacy_gmail_is_a_plain_upload() {
        let source = SourceConfig::gmail_legacy(&ServerConfig::default());
        let c = controller(source, ScriptedTransport::with(vec![ok("File successfully uploaded")]));
        c.select_file(Some(TestFile("credentials.json")));

        let submission = c.submit().await;

        assert_eq!(
            submission.outcome,
            Outcome::Uploaded { file_name: "credentials.json".into() }
        );
        assert_eq!(
            c.transport().requests(),
            vec!["POST http://localhost:5000/upload file=credentials.json"]
        );
        assert!(c.navigator().visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_requires_follow_up() {
        let c = controller(ocr(), ScriptedTransport::default());

        let outcome = c.authenticate().await;

        assert!(matches!(outcome, Outcome::Failed(UploadError::Authorization(_))));
        assert!(c.transport().requests().is_empty());
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Danger);
    }

    #[tokio::test]
    async fn test_authenticate_alone_issues_one_get() {
        let c = controller(gmail(), ScriptedTransport::with(vec![ok(r#"{"authorization_url":"https://x"}"#)]));

        let outcome = c.authenticate().await;

        assert_eq!(outcome, Outcome::Redirected { url: "https://x".into() });
        assert_eq!(c.transport().requests(), vec!["GET http://localhost:5000/generate_token"]);
    }

    #[tokio::test]
    async fn test_double_submit_is_rejected() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok(""), ok("")]).slow());
        c.select_file(Some(TestFile("report.pdf")));

        let (first, second) = tokio::join!(c.submit(), c.submit());

        assert!(matches!(first.outcome, Outcome::Uploaded { .. }));
        assert_eq!(second.outcome, Outcome::Rejected);
        assert_eq!(c.transport().requests().len(), 1);
        assert!(!c.is_busy());

        // Once settled, a retry goes through
        let third = c.submit().await;
        assert!(matches!(third.outcome, Outcome::Uploaded { .. }));
        assert_eq!(c.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_close_during_upload_discards_response() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok("")]).slow());
        c.select_file(Some(TestFile("report.pdf")));

        let (submission, ()) = tokio::join!(c.submit(), async { c.close() });

        assert_eq!(submission.outcome, Outcome::Discarded);
        assert_eq!(submission.auto_close, None);
        assert!(c.snapshot().is_pristine());
        assert!(!c.is_busy());
    }

    #[tokio::test]
    async fn test_reopened_modal_explains_rejected_submit() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok(""), ok("")]).slow());
        c.select_file(Some(TestFile("old.pdf")));

        let (first, second) = tokio::join!(c.submit(), async {
            c.close();
            c.select_file(Some(TestFile("new.pdf")));
            c.submit().await
        });

        assert_eq!(first.outcome, Outcome::Discarded);
        assert_eq!(second.outcome, Outcome::Rejected);
        let state = c.snapshot();
        assert_eq!(state.banner.status(), UploadStatus::Info);
        assert_eq!(state.banner.message(), ocr().messages.still_finishing);
        assert_eq!(state.selected_file, Some(TestFile("new.pdf")));
        assert!(!state.is_loading);
        assert_eq!(
            c.transport().requests(),
            vec!["POST http://localhost:5000/ocr file=old.pdf"]
        );

        // Stale request has settled, the retry goes out
        let retry = c.submit().await;
        assert_eq!(retry.outcome, Outcome::Uploaded { file_name: "new.pdf".into() });
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Success);
        assert_eq!(c.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_authenticate_rejected_while_upload_runs() {
        let c = controller(
            gmail(),
            ScriptedTransport::with(vec![
                ok("{}"),
                ok(r#"{"authorization_url":"https://x"}"#),
            ])
            .slow(),
        );
        c.select_file(Some(TestFile("credentials.json")));

        let (submission, auth) = tokio::join!(c.submit(), c.authenticate());

        assert_eq!(auth, Outcome::Rejected);
        assert_eq!(submission.outcome, Outcome::Redirected { url: "https://x".into() });
        // Only the upload and its own token request went out
        assert_eq!(
            c.transport().requests(),
            vec![
                "POST http://localhost:5000/upload_credentials file=credentials.json",
                "GET http://localhost:5000/generate_token",
            ]
        );
        assert_eq!(*c.navigator().visited.borrow(), vec!["https://x".to_string()]);
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Info);
        assert!(!c.is_busy());
    }

    #[tokio::test]
    async fn test_close_resets_from_any_state() {
        let closed = Rc::new(Cell::new(0));
        let c = controller(
            ocr(),
            ScriptedTransport::with(vec![Ok(HttpReply::new(500, r#"{"error":"bad file"}"#))]),
        );
        let counter = Rc::clone(&closed);
        c.set_on_close(move || counter.set(counter.get() + 1));
        c.select_file(Some(TestFile("scan.png")));
        c.submit().await;
        assert!(!c.snapshot().is_pristine());

        c.close();

        let state = c.snapshot();
        assert_eq!(state.selected_file, None);
        assert_eq!(state.banner.status(), UploadStatus::Unknown);
        assert_eq!(state.banner.message(), "");
        assert!(!state.is_loading);
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_auto_close_fires_after_delay() {
        let closed = Rc::new(Cell::new(0));
        let c = controller(ocr(), ScriptedTransport::with(vec![ok("")]));
        let counter = Rc::clone(&closed);
        c.set_on_close(move || counter.set(counter.get() + 1));
        c.select_file(Some(TestFile("report.pdf")));

        let submission = c.submit().await;
        let ticket = submission.auto_close.expect("ocr closes itself");
        assert_eq!(ticket.delay(), Duration::from_secs(3));

        assert!(c.auto_close_after(ticket, async {}).await);
        assert!(c.snapshot().is_pristine());
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_warning_also_arms_auto_close() {
        let c = controller(ocr(), ScriptedTransport::default());

        let submission = c.submit().await;

        assert!(submission.auto_close.is_some());
        assert!(c.fire_auto_close(submission.auto_close.unwrap()));
        assert!(c.snapshot().is_pristine());
    }

    #[tokio::test]
    async fn test_manual_close_cancels_auto_close() {
        let closed = Rc::new(Cell::new(0));
        let c = controller(ocr(), ScriptedTransport::with(vec![ok("")]));
        let counter = Rc::clone(&closed);
        c.set_on_close(move || counter.set(counter.get() + 1));
        c.select_file(Some(TestFile("report.pdf")));
        let ticket = c.submit().await.auto_close.unwrap();

        c.close();
        c.select_file(Some(TestFile("next.pdf")));

        assert!(!c.fire_auto_close(ticket));
        assert_eq!(closed.get(), 1);
        assert_eq!(c.snapshot().selected_file, Some(TestFile("next.pdf")));
    }

    #[tokio::test]
    async fn test_new_submit_supersedes_pending_auto_close() {
        let c = controller(ocr(), ScriptedTransport::with(vec![ok(""), ok("")]));
        c.select_file(Some(TestFile("report.pdf")));

        let stale = c.submit().await.auto_close.unwrap();
        let fresh = c.submit().await.auto_close.unwrap();

        assert!(!c.fire_auto_close(stale));
        assert_eq!(c.snapshot().banner.status(), UploadStatus::Success);
        assert!(c.fire_auto_close(fresh));
    }

    #[test]
    fn test_select_file_notifies_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let c = controller(ocr(), ScriptedTransport::default());
        let sink = Rc::clone(&seen);
        c.subscribe(move |state| sink.borrow_mut().push(state.selected_file.clone()));

        c.select_file(Some(TestFile("a.pdf")));
        c.select_file(None);

        assert_eq!(*seen.borrow(), vec![Some(TestFile("a.pdf")), None]);
    }
}
