//! Conversation turn state machine.
//!
//! Hosts translate UI events into [`Command`]s and feed them to
//! [`TurnController::dispatch`], which updates the transcript and drives the
//! host through the [`ChatSurface`] trait. The controller itself never does
//! I/O; [`ChatSession`] glues it to a [`Completion`] for hosts that can simply
//! await a whole turn.

use tracing::debug;

use crate::ai::Completion;
use crate::state::{ChatMessage, RequestState, Transcript};

/// What a host must provide to display the conversation.
pub trait ChatSurface {
    fn append_message(&mut self, message: &ChatMessage);
    fn scroll_to_bottom(&mut self);
    fn show_typing(&mut self);
    fn remove_typing(&mut self);
    fn set_input(&mut self, text: &str);
    fn clear_input(&mut self);
    /// Enables or disables the input field, send control and suggestions together.
    fn set_controls_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    SuggestionPicked(String),
    Response(String),
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Ignored,
    /// A turn started; the trimmed message must now be sent for completion.
    Send(String),
    /// The in-flight turn finished and the controller is idle again.
    Settled,
}

#[derive(Debug, Default)]
pub struct TurnController {
    transcript: Transcript,
    state: RequestState,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == RequestState::Sending
    }

    pub fn dispatch<S: ChatSurface + ?Sized>(&mut self, command: Command, surface: &mut S) -> Step {
        match (self.state, command) {
            (RequestState::Idle, Command::Submit(text)) => self.begin_turn(&text, surface),
            (RequestState::Idle, Command::SuggestionPicked(label)) => {
                surface.set_input(&label);
                self.begin_turn(&label, surface)
            }
            (RequestState::Sending, Command::Response(text)) => {
                self.finish_turn(&text, surface);
                Step::Settled
            }
            (state, command) => {
                debug!(?state, ?command, "command ignored");
                Step::Ignored
            }
        }
    }

    fn begin_turn<S: ChatSurface + ?Sized>(&mut self, text: &str, surface: &mut S) -> Step {
        let message = text.trim();
        if message.is_empty() {
            return Step::Ignored;
        }

        let appended = self.transcript.push(ChatMessage::user(message));
        surface.append_message(appended);
        surface.scroll_to_bottom();

        surface.clear_input();
        surface.set_controls_enabled(false);

        surface.show_typing();
        surface.scroll_to_bottom();

        self.state = RequestState::Sending;
        debug!(turn = self.transcript.len(), "turn started");
        Step::Send(message.to_string())
    }

    fn finish_turn<S: ChatSurface + ?Sized>(&mut self, reply: &str, surface: &mut S) {
        surface.remove_typing();

        let appended = self.transcript.push(ChatMessage::assistant(reply));
        surface.append_message(appended);
        surface.scroll_to_bottom();

        surface.set_controls_enabled(true);
        surface.focus_input();

        self.state = RequestState::Idle;
        debug!(turn = self.transcript.len(), "turn settled");
    }
}

/// A controller paired with a completion backend.
pub struct ChatSession<C> {
    controller: TurnController,
    completion: C,
}

impl<C: Completion> ChatSession<C> {
    pub fn new(completion: C) -> Self {
        Self {
            controller: TurnController::new(),
            completion,
        }
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Dispatch a command and, if it starts a turn, run that turn to completion.
    pub async fn handle<S: ChatSurface + ?Sized>(&mut self, command: Command, surface: &mut S) -> Step {
        match self.controller.dispatch(command, surface) {
            Step::Send(message) => {
                let reply = self.completion.request_completion(&message).await;
                self.controller.dispatch(Command::Response(reply), surface)
            }
            step => step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GroqClient;
    use crate::credential::CredentialLoader;
    use crate::error::{CONNECTION_APOLOGY, CREDENTIAL_APOLOGY};
    use crate::state::ChatRole;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Append(ChatRole, String),
        Scroll,
        ShowTyping,
        RemoveTyping,
        SetInput(String),
        ClearInput,
        Controls(bool),
        Focus,
    }

    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<Event>,
    }

    impl RecordingSurface {
        fn controls_enabled(&self) -> bool {
            self.events
                .iter()
                .rev()
                .find_map(|e| match e {
                    Event::Controls(enabled) => Some(*enabled),
                    _ => None,
                })
                .unwrap_or(true)
        }
    }

    impl ChatSurface for RecordingSurface {
        fn append_message(&mut self, message: &ChatMessage) {
            self.events.push(Event::Append(message.role, message.rendered_html.clone()));
        }
        fn scroll_to_bottom(&mut self) {
            self.events.push(Event::Scroll);
        }
        fn show_typing(&mut self) {
            self.events.push(Event::ShowTyping);
        }
        fn remove_typing(&mut self) {
            self.events.push(Event::RemoveTyping);
        }
        fn set_input(&mut self, text: &str) {
            self.events.push(Event::SetInput(text.to_string()));
        }
        fn clear_input(&mut self) {
            self.events.push(Event::ClearInput);
        }
        fn set_controls_enabled(&mut self, enabled: bool) {
            self.events.push(Event::Controls(enabled));
        }
        fn focus_input(&mut self) {
            self.events.push(Event::Focus);
        }
    }

    struct ScriptedCompletion {
        reply: String,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedCompletion {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Completion for ScriptedCompletion {
        async fn request_completion(&self, user_message: &str) -> String {
            self.calls.lock().unwrap().push(user_message.to_string());
            self.reply.clone()
        }
    }

    #[test]
    fn submit_runs_effects_in_order() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        let step = controller.dispatch(Command::Submit("  <hi>  ".into()), &mut surface);

        assert_eq!(step, Step::Send("<hi>".into()));
        assert_eq!(controller.state(), RequestState::Sending);
        assert_eq!(
            surface.events,
            vec![
                Event::Append(ChatRole::User, "&lt;hi&gt;".into()),
                Event::Scroll,
                Event::ClearInput,
                Event::Controls(false),
                Event::ShowTyping,
                Event::Scroll,
            ]
        );
    }

    #[test]
    fn blank_submission_is_a_no_op() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        for blank in ["", "   ", "\n\t"] {
            let step = controller.dispatch(Command::Submit(blank.into()), &mut surface);
            assert_eq!(step, Step::Ignored);
        }

        assert!(controller.transcript().is_empty());
        assert_eq!(controller.state(), RequestState::Idle);
        assert!(surface.events.is_empty());
    }

    #[test]
    fn no_second_turn_while_sending() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        controller.dispatch(Command::Submit("first".into()), &mut surface);
        assert!(!surface.controls_enabled());

        let before = surface.events.len();
        assert_eq!(
            controller.dispatch(Command::Submit("second".into()), &mut surface),
            Step::Ignored
        );
        assert_eq!(
            controller.dispatch(Command::SuggestionPicked("third".into()), &mut surface),
            Step::Ignored
        );

        assert_eq!(controller.transcript().len(), 1);
        assert!(controller.is_sending());
        assert_eq!(surface.events.len(), before);
    }

    #[test]
    fn response_while_idle_is_ignored() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        let step = controller.dispatch(Command::Response("stray".into()), &mut surface);

        assert_eq!(step, Step::Ignored);
        assert!(controller.transcript().is_empty());
    }

    #[test]
    fn response_formats_reply_and_reenables_input() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        controller.dispatch(Command::Submit("skills?".into()), &mut surface);
        surface.events.clear();

        let step = controller.dispatch(Command::Response("- **Rust**".into()), &mut surface);

        assert_eq!(step, Step::Settled);
        assert_eq!(controller.state(), RequestState::Idle);
        assert_eq!(
            surface.events,
            vec![
                Event::RemoveTyping,
                Event::Append(
                    ChatRole::Assistant,
                    "<ul><li><strong>Rust</strong></li></ul>".into()
                ),
                Event::Scroll,
                Event::Controls(true),
                Event::Focus,
            ]
        );

        let last = controller.transcript().last().unwrap();
        assert_eq!(last.raw_text, "- **Rust**");
    }

    #[test]
    fn suggestion_fills_input_then_submits() {
        let mut controller = TurnController::new();
        let mut surface = RecordingSurface::default();

        let step = controller.dispatch(
            Command::SuggestionPicked("What are Hari's skills?".into()),
            &mut surface,
        );

        assert_eq!(step, Step::Send("What are Hari's skills?".into()));
        assert_eq!(surface.events[0], Event::SetInput("What are Hari's skills?".into()));
        assert_eq!(
            surface.events[1],
            Event::Append(ChatRole::User, "What are Hari&#39;s skills?".into())
        );
    }

    #[tokio::test]
    async fn session_runs_full_turn() {
        let mut session = ChatSession::new(ScriptedCompletion::new("Hari knows *Rust*."));
        let mut surface = RecordingSurface::default();

        let step = session.handle(Command::Submit("What does Hari know?".into()), &mut surface).await;

        assert_eq!(step, Step::Settled);
        assert_eq!(session.completion.calls(), vec!["What does Hari know?".to_string()]);

        let messages = session.controller().transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1].rendered_html, "Hari knows <em>Rust</em>.");
        assert!(surface.controls_enabled());
    }

    #[tokio::test]
    async fn session_skips_completion_for_blank_input() {
        let mut session = ChatSession::new(ScriptedCompletion::new("unused"));
        let mut surface = RecordingSurface::default();

        let step = session.handle(Command::Submit("  ".into()), &mut surface).await;

        assert_eq!(step, Step::Ignored);
        assert!(session.completion.calls().is_empty());
        assert!(session.controller().transcript().is_empty());
    }

    #[tokio::test]
    async fn failed_request_still_returns_to_idle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = CredentialLoader::new(Some("gsk_test".into()), ".env");
        let client = GroqClient::new(&server.uri(), Arc::new(credentials));
        let mut session = ChatSession::new(client);
        let mut surface = RecordingSurface::default();

        let step = session.handle(Command::Submit("hello".into()), &mut surface).await;

        assert_eq!(step, Step::Settled);
        assert_eq!(session.controller().state(), RequestState::Idle);
        assert!(surface.controls_enabled());
        assert_eq!(surface.events.last(), Some(&Event::Focus));
        assert_eq!(
            session.controller().transcript().last().map(|m| m.raw_text.as_str()),
            Some(CONNECTION_APOLOGY)
        );
    }

    #[tokio::test]
    async fn missing_credential_produces_apology_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".env");
        let credentials = CredentialLoader::new(None, missing.to_str().unwrap());
        let client = GroqClient::new(&server.uri(), Arc::new(credentials));
        let mut session = ChatSession::new(client);
        let mut surface = RecordingSurface::default();

        session.handle(Command::Submit("hello".into()), &mut surface).await;

        assert_eq!(
            session.controller().transcript().last().map(|m| m.raw_text.as_str()),
            Some(CREDENTIAL_APOLOGY)
        );
        assert!(!session.controller().is_sending());
    }
}
