use folio_core::format::{self, Block};
use folio_core::error::CONNECTION_APOLOGY;
use folio_core::{ChatMessage, ChatRole, ChatSurface, Command, Completion, Config, GroqClient, Step, TurnController};
use ratatui::layout::Rect;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Suggestions,
}

/// A transcript entry as the terminal draws it.
#[derive(Debug, Clone)]
pub enum ViewEntry {
    User(String),
    Assistant(Vec<Block>),
}

/// Terminal rendering surface for the turn controller.
#[derive(Debug)]
pub struct ChatView {
    pub entries: Vec<ViewEntry>,
    pub typing: bool,

    pub input: String,
    pub cursor: usize,
    pub controls_enabled: bool,
    pub input_focused: bool,

    pub scroll: u16,
    pub follow_bottom: bool,
    pub chat_height: u16,
    pub chat_width: u16,
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            typing: false,
            input: String::new(),
            cursor: 0,
            controls_enabled: true,
            input_focused: false,
            scroll: 0,
            follow_bottom: true,
            chat_height: 0,
            chat_width: 0,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_bottom = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}

impl ChatSurface for ChatView {
    fn append_message(&mut self, message: &ChatMessage) {
        let entry = match message.role {
            ChatRole::User => ViewEntry::User(message.raw_text.clone()),
            ChatRole::Assistant => ViewEntry::Assistant(format::parse(&message.raw_text)),
        };
        self.entries.push(entry);
    }

    fn scroll_to_bottom(&mut self) {
        // The real offset depends on wrapping, so it is resolved at render time.
        self.follow_bottom = true;
    }

    fn show_typing(&mut self) {
        self.typing = true;
    }

    fn remove_typing(&mut self) {
        self.typing = false;
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor = self.input.chars().count();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }
}

pub struct App {
    pub should_quit: bool,
    pub panel_open: bool,
    pub focus: FocusPane,

    pub controller: TurnController,
    pub view: ChatView,
    pub client: GroqClient,
    pub query_task: Option<tokio::task::JoinHandle<String>>,

    pub suggestions: Vec<String>,
    pub selected_suggestion: usize,

    pub animation_frame: u8,

    // Layout areas for mouse hit-testing
    pub chat_area: Option<Rect>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            panel_open: false,
            focus: FocusPane::Input,

            controller: TurnController::new(),
            view: ChatView::new(),
            client: GroqClient::from_config(config),
            query_task: None,

            suggestions: config.suggestions(),
            selected_suggestion: 0,

            animation_frame: 0,

            chat_area: None,
        }
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
        self.focus = FocusPane::Input;
        self.view.focus_input();
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
        self.view.input_focused = false;
    }

    /// Feed a command to the controller and start the request if a turn began.
    pub fn dispatch(&mut self, command: Command) {
        if let Step::Send(message) = self.controller.dispatch(command, &mut self.view) {
            self.focus = FocusPane::Input;
            let client = self.client.clone();
            self.query_task = Some(tokio::spawn(async move {
                client.request_completion(&message).await
            }));
        }
    }

    pub fn submit_input(&mut self) {
        if !self.view.controls_enabled {
            return;
        }
        let text = self.view.input.clone();
        self.dispatch(Command::Submit(text));
    }

    pub fn pick_suggestion(&mut self) {
        if !self.view.controls_enabled {
            return;
        }
        if let Some(label) = self.suggestions.get(self.selected_suggestion).cloned() {
            self.dispatch(Command::SuggestionPicked(label));
        }
    }

    pub fn next_suggestion(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected_suggestion = (self.selected_suggestion + 1) % self.suggestions.len();
        }
    }

    pub fn prev_suggestion(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected_suggestion = self
                .selected_suggestion
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    /// Deliver the reply once the background request has finished.
    pub async fn poll_query_task(&mut self) {
        let finished = self
            .query_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        if let Some(task) = self.query_task.take() {
            let reply = match task.await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, "completion task failed");
                    CONNECTION_APOLOGY.to_string()
                }
            };
            self.controller.dispatch(Command::Response(reply), &mut self.view);
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.view.typing {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tracks_controller_effects() {
        let mut controller = TurnController::new();
        let mut view = ChatView::new();
        view.set_input("  hello ");

        let step = controller.dispatch(Command::Submit(view.input.clone()), &mut view);
        assert_eq!(step, Step::Send("hello".into()));
        assert!(view.typing);
        assert!(!view.controls_enabled);
        assert!(view.input.is_empty());
        assert_eq!(view.cursor, 0);

        controller.dispatch(Command::Response("1. one\n2. two".into()), &mut view);
        assert!(!view.typing);
        assert!(view.controls_enabled);
        assert!(view.input_focused);
        assert!(view.follow_bottom);

        match &view.entries[1] {
            ViewEntry::Assistant(blocks) => assert_eq!(blocks.len(), 1),
            other => panic!("expected assistant entry, got {:?}", other),
        }
    }

    #[test]
    fn manual_scroll_stops_following() {
        let mut view = ChatView::new();
        view.scroll = 10;
        view.scroll_up(3);
        assert_eq!(view.scroll, 7);
        assert!(!view.follow_bottom);

        view.scroll_to_bottom();
        assert!(view.follow_bottom);
    }

    #[tokio::test]
    async fn suggestions_cycle_and_are_blocked_while_sending() {
        let mut app = App::new(&Config::default());
        let count = app.suggestions.len();

        app.prev_suggestion();
        assert_eq!(app.selected_suggestion, count - 1);
        app.next_suggestion();
        assert_eq!(app.selected_suggestion, 0);

        app.view.set_controls_enabled(false);
        app.pick_suggestion();
        assert!(app.controller.transcript().is_empty());
        assert!(app.query_task.is_none());
    }
}
