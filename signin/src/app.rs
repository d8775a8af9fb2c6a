use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Stylize},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use signin_core::{form, Effect, LoginForm, Route};
use std::process::ExitCode;

/// The login form as terminal widgets
mod login_view;
use login_view::LoginView;

/// The "functional core" of the app.
pub struct App {
    /// The form and its rules
    form: LoginForm,

    /// Focus and cursor state for drawing the form
    view: LoginView,

    /// Server we're logging into, for display
    server: String,

    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Set once the user wants out
    exit: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app
    pub fn new(server: String) -> Self {
        Self {
            form: LoginForm::new(),
            view: LoginView::default(),
            server,
            status_line: None,
            exit: None,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match self.current_route() {
            Route::Login => self.view.render(&self.form, body_area, frame),
            route => {
                let message = match route {
                    Route::Profile => "You're signed in. Your session has been saved.".to_string(),
                    _ => format!(
                        "Create an account at {}{}",
                        self.server.trim_end_matches('/'),
                        route.path()
                    ),
                };

                let popup_vert = Layout::vertical([Constraint::Length(5)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(60)]).flex(Flex::Center);
                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(route.path())
                            .border_style(Color::Blue),
                    );

                frame.render_widget(popup, popup_area);
            }
        }

        frame.render_widget(Paragraph::new(self.status()).fg(Color::DarkGray), status_area);
    }

    /// The bottom line: the last thing worth mentioning, or where we are.
    fn status(&self) -> String {
        match &self.status_line {
            Some(line) => line.clone(),
            None => format!(
                "{}{} · Esc to quit",
                self.server.trim_end_matches('/'),
                self.current_route().path()
            ),
        }
    }

    /// Where the user is right now
    fn current_route(&self) -> Route {
        self.form.navigated_to().unwrap_or(Route::Login)
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                let wants_out = key.code == KeyCode::Esc
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c'));

                if wants_out
                    || (self.current_route() != Route::Login && key.code == KeyCode::Char('q'))
                {
                    self.exit = Some(ExitCode::SUCCESS);
                    return vec![];
                }

                if self.current_route() != Route::Login {
                    return vec![];
                }

                let mut effects = Vec::new();
                for form_action in self.view.handle_key(key, &self.form) {
                    effects.extend(self.form.handle(form_action));
                }
                effects
            }
            Action::Form(form_action) => {
                match &form_action {
                    form::Action::TokenSaved => {
                        self.status_line = Some("Saved session token".to_owned());
                    }
                    form::Action::RedirectDue(route) => {
                        tracing::info!(path = route.path(), "redirecting");
                    }
                    _ => {}
                }

                self.form.handle(form_action)
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// An effect finished and has news for the form
    Form(form::Action),

    /// Something bad happened; display it to the user
    Problem(String),
}
