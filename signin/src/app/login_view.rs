use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};
use signin_core::{form, Field, LoginForm, Route};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The controls Tab moves between, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// The email input
    Email,

    /// The password input
    Password,

    /// The "remember me" checkbox
    RememberMe,
}

impl Focus {
    /// Tab order. Moving off either end wraps around.
    const RING: [Self; 3] = [Self::Email, Self::Password, Self::RememberMe];

    /// Step `by` places around the ring
    fn step(self, by: usize) -> Self {
        let here = Self::RING
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or_default();

        Self::RING[(here + by) % Self::RING.len()]
    }

    /// The control after this one (Tab)
    fn next(self) -> Self {
        self.step(1)
    }

    /// The control before this one (Shift-Tab)
    fn prev(self) -> Self {
        self.step(Self::RING.len() - 1)
    }

    /// The validated field under this focus, if there is one
    fn field(self) -> Option<Field> {
        match self {
            Self::Email => Some(Field::Email),
            Self::Password => Some(Field::Password),
            Self::RememberMe => None,
        }
    }
}

/// Terminal widgets for the login form. The form itself lives in
/// `LoginForm`; this only holds what the terminal needs on top of it (focus
/// and cursor positions.)
#[derive(Debug)]
pub struct LoginView {
    /// Which control we're on
    active: Focus,

    /// Editing state for the email input
    email: Input,

    /// Editing state for the password input. Drawn from the form so it can
    /// be masked.
    password: Input,
}

impl LoginView {
    /// Draw the form centered in `body_area`
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, form: &LoginForm, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(20)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(60)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let card = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(" Welcome Back ").bold().centered())
            .padding(Padding::horizontal(1))
            .border_style(Style::new().fg(Color::Blue));
        let inner = card.inner(popup_area);
        frame.render_widget(card, popup_area);

        let rows = Layout::vertical(Constraint::from_lengths([1, 1, 3, 1, 3, 1, 1, 1, 1, 1, 1]));
        let [subtitle_area, _, email_area, email_error_area, password_area, password_error_area, options_area, banner_area, _, submit_area, footer_area] =
            rows.areas(inner);

        frame.render_widget(
            Paragraph::new("Sign in to continue your learning journey")
                .alignment(Alignment::Center)
                .fg(Color::Gray),
            subtitle_area,
        );

        let width = email_area.width.saturating_sub(2 + 1) as usize; // -2 for the border, -1 for the cursor

        // EMAIL
        {
            let scroll = self.email.visual_scroll(width);

            let email_field = if self.email.value().is_empty() {
                Paragraph::new("you@example.com").fg(Color::DarkGray)
            } else {
                Paragraph::new(self.email.value())
            }
            .scroll((0, scroll as u16))
            .block(self.field_block(form, Focus::Email));

            frame.render_widget(email_field, email_area);
            render_field_error(frame, form, Field::Email, email_error_area);

            if self.active == Focus::Email {
                frame.set_cursor_position((
                    email_area.x
                        + (self.email.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                        + 1, // just past the border
                    email_area.y + 1, // +1 row for the border/title
                ));
            }
        }

        // PASSWORD
        {
            let scroll = self.password.visual_scroll(width);

            let toggle_hint = if form.show_password() {
                " ^P hide "
            } else {
                " ^P show "
            };

            let password_field = if self.password.value().is_empty() {
                Paragraph::new("••••••••").fg(Color::DarkGray)
            } else {
                Paragraph::new(form.password_display())
            }
            .scroll((0, scroll as u16))
            .block(
                self.field_block(form, Focus::Password)
                    .title(Line::from(toggle_hint).right_aligned()),
            );

            frame.render_widget(password_field, password_area);
            render_field_error(frame, form, Field::Password, password_error_area);

            if self.active == Focus::Password {
                frame.set_cursor_position((
                    password_area.x
                        + (self.password.visual_cursor().max(scroll) - scroll) as u16
                        + 1,
                    password_area.y + 1,
                ));
            }
        }

        // REMEMBER ME / FORGOT PASSWORD
        {
            let checkbox = if form.credentials().remember_me {
                "[x] Remember me"
            } else {
                "[ ] Remember me"
            };
            let checkbox_style = if self.active == Focus::RememberMe {
                Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };

            let [checkbox_area, forgot_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(options_area);

            frame.render_widget(Paragraph::new(checkbox).style(checkbox_style), checkbox_area);
            frame.render_widget(
                Paragraph::new("Forgot password?")
                    .alignment(Alignment::Right)
                    .fg(Color::Blue),
                forgot_area,
            );
        }

        if let Some(error) = form.error() {
            frame.render_widget(
                Paragraph::new(error)
                    .alignment(Alignment::Center)
                    .fg(Color::Red),
                banner_area,
            );
        }

        let submit = if form.is_submitting() {
            Paragraph::new("[ Signing in... ]").fg(Color::DarkGray)
        } else {
            Paragraph::new("[ Sign in ]").bold().fg(Color::Blue)
        };
        frame.render_widget(submit.alignment(Alignment::Center), submit_area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Don't have an account? "),
                Span::styled("Sign up", Style::new().fg(Color::Blue).bold()),
                Span::raw(" (^R)"),
            ]))
            .alignment(Alignment::Center),
            footer_area,
        );
    }

    /// The bordered box around a text input. Red if its field has an error,
    /// blue if it has focus.
    fn field_block(&self, form: &LoginForm, focus: Focus) -> Block<'static> {
        let has_error = focus
            .field()
            .and_then(|field| form.field_error(field))
            .is_some();

        let border_style = if has_error {
            Style::new().fg(Color::Red)
        } else if self.active == focus {
            Style::new().fg(Color::Blue)
        } else {
            Style::new().fg(Color::DarkGray)
        };

        Block::default()
            .borders(Borders::ALL)
            .title(focus.field().map_or("", Field::label))
            .border_style(border_style)
    }

    /// Turn a key press into whatever the form needs to hear about.
    pub fn handle_key(&mut self, key: KeyEvent, form: &LoginForm) -> Vec<form::Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('p') => vec![form::Action::TogglePasswordVisibility],
                KeyCode::Char('r') => vec![form::Action::FollowLink(Route::Register)],
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Tab => self.move_focus(self.active.next()),
            KeyCode::BackTab => self.move_focus(self.active.prev()),
            KeyCode::Enter => {
                let mut actions = self.blur();
                actions.push(form::Action::Submit);
                actions
            }
            KeyCode::Char(' ') if self.active == Focus::RememberMe => {
                vec![form::Action::RememberMeChanged(
                    !form.credentials().remember_me,
                )]
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Focus::Email => {
                        self.email.handle_event(&event);
                        vec![form::Action::EmailChanged(self.email.value().to_string())]
                    }
                    Focus::Password => {
                        self.password.handle_event(&event);
                        vec![form::Action::PasswordChanged(
                            self.password.value().to_string(),
                        )]
                    }
                    Focus::RememberMe => vec![],
                }
            }
        }
    }

    /// Leave the current control for another one.
    fn move_focus(&mut self, to: Focus) -> Vec<form::Action> {
        let actions = self.blur();
        self.active = to;
        actions
    }

    /// Tell the form we're leaving the current field, if it's one it checks.
    fn blur(&self) -> Vec<form::Action> {
        self.active
            .field()
            .map(form::Action::Blurred)
            .into_iter()
            .collect()
    }
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            active: Focus::Email,
            email: Input::new(String::new()),
            password: Input::new(String::new()),
        }
    }
}

/// Show the field's validation message under it, if it has one.
fn render_field_error(frame: &mut Frame<'_>, form: &LoginForm, field: Field, area: Rect) {
    if let Some(message) = form.field_error(field) {
        frame.render_widget(Paragraph::new(message).fg(Color::Red), area);
    }
}
