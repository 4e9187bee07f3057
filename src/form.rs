use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use strum::IntoEnumIterator;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    credential::{CredentialError, NetworkCredential, Security},
    query::QueryParams,
    theme::Palette,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Ssid,
    Security,
    Password,
    Hidden,
}

#[derive(Debug)]
pub struct Form {
    pub ssid: Input,
    pub password: Input,
    pub security: Security,
    pub hidden: bool,
    pub focused_field: FormField,
    pub show_password: bool,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            ssid: Input::default(),
            password: Input::default(),
            security: Security::Wpa,
            hidden: false,
            focused_field: FormField::Ssid,
            show_password: false,
        }
    }
}

impl Form {
    /// Pre-populate from URL or command line values. An unknown security
    /// name leaves the selector on its default.
    pub fn new(values: &QueryParams) -> Self {
        let security = values.security().ok().flatten().unwrap_or_default();

        Self {
            ssid: Input::new(values.ssid.clone().unwrap_or_default()),
            password: Input::new(values.password.clone().unwrap_or_default()),
            security,
            hidden: values.hidden,
            ..Default::default()
        }
    }

    pub fn requires_password(&self) -> bool {
        self.security.requires_password()
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            FormField::Ssid => FormField::Security,
            FormField::Security => {
                if self.requires_password() {
                    FormField::Password
                } else {
                    FormField::Hidden
                }
            }
            FormField::Password => FormField::Hidden,
            FormField::Hidden => FormField::Ssid,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            FormField::Ssid => FormField::Hidden,
            FormField::Security => FormField::Ssid,
            FormField::Password => FormField::Security,
            FormField::Hidden => {
                if self.requires_password() {
                    FormField::Password
                } else {
                    FormField::Security
                }
            }
        };
    }

    pub fn credential(&self) -> Result<NetworkCredential, CredentialError> {
        NetworkCredential::new(
            self.security,
            self.ssid.value(),
            Some(self.password.value().to_string()),
            self.hidden,
        )
    }

    /// Keys that edit the focused field. Focus and submit keys are handled by the caller.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match self.focused_field {
            FormField::Ssid => {
                self.ssid
                    .handle_event(&crossterm::event::Event::Key(key_event));
            }
            FormField::Password => {
                self.password
                    .handle_event(&crossterm::event::Event::Key(key_event));
            }
            FormField::Security => match key_event.code {
                KeyCode::Right | KeyCode::Char('l') => self.security = self.security.next(),
                KeyCode::Left | KeyCode::Char('h') => self.security = self.security.prev(),
                _ => {}
            },
            FormField::Hidden => {
                if matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Right | KeyCode::Left) {
                    self.hidden = !self.hidden;
                }
            }
        }
    }

    fn label(&self, text: &'static str, field: FormField, palette: &Palette) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::raw(text).bold(),
            if self.focused_field == field {
                Span::raw(" *").fg(palette.accent)
            } else {
                Span::raw("")
            },
        ]))
    }

    fn field_style(&self, field: FormField, palette: &Palette) -> Style {
        if self.focused_field == field {
            Style::default().fg(palette.fg).bg(palette.field)
        } else {
            Style::default().fg(palette.dim).bg(palette.field)
        }
    }

    pub fn render(&self, frame: &mut Frame, palette: &Palette) {
        let has_password = self.requires_password();
        let popup_height: u16 = if has_password { 18 } else { 14 };

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(popup_height),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area());

        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(60),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(popup_layout[1])[1];

        frame.render_widget(Clear, area);

        frame.render_widget(
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .title(" WiFi QR Code ")
                .title_style(Style::default().bold().fg(palette.fg))
                .style(Style::default().bg(palette.bg))
                .border_style(Style::default().fg(palette.accent)),
            area,
        );

        let mut constraints = vec![
            Constraint::Length(1), // SSID label
            Constraint::Length(1), // SSID input
            Constraint::Length(1),
            Constraint::Length(1), // Security label
            Constraint::Length(1), // Security selector
            Constraint::Length(1),
        ];
        if has_password {
            constraints.extend([
                Constraint::Length(1), // Password label
                Constraint::Length(1), // Password input
                Constraint::Length(1), // visibility
                Constraint::Length(1),
            ]);
        }
        constraints.extend([
            Constraint::Length(1), // Hidden checkbox
            Constraint::Length(1),
            Constraint::Length(1), // hints
        ]);

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(Block::new().padding(Padding::new(3, 3, 2, 0)).inner(area));

        // SSID
        frame.render_widget(self.label("Network name", FormField::Ssid, palette), inner[0]);
        let ssid_str = self.ssid.value().to_string();
        let ssid_input = Paragraph::new(
            if ssid_str.is_empty() && self.focused_field != FormField::Ssid {
                Line::from(Span::raw("Network name").dim())
            } else {
                Line::from(ssid_str.clone())
            },
        )
        .style(self.field_style(FormField::Ssid, palette));
        frame.render_widget(ssid_input, inner[1]);

        // Security
        frame.render_widget(self.label("Security", FormField::Security, palette), inner[3]);
        let mut security_spans: Vec<Span> = Security::iter()
            .enumerate()
            .flat_map(|(i, sec)| {
                let label = match sec {
                    Security::Wpa => "WPA/WPA2",
                    Security::Wep => "WEP",
                    Security::NoPass => "None",
                };
                let styled = if sec == self.security {
                    Span::raw(format!(" {} ", label))
                        .bold()
                        .fg(palette.bg)
                        .bg(palette.accent)
                } else {
                    Span::raw(format!(" {} ", label)).dim()
                };
                if i > 0 {
                    vec![Span::raw("  "), styled]
                } else {
                    vec![styled]
                }
            })
            .collect();
        if self.focused_field == FormField::Security {
            security_spans.push(Span::raw("  ←/→ to change").dim());
        }
        frame.render_widget(Paragraph::new(Line::from(security_spans)), inner[4]);

        let mut row = 6;

        if has_password {
            frame.render_widget(
                self.label("Password", FormField::Password, palette),
                inner[row],
            );

            let password_str = if self.show_password {
                self.password.value().to_string()
            } else {
                "*".repeat(self.password.value().chars().count())
            };
            let password_input = Paragraph::new(
                if password_str.is_empty() && self.focused_field != FormField::Password {
                    Line::from(Span::raw("Enter password").dim())
                } else {
                    Line::from(password_str)
                },
            )
            .style(self.field_style(FormField::Password, palette));
            frame.render_widget(password_input, inner[row + 1]);

            let toggle = Paragraph::new(Line::from(vec![
                if self.show_password {
                    Span::raw("󰈈 Visible")
                } else {
                    Span::raw("󰈉 Hidden")
                },
                Span::raw("  (ctrl+s to toggle)").dim(),
            ]));
            frame.render_widget(toggle, inner[row + 2]);

            row += 4;
        }

        let checkbox = Paragraph::new(Line::from(vec![
            Span::raw(if self.hidden { "[x] " } else { "[ ] " }).fg(
                if self.focused_field == FormField::Hidden {
                    palette.accent
                } else {
                    palette.dim
                },
            ),
            Span::raw("Hidden network").bold(),
            if self.focused_field == FormField::Hidden {
                Span::raw("  space to toggle").dim()
            } else {
                Span::raw("")
            },
        ]));
        frame.render_widget(checkbox, inner[row]);

        let hints = Paragraph::new(
            Line::from(vec![
                Span::raw("Tab").bold(),
                Span::raw(" Next  "),
                Span::raw("Enter").bold(),
                Span::raw(" Generate  "),
                Span::raw("ctrl+t").bold(),
                Span::raw(" Theme  "),
                Span::raw("Esc").bold(),
                Span::raw(" Quit"),
            ])
            .centered(),
        )
        .dim();
        frame.render_widget(hints, inner[row + 2]);

        match self.focused_field {
            FormField::Ssid => {
                let cursor_x = inner[1].x
                    + self
                        .ssid
                        .visual_cursor()
                        .min(ssid_str.chars().count()) as u16;
                frame.set_cursor_position((cursor_x, inner[1].y));
            }
            FormField::Password if has_password => {
                let pwd_len = self.password.value().chars().count();
                let cursor_x = inner[7].x + self.password.visual_cursor().min(pwd_len) as u16;
                frame.set_cursor_position((cursor_x, inner[7].y));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn prefills_from_query() {
        let form = Form::new(&QueryParams::parse(
            "security=WEP&ssid=Attic&password=abcde&hidden=true",
        ));
        assert_eq!(form.ssid.value(), "Attic");
        assert_eq!(form.password.value(), "abcde");
        assert_eq!(form.security, Security::Wep);
        assert!(form.hidden);
    }

    #[test]
    fn unknown_security_keeps_default() {
        let form = Form::new(&QueryParams::parse("security=bogus"));
        assert_eq!(form.security, Security::Wpa);
    }

    #[test]
    fn focus_skips_password_for_open_networks() {
        let mut form = Form::default();
        form.next_field();
        assert_eq!(form.focused_field, FormField::Security);

        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.security, Security::NoPass);

        form.next_field();
        assert_eq!(form.focused_field, FormField::Hidden);
        form.prev_field();
        assert_eq!(form.focused_field, FormField::Security);
    }

    #[test]
    fn typing_edits_focused_input() {
        let mut form = Form::default();
        for c in "Home".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.ssid.value(), "Home");

        form.focused_field = FormField::Hidden;
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(form.hidden);
    }

    #[test]
    fn empty_name_blocks_credential() {
        let form = Form::default();
        assert_eq!(form.credential(), Err(CredentialError::EmptySsid));
    }
}
