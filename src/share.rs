use anyhow::Result;
use std::cmp;
use tui_qrcode::QrCodeWidget;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear},
};

use crate::{
    command::{Os, join_command},
    config::Config,
    credential::NetworkCredential,
    qr::{ErrorCorrection, WifiCode},
    theme::Theme,
};

/// A generated join code ready to be shown or exported
#[derive(Clone)]
pub struct Share {
    pub code: WifiCode,
    pub credential: NetworkCredential,
    pub command: Option<String>,
}

impl Share {
    pub fn new(credential: NetworkCredential, level: ErrorCorrection, os: Os) -> Result<Self> {
        let code = WifiCode::new(&credential, level)?;
        let command = join_command(&credential, os);

        Ok(Self {
            code,
            credential,
            command,
        })
    }

    pub fn render(&self, frame: &mut Frame, theme: Theme, config: &Config) {
        let palette = theme.palette();
        let widget = QrCodeWidget::new(self.code.code.clone()).colors(theme.qr_colors());
        let sim_area = Rect::new(0, 0, 50, 50);
        let size = widget.size(sim_area);

        let passphrase = self.credential.password();
        let command = self.command.as_deref().unwrap_or_default();

        let block_width = cmp::max(
            size.width as usize,
            cmp::max(passphrase.chars().count() + 12, command.chars().count() + 2),
        ) + 6;
        let block_width = cmp::min(block_width, frame.area().width as usize);

        let block = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(size.height + 16),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(frame.area())[1];

        let block = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(block_width as u16),
                Constraint::Fill(1),
            ])
            .flex(Flex::SpaceBetween)
            .split(block)[1];

        let (title_block, mut qr_block, details_block, hints_block) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Fill(1),
                    Constraint::Length(5),
                    Constraint::Length(1),
                ])
                .margin(2)
                .flex(Flex::SpaceBetween)
                .split(block);

            (chunks[0], chunks[1], chunks[2], chunks[3])
        };

        frame.render_widget(Clear, block);
        frame.render_widget(
            Block::new()
                .borders(Borders::all())
                .border_type(BorderType::Thick)
                .style(Style::new().bg(palette.bg).fg(palette.fg))
                .border_style(Style::new().fg(palette.accent)),
            block,
        );

        let mut title = vec![Line::from(self.credential.ssid.clone()).centered().bold()];
        if self.credential.hidden {
            title.push(Line::from("hidden network").centered().dim());
        }
        frame.render_widget(Text::from(title), title_block);

        if (size.width as usize) < block_width {
            qr_block = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(size.width),
                    Constraint::Fill(1),
                ])
                .flex(Flex::SpaceBetween)
                .split(qr_block)[1];
        }

        frame.render_widget(widget, qr_block);

        let mut details = vec![
            Line::from(""),
            Line::from(vec![
                Span::from("Security: "),
                Span::from(self.credential.security.to_string()).bold(),
            ])
            .centered(),
        ];
        if self.credential.password.is_some() {
            details.push(
                Line::from(vec![
                    Span::from("Passphrase: "),
                    Span::from(passphrase).bold().bg(palette.field),
                ])
                .centered(),
            );
        }
        if !command.is_empty() {
            details.push(Line::from(""));
            details.push(Line::from(Span::from(command).fg(palette.dim)).centered());
        }
        frame.render_widget(Text::from(details), details_block);

        let keys = &config.keys;
        let hints = Line::from(vec![
            Span::from(keys.export_png.to_string()).bold(),
            Span::from(" PNG  "),
            Span::from(keys.export_svg.to_string()).bold(),
            Span::from(" SVG  "),
            Span::from(keys.export_pdf.to_string()).bold(),
            Span::from(" PDF  "),
            Span::from(keys.copy_payload.to_string()).bold(),
            Span::from(" Copy code  "),
            Span::from(keys.copy_command.to_string()).bold(),
            Span::from(" Copy command  "),
            Span::from("Esc").bold(),
            Span::from(" Back"),
        ])
        .centered()
        .dim();
        frame.render_widget(hints, hints_block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Security;

    #[test]
    fn carries_payload_and_command() {
        let cred =
            NetworkCredential::new(Security::Wpa, "HomeNet", Some("secret1".into()), false)
                .unwrap();
        let share = Share::new(cred, ErrorCorrection::Medium, Os::Linux).unwrap();

        assert_eq!(
            share.code.payload,
            "WIFI:T:WPA;S:HomeNet;P:secret1;H:false;;"
        );
        assert_eq!(
            share.command.as_deref(),
            Some("nmcli device wifi connect 'HomeNet' password 'secret1'")
        );
    }
}
