use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::{App, FocusedBlock};

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = app.theme.palette();

    frame.render_widget(
        Block::new().style(Style::default().bg(palette.bg).fg(palette.fg)),
        frame.area(),
    );

    match app.focused_block {
        FocusedBlock::Form => app.form.render(frame, &palette),
        FocusedBlock::Share => {
            if let Some(share) = &app.share {
                share.render(frame, app.theme, &app.config);
            }
        }
    }

    for (index, notification) in app.notifications.iter().enumerate() {
        notification.render(index, frame);
    }
}
