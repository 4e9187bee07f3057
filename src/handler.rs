use anyhow::Result;

use crate::app::{App, FocusedBlock};
use crate::event::Event;
use crate::export::ExportFormat;
use crate::form::FormField;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

pub fn handle_key_events(
    key_event: KeyEvent,
    app: &mut App,
    sender: UnboundedSender<Event>,
) -> Result<()> {
    let keys = app.config.keys.clone();

    // Global shortcuts
    match key_event.code {
        KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char(c)
            if c == keys.toggle_theme && key_event.modifiers == KeyModifiers::CONTROL =>
        {
            app.toggle_theme();
            return Ok(());
        }
        _ => {}
    }

    match app.focused_block {
        FocusedBlock::Form => match key_event.code {
            KeyCode::Esc if app.config.esc_quit => {
                app.quit();
            }
            KeyCode::Enter => {
                app.generate(&sender)?;
            }
            KeyCode::Char('q')
                if matches!(
                    app.form.focused_field,
                    FormField::Security | FormField::Hidden
                ) =>
            {
                app.quit();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.form.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.form.prev_field();
            }
            KeyCode::Char(c)
                if c == keys.toggle_password && key_event.modifiers == KeyModifiers::CONTROL =>
            {
                app.form.show_password = !app.form.show_password;
            }
            _ => {
                app.form.handle_key(key_event);
            }
        },

        FocusedBlock::Share => match key_event.code {
            KeyCode::Esc => {
                app.close_share();
            }
            KeyCode::Char('q') => {
                app.quit();
            }
            KeyCode::Char(c) if c == keys.export_png => {
                app.export(ExportFormat::Png, &sender)?;
            }
            KeyCode::Char(c) if c == keys.export_svg => {
                app.export(ExportFormat::Svg, &sender)?;
            }
            KeyCode::Char(c) if c == keys.export_pdf => {
                app.export(ExportFormat::Pdf, &sender)?;
            }
            KeyCode::Char(c) if c == keys.copy_payload => {
                app.copy_payload(&sender)?;
            }
            KeyCode::Char(c) if c == keys.copy_command => {
                app.copy_command(&sender)?;
            }
            KeyCode::Char(c) if c == keys.toggle_theme => {
                app.toggle_theme();
            }
            _ => {}
        },
    }

    Ok(())
}
