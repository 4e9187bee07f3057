use anyhow::Result;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    clipboard,
    command::Os,
    config::Config,
    event::Event,
    export::{self, ExportFormat},
    form::Form,
    notification::{Notification, NotificationLevel},
    query::QueryParams,
    share::Share,
    theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusedBlock {
    Form,
    Share,
}

pub struct App {
    pub running: bool,
    pub focused_block: FocusedBlock,
    pub notifications: Vec<Notification>,
    pub config: Arc<Config>,
    pub form: Form,
    pub share: Option<Share>,
    pub theme: Theme,
    pub theme_path: Option<PathBuf>,
    pub os: Os,
}

impl App {
    pub fn new(config: Arc<Config>, values: &QueryParams, theme_path: Option<PathBuf>) -> Self {
        let theme = Theme::load(theme_path.as_deref());

        Self {
            running: true,
            focused_block: FocusedBlock::Form,
            notifications: Vec::new(),
            config,
            form: Form::new(values),
            share: None,
            theme,
            theme_path,
            os: Os::detect(),
        }
    }

    /// Startup hook for the values passed on the command line. A security
    /// type the form can not represent is reported and blocks auto render.
    pub fn start(
        &mut self,
        values: &QueryParams,
        auto_render: bool,
        sender: &UnboundedSender<Event>,
    ) -> Result<()> {
        if let Err(e) = values.security() {
            Notification::send(
                format!("{}, pick one in the form", e),
                NotificationLevel::Warning,
                sender,
            )?;
            return Ok(());
        }

        if auto_render {
            self.generate(sender)?;
        }

        Ok(())
    }

    /// Build the code from the form. An empty network name is reported and
    /// nothing is rendered.
    pub fn generate(&mut self, sender: &UnboundedSender<Event>) -> Result<()> {
        let credential = match self.form.credential() {
            Ok(c) => c,
            Err(e) => {
                Notification::send(e.to_string(), NotificationLevel::Error, sender)?;
                return Ok(());
            }
        };

        match Share::new(credential, self.config.qr.error_correction, self.os) {
            Ok(share) => {
                self.share = Some(share);
                self.focused_block = FocusedBlock::Share;
            }
            Err(e) => {
                Notification::send(e.to_string(), NotificationLevel::Error, sender)?;
            }
        }

        Ok(())
    }

    pub fn close_share(&mut self) {
        self.share = None;
        self.focused_block = FocusedBlock::Form;
    }

    pub fn export(&self, format: ExportFormat, sender: &UnboundedSender<Event>) -> Result<()> {
        let Some(share) = &self.share else {
            Notification::send(
                "Generate a code before exporting".to_string(),
                NotificationLevel::Warning,
                sender,
            )?;
            return Ok(());
        };

        match export::export(&share.code, &share.credential, format, None, &self.config) {
            Ok(path) => Notification::send(
                format!("Saved {}", path.display()),
                NotificationLevel::Info,
                sender,
            )?,
            Err(e) => Notification::send(
                format!("Export failed: {:#}", e),
                NotificationLevel::Error,
                sender,
            )?,
        }

        Ok(())
    }

    pub fn copy_payload(&self, sender: &UnboundedSender<Event>) -> Result<()> {
        if let Some(share) = &self.share {
            copy(&share.code.payload, "WiFi code", sender)?;
        }
        Ok(())
    }

    pub fn copy_command(&self, sender: &UnboundedSender<Event>) -> Result<()> {
        match self.share.as_ref().and_then(|s| s.command.as_deref()) {
            Some(command) => copy(command, "Command", sender)?,
            None => Notification::send(
                format!("No join command available on {}", self.os),
                NotificationLevel::Warning,
                sender,
            )?,
        }
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Some(path) = &self.theme_path
            && let Err(e) = self.theme.save(path)
        {
            log::warn!("Failed to save theme: {:#}", e);
        }
    }

    pub fn tick(&mut self) {
        self.notifications.retain(|n| n.ttl > 0);
        self.notifications.iter_mut().for_each(|n| n.ttl -= 1);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn copy(text: &str, what: &str, sender: &UnboundedSender<Event>) -> Result<()> {
    match clipboard::copy(text) {
        Ok(()) => Notification::send(
            format!("{} copied to clipboard", what),
            NotificationLevel::Info,
            sender,
        ),
        Err(e) => Notification::send(format!("{:#}", e), NotificationLevel::Warning, sender),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn app(query: &str) -> App {
        App::new(
            Arc::new(Config::default()),
            &QueryParams::parse(query),
            None,
        )
    }

    #[test]
    fn empty_name_sends_error_and_stays_on_form() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app("");

        app.generate(&tx).unwrap();

        assert!(app.share.is_none());
        assert_eq!(app.focused_block, FocusedBlock::Form);
        match rx.try_recv() {
            Ok(Event::Notification(n)) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert_eq!(n.message, "Network name can not be empty");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn generate_shows_share() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app("ssid=HomeNet&password=secret1");

        app.generate(&tx).unwrap();

        assert_eq!(app.focused_block, FocusedBlock::Share);
        let share = app.share.as_ref().unwrap();
        assert_eq!(share.code.payload, "WIFI:T:WPA;S:HomeNet;P:secret1;H:false;;");

        app.close_share();
        assert!(app.share.is_none());
        assert_eq!(app.focused_block, FocusedBlock::Form);
    }

    #[test]
    fn start_renders_complete_url() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let values = QueryParams::parse("security=WEP&ssid=Attic&password=abcde");
        let mut app = App::new(Arc::new(Config::default()), &values, None);

        app.start(&values, values.should_auto_render(), &tx).unwrap();

        assert_eq!(app.focused_block, FocusedBlock::Share);
        assert_eq!(
            app.share.as_ref().unwrap().code.payload,
            "WIFI:T:WEP;S:Attic;P:abcde;H:false;;"
        );
    }

    #[test]
    fn start_with_unknown_security_warns_and_stays_on_form() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let values = QueryParams::parse("security=WPA2-EAP&ssid=Home&password=secret1");
        let mut app = App::new(Arc::new(Config::default()), &values, None);

        app.start(&values, values.should_auto_render(), &tx).unwrap();

        assert!(app.share.is_none());
        assert_eq!(app.focused_block, FocusedBlock::Form);
        match rx.try_recv() {
            Ok(Event::Notification(n)) => {
                assert_eq!(n.level, NotificationLevel::Warning);
                assert!(n.message.contains("WPA2-EAP"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn export_without_code_only_warns() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let app = app("");

        app.export(ExportFormat::Png, &tx).unwrap();

        match rx.try_recv() {
            Ok(Event::Notification(n)) => assert_eq!(n.level, NotificationLevel::Warning),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn notifications_expire() {
        let mut app = app("");
        app.notifications.push(Notification {
            message: "hi".into(),
            level: NotificationLevel::Info,
            ttl: 1,
        });
        app.tick();
        assert_eq!(app.notifications.len(), 1);
        app.tick();
        assert!(app.notifications.is_empty());
    }
}
