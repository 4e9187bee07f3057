use std::{io, sync::Arc};

use anyhow::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use wifiqr::{
    app::App,
    cli,
    command::Os,
    config::Config,
    event::{Event, EventHandler},
    handler::handle_key_events,
    headless::{self, Options},
    theme::Theme,
    tui::Tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args = cli::cli().get_matches();
    let options = Options::from_matches(&args)?;

    let config = Arc::new(Config::new(options.config_path.as_deref())?);

    if options.is_headless() {
        let stdout = io::stdout();
        return headless::run(&options, &config, Os::detect(), &mut stdout.lock());
    }

    let mut app = App::new(config.clone(), &options.values, Theme::state_path());

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(1_000);
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    let result = run(&mut tui, &mut app, &options).await;

    tui.exit()?;
    result
}

async fn run(tui: &mut Tui, app: &mut App, options: &Options) -> Result<()> {
    app.start(&options.values, options.auto_render, &tui.events.sender)?;

    while app.running {
        tui.draw(app)?;
        match tui.events.next().await? {
            Event::Tick => app.tick(),
            Event::Key(key_event) => handle_key_events(key_event, app, tui.events.sender.clone())?,
            Event::Notification(notification) => {
                app.notifications.push(notification);
            }
            Event::Resize(_, _) => {}
        }
    }

    Ok(())
}
