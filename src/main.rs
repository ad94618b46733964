mod app;
mod catalog;
mod config;
mod error;
mod event;
mod github;
#[cfg(test)]
mod test_utils;
mod ui;

use app::{App, FetchRequest};
use clap::Parser;
use config::Config;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::PinakesError;
use event::AppEvent;
use futures::StreamExt;
use github::client::GitHubClient;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "pinakes",
    about = "TUI catalog browser for a GitHub organization's repositories"
)]
struct Cli {
    #[arg(long, short, help = "GitHub organization to browse")]
    org: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.org);
    if config.org.trim().is_empty() {
        return Err(PinakesError::Config("organization name is empty".to_string()).into());
    }

    let client = match GitHubClient::new(config.github_token.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(config);

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    if let Some(request) = app.start() {
        dispatch(request, &client, &app.config, &tx);
    }

    loop {
        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        if let Some(request) = app.handle_event(first) {
            dispatch(request, &client, &app.config, &tx);
        }
        while let Ok(pending) = rx.try_recv() {
            if let Some(request) = app.handle_event(pending) {
                dispatch(request, &client, &app.config, &tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// One spawned task per request; the completion comes back through the event
/// channel keyed the same way the request was.
fn dispatch(
    request: FetchRequest,
    client: &GitHubClient,
    config: &Config,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let client = client.clone();
    let tx = tx.clone();
    match request {
        FetchRequest::Page(page) => {
            let org = config.org.clone();
            let per_page = config.per_page.clamp(1, 100) as u8;
            tokio::spawn(async move {
                let result = client.fetch_repo_page(&org, page, per_page).await;
                let rate_limit = client.rate_limit().await;
                let _ = tx.send(AppEvent::PageLoaded {
                    page,
                    result,
                    rate_limit,
                });
            });
        }
        FetchRequest::Files { repo, branch } => {
            tokio::spawn(async move {
                let result = client.fetch_root_files(&repo, &branch).await;
                let _ = tx.send(AppEvent::FilesLoaded { repo, result });
            });
        }
    }
}
