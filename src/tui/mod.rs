pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::search::{self, SearchCompletion, SearchRequest};

use self::app::{Focus, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs searches off the UI loop and hands completions back to it.
struct Searcher {
    ctx: Arc<AppContext>,
    tx: UnboundedSender<SearchCompletion>,
}

impl Searcher {
    fn new(ctx: Arc<AppContext>) -> (Self, UnboundedReceiver<SearchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { ctx, tx }, rx)
    }

    fn spawn(&self, request: Option<SearchRequest>) {
        let Some(request) = request else {
            return;
        };
        let client = self.ctx.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion = search::execute(client.as_ref(), request).await;
            // The receiver is gone once the UI has quit.
            let _ = tx.send(completion);
        });
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = ctx.config.clone();
    let mut tui_app = TuiApp::new(ctx.session());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (searcher, mut completions) = Searcher::new(ctx);

    searcher.spawn(tui_app.session.initial_request());

    loop {
        while let Ok(completion) = completions.try_recv() {
            if tui_app.session.complete(completion) {
                tui_app.clamp_selection();
            }
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        if let AppEvent::Key(key) = event_handler.next()? {
            tui_app.clear_status();
            let action = match tui_app.focus {
                Focus::Input => config.keybindings.get_input_action(&key),
                Focus::List => config.keybindings.get_action(&key),
            };
            handle_action(&mut tui_app, &searcher, action, &key);
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(tui_app: &mut TuiApp, searcher: &Searcher, action: Action, key: &KeyEvent) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::ToggleFocus => tui_app.toggle_focus(),
        Action::Submit => {
            if tui_app.session.policy().has_submit() {
                searcher.spawn(tui_app.session.submit());
            } else if tui_app.focus == Focus::Input {
                tui_app.focus = Focus::List;
            }
        }
        Action::Dismiss => {
            if let Some((_, title)) = tui_app.dismiss_selected() {
                tui_app.set_status(format!("Dismissed: {}", title));
            }
        }
        Action::OpenInBrowser => {
            let url = tui_app.selected_story().and_then(|s| s.url.clone());
            match url {
                Some(url) => {
                    if let Err(e) = open::that(&url) {
                        tui_app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
                None => tui_app.set_status("Story has no link".to_string()),
            }
        }
        Action::None => {
            if tui_app.focus == Focus::Input {
                edit_term(tui_app, searcher, key);
            }
        }
    }
}

fn edit_term(tui_app: &mut TuiApp, searcher: &Searcher, key: &KeyEvent) {
    let request = match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            tui_app.session.push_char(c)
        }
        KeyCode::Backspace => tui_app.session.pop_char(),
        _ => return,
    };
    searcher.spawn(request);
    tui_app.clamp_selection();
}
