// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use itemdesk_core::ItemBackend;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

pub async fn run_tui<B: ItemBackend>(mut app: App<B>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial fetch; a failure just lands in the status bar
    let result = match reload(&mut terminal, &mut app).await {
        Ok(()) => event_loop(&mut terminal, &mut app).await,
        Err(e) => Err(e),
    };

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Paint the loading frame, then wait for the fetch
async fn reload<T: Backend, B: ItemBackend>(
    terminal: &mut Terminal<T>,
    app: &mut App<B>,
) -> anyhow::Result<()> {
    app.start_loading();
    terminal.draw(|f| crate::ui::render(f, app))?;
    app.reload().await;
    Ok(())
}

async fn event_loop<B: ItemBackend>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<B>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::EditingName | InputMode::EditingCategory => match key.code {
                KeyCode::Enter => app.submit_form().await,
                KeyCode::Tab | KeyCode::BackTab => app.toggle_form_field(),
                KeyCode::Esc => app.cancel_form(),
                KeyCode::Char(c) => app.push_char(c),
                KeyCode::Backspace => app.pop_char(),
                _ => {}
            },
            InputMode::Filtering => match key.code {
                KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
                KeyCode::Char(c) => app.push_char(c),
                KeyCode::Backspace => app.pop_char(),
                _ => {}
            },
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending_delete().await,
                _ => app.cancel_pending_delete(),
            },
            InputMode::Normal => {
                app.clear_messages();
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('a') => app.start_create(),
                    KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
                    KeyCode::Char('d') | KeyCode::Delete => app.request_delete().await,
                    KeyCode::Char('/') => app.enter_filter_mode(),
                    KeyCode::Char('r') => reload(terminal, app).await?,
                    KeyCode::Char('j') | KeyCode::Down => app.next_item(),
                    KeyCode::Char('k') | KeyCode::Up => app.previous_item(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
