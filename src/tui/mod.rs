mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

// The main function to run the TUI
pub use self::run_tui::run_tui;

// Terminal setup/teardown and the draw/event loop
mod run_tui {
    use super::app_logic::TuiApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::client::TreeStoreClient;
    use crate::navigation::NavigationController;
    use anyhow::Result;
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};
    use std::panic;
    use tracing::info;

    pub fn run_tui<C: TreeStoreClient>(client: C) -> Result<()> {
        let controller = NavigationController::new(client);
        info!(root = %controller.root_path(), "starting browser");
        let mut app = TuiApp::new(controller);

        install_panic_hook();
        let mut terminal = init_terminal()?;
        let outcome = run_loop(&mut terminal, &mut app);
        restore_terminal(terminal)?;
        let _ = panic::take_hook();
        outcome
    }

    fn run_loop<C: TreeStoreClient>(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: &mut TuiApp<C>,
    ) -> Result<()> {
        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, app))?;
            handle_events(app)?;
        }
        Ok(())
    }

    // Leave raw mode and the alternate screen before the default hook prints the panic.
    fn install_panic_hook() {
        chain_panic_hook(|| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        });
    }

    fn chain_panic_hook(restore: impl Fn() + Send + Sync + 'static) {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore();
            previous_hook(info);
        }));
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor().map_err(Into::into)
    }

}
