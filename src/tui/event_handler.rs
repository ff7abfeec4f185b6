use super::app_logic::TuiApp;
use super::app_state::View;
use crate::client::TreeStoreClient;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

pub(super) fn handle_events<C: TreeStoreClient>(app: &mut TuiApp<C>) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                match app.view {
                    View::Browser => app.handle_browser_input(key_event),
                    View::File => app.handle_file_input(key_event),
                }
            }
        }
    }
    Ok(())
}
