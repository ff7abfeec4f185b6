use super::app_logic::TuiApp;
use super::app_state::{View, entry_label};
use crate::client::TreeStoreClient;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const BROWSER_HELP: &str = "Arrows/jk: Nav | Enter/l: Open | Backspace/h: Up | r: Refresh | q/Esc: Quit";
const FILE_HELP: &str = "Arrows/jk/PgUp/PgDn: Scroll | r: Reload | Esc/b: Back | q: Quit";

fn draw_footer<C>(f: &mut Frame, app: &TuiApp<C>, help: &str, area: Rect) {
    let line = match &app.status {
        Some(status) => Line::from(status.as_str()).style(Style::default().fg(Color::Yellow)),
        None => Line::from(help).style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_details_block<C: TreeStoreClient>(f: &mut Frame, app: &TuiApp<C>, area: Rect) {
    let lines = match app.selected_node() {
        Some(node) if !node.is_dir() => vec![
            Line::from(format!("mtime: {} crtime: {}", node.mtime, node.crtime)),
            Line::from(format!("mime: {}", node.mime)),
        ],
        _ => vec![Line::from(""), Line::from("")],
    };
    let details = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(details, area);
}

fn draw_browser<C: TreeStoreClient>(f: &mut Frame, app: &mut TuiApp<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(f.area());

    let list_items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| ListItem::new(entry_label(entry)))
        .collect();

    let list_widget = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title.as_str()),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");
    f.render_stateful_widget(list_widget, chunks[0], &mut app.list_state);

    draw_details_block(f, app, chunks[1]);
    draw_footer(f, app, BROWSER_HELP, chunks[2]);
}

fn draw_file<C>(f: &mut Frame, app: &mut TuiApp<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    app.file_viewport_height = chunks[0].height.saturating_sub(2) as usize;

    let start = app.file_scroll.min(app.file_lines.len());
    let end = (start + app.file_viewport_height).min(app.file_lines.len());
    let text: Vec<Line> = app.file_lines[start..end]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    let content = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.title.as_str()),
    );
    f.render_widget(content, chunks[0]);

    draw_footer(f, app, FILE_HELP, chunks[1]);
}

pub(super) fn ui_frame<C: TreeStoreClient>(frame: &mut Frame, app: &mut TuiApp<C>) {
    match app.view {
        View::Browser => draw_browser(frame, app),
        View::File => draw_file(frame, app),
    }
}
