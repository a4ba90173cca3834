// UI rendering logic
use crate::{App, InputMode};
use itemdesk_core::ItemBackend;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render<B: ItemBackend>(frame: &mut Frame, app: &mut App<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Form
            Constraint::Length(3), // Filter
            Constraint::Min(3),    // Grouped list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_filter(frame, app, chunks[2]);
    render_groups(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn render_header<B: ItemBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let count = app.store.items().len();
    let line = Line::from(vec![
        Span::styled(
            " Item Management ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} items", count),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn field_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_form<B: ItemBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let draft = app.store.draft();
    let name_active = app.input_mode == InputMode::EditingName;
    let category_active = app.input_mode == InputMode::EditingCategory;

    let title = if app.store.is_editing() { " Update " } else { " Add " };
    let focused = name_active || category_active;

    let line = Line::from(vec![
        Span::styled("Name: ", Style::default().fg(Color::DarkGray)),
        Span::styled(draft.name.as_str(), field_style(name_active)),
        Span::styled(if name_active { "█" } else { "" }, field_style(true)),
        Span::raw("   "),
        Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
        Span::styled(draft.category.as_str(), field_style(category_active)),
        Span::styled(if category_active { "█" } else { "" }, field_style(true)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(field_style(focused));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_filter<B: ItemBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let active = app.input_mode == InputMode::Filtering;
    let filter = app.store.filter_text();

    let line = if filter.is_empty() && !active {
        Line::from(Span::styled(
            "Filter by category or name...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled(filter, field_style(active)),
            Span::styled(if active { "█" } else { "" }, field_style(true)),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter ")
        .border_style(field_style(active));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_groups<B: ItemBackend>(frame: &mut Frame, app: &mut App<B>, area: Rect) {
    if app.loading {
        let block = Block::default().borders(Borders::ALL).title(" Items (Loading...) ");
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    }

    // Headings aren't selectable, so track which list row the selection lands on
    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut position = 0;

    for group in app.store.visible_groups() {
        rows.push(ListItem::new(Line::from(Span::styled(
            group.category.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))));

        for item in group.items {
            let selected = position == app.selected_index;
            if selected {
                selected_row = Some(rows.len());
            }

            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            rows.push(ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::styled(item.name.clone(), name_style),
                Span::styled(format!("  #{}", item.id), Style::default().fg(Color::DarkGray)),
            ])));
            position += 1;
        }
    }

    let title = if rows.is_empty() {
        " Items (none) ".to_string()
    } else {
        format!(" Items ({}) ", position)
    };

    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("> ");

    app.list_state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar<B: ItemBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let status = if let Some(error) = &app.error_message {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(status.as_str(), Style::default().fg(Color::Green))
    } else {
        match app.input_mode {
            InputMode::EditingName | InputMode::EditingCategory => Span::styled(
                "FORM | TAB: switch field | ENTER: save | ESC: cancel",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Filtering => Span::styled(
                "FILTER | Type to filter | ENTER/ESC: done",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::ConfirmDelete => {
                let name = app
                    .pending_delete
                    .as_ref()
                    .map(|item| item.name.as_str())
                    .unwrap_or("");
                Span::styled(
                    format!("Delete \"{}\"? y/n", name),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            }
            InputMode::Normal => Span::raw(
                "j/k: navigate | a: add | e: edit | d: delete | /: filter | r: reload | q: quit",
            ),
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBackend;
    use itemdesk_core::{Item, ItemStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App<StubBackend>) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    async fn app_with(items: Vec<Item>) -> App<StubBackend> {
        let mut app = App::new(ItemStore::new(StubBackend::with_items(items)));
        app.reload().await;
        app
    }

    #[tokio::test]
    async fn test_loading_replaces_the_list() {
        let mut app = app_with(vec![Item::new(1, "Hammer", "Tools")]).await;
        app.start_loading();

        let lines = draw(&mut app);
        assert!(lines.iter().any(|l| l.contains("Items (Loading...)")));
        assert!(!lines.iter().any(|l| l.contains("Hammer")));
    }

    #[tokio::test]
    async fn test_selection_skips_heading_rows() {
        let mut app = app_with(vec![
            Item::new(1, "Hammer", "Tools"),
            Item::new(2, "Apple", "Food"),
            Item::new(3, "Wrench", "Tools"),
        ])
        .await;
        app.next_item();
        assert_eq!(app.selected_item().unwrap().name, "Wrench");

        let lines = draw(&mut app);

        // Tools heading, Hammer, Wrench
        assert_eq!(app.list_state.selected(), Some(2));
        let highlighted: Vec<&String> = lines.iter().filter(|l| l.contains("> ")).collect();
        assert_eq!(highlighted.len(), 1);
        assert!(highlighted[0].contains("Wrench"));
    }

    #[tokio::test]
    async fn test_groups_render_under_headings() {
        let mut app = app_with(vec![
            Item::new(1, "Hammer", "Tools"),
            Item::new(2, "Apple", "Food"),
        ])
        .await;

        let lines = draw(&mut app);
        let row_of = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
        assert!(row_of("Tools") < row_of("Hammer"));
        assert!(row_of("Hammer") < row_of("Food"));
        assert!(row_of("Food") < row_of("Apple"));
        assert!(lines.iter().any(|l| l.contains("Items (2)")));
    }
}
