// TUI module for rendering the terminal interface
pub mod colors;
pub mod input;

// Re-exports
pub use colors::*;
pub use input::{handle_key_event, handle_prompt_input, Action, PromptAction};

use crate::app::{App, PromptTarget};
use crate::catalog::{Catalog, SortColumn};
use crate::grouping::DestinationSlot;
use image::DynamicImage;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

/// Letters shown next to each destination slot, matching the key map
const SLOT_LABELS: [char; 4] = ['z', 'x', 'c', 'v'];

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main triage view
    Browsing,
    /// Folder path prompt overlay visible
    Prompt(FolderPrompt),
}

/// State of the folder path prompt overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPrompt {
    pub target: PromptTarget,
    pub input: String,
}

impl FolderPrompt {
    pub fn new(target: PromptTarget, initial: String) -> Self {
        Self {
            target,
            input: initial,
        }
    }
}

/// Renders the whole triage view
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Catalog + image
            Constraint::Length(3), // Footer / status
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(content[0]);

    render_catalog(frame, left[0], app.catalog.as_ref());
    render_slots(frame, left[1], app.panel.slots());
    render_image_pane(frame, content[1], app);
    render_footer(frame, chunks[2], app.status.as_deref());
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let folder_info = match app.catalog.as_ref() {
        Some(catalog) => format!(
            " {}  ({} images)",
            catalog.folder().display(),
            catalog.len()
        ),
        None => " press space to open a folder".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.config.viewer.title),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(folder_info, Style::default().fg(TEXT_SECONDARY)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(header, area);
}

/// Renders the sortable catalog table with the selected row highlighted
fn render_catalog(frame: &mut Frame, area: Rect, catalog: Option<&Catalog>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" Images ");

    let Some(catalog) = catalog else {
        let empty = Paragraph::new("no folder open")
            .style(Style::default().fg(TEXT_SECONDARY))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let columns = [
        ("Name", SortColumn::Name),
        ("Size", SortColumn::Dimensions),
        ("Ratio", SortColumn::AspectRatio),
        ("Ext", SortColumn::Extension),
        ("Created", SortColumn::CreatedAt),
    ];
    let header_cells = columns.iter().enumerate().map(|(i, (title, column))| {
        let marker = match catalog.sort_state() {
            Some((current, false)) if current == *column => " ▲",
            Some((current, true)) if current == *column => " ▼",
            _ => "",
        };
        Cell::from(format!("[{}] {}{}", i + 1, title, marker)).style(
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
    });

    let rows = catalog.entries().iter().map(|entry| {
        Row::new(vec![
            Cell::from(entry.name.clone()),
            Cell::from(entry.dimensions_display()),
            Cell::from(entry.ratio_display()),
            Cell::from(entry.extension.clone()),
            Cell::from(entry.created_display()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(17),
        ],
    )
    .header(Row::new(header_cells))
    .block(block)
    .style(Style::default().fg(TEXT_PRIMARY))
    .highlight_style(
        Style::default()
            .bg(ROW_SELECTED)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    state.select(catalog.selected_index());
    frame.render_stateful_widget(table, area, &mut state);
}

/// Renders the four destination slots with their shortcut letters
fn render_slots(frame: &mut Frame, area: Rect, slots: &[DestinationSlot]) {
    let constraints = vec![Constraint::Ratio(1, slots.len().max(1) as u32); slots.len()];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, slot) in slots.iter().enumerate() {
        let label = SLOT_LABELS.get(i).copied().unwrap_or('?');
        let (name, style) = if slot.is_set() {
            (slot.display_name(), Style::default().fg(TEXT_PRIMARY))
        } else {
            ("(unset)".to_string(), Style::default().fg(TEXT_SECONDARY))
        };

        let content = Paragraph::new(Span::styled(name, style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(BORDER_COLOR))
                    .title(format!(" {label} ")),
            );
        frame.render_widget(content, chunks[i]);
    }
}

/// Renders the selected image scaled into the right-hand pane
fn render_image_pane(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = match app.catalog.as_ref().and_then(|c| c.selected()) {
        Some(entry) => format!(
            " {} · {} · {:?} ",
            entry.name,
            entry.dimensions_display(),
            app.display.zoom()
        ),
        None => " Preview ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two pixels per terminal row with half-block rendering
    let pane = (inner.width as u32, inner.height as u32 * 2);
    let lines = match app.display.render(pane) {
        Some(image) => image_to_halfblock_lines(image),
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "nothing to show",
                Style::default().fg(TEXT_SECONDARY),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Converts an already pane-sized image into lines of upper-half-block
/// characters: foreground colors the upper pixel, background the lower one,
/// giving two pixels per terminal cell.
fn image_to_halfblock_lines(image: &DynamicImage) -> Vec<Line<'static>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let term_rows = height.div_ceil(2);

    let mut lines = Vec::with_capacity(term_rows as usize);
    for row in 0..term_rows {
        let upper_y = row * 2;
        let lower_y = upper_y + 1;

        let mut spans = Vec::with_capacity(width as usize);
        for x in 0..width {
            let upper = rgb.get_pixel(x, upper_y);
            // Odd image height: repeat the upper pixel in the last row
            let lower = if lower_y < height {
                rgb.get_pixel(x, lower_y)
            } else {
                upper
            };
            let style = Style::default()
                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                .bg(Color::Rgb(lower[0], lower[1], lower[2]));
            spans.push(Span::styled("▀", style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn render_footer(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let line = match status {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(ACCENT_WARN),
        )),
        None => Line::from(Span::styled(
            " ↑/↓ navigate · z x c v move · Z X C V assign · space open folder · 1-5 sort · o zoom · esc quit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(footer, area);
}

/// Renders the folder path prompt over the triage view
pub fn render_prompt_overlay(frame: &mut Frame, prompt: &FolderPrompt) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let title = match prompt.target {
        PromptTarget::SourceFolder => " Open folder ".to_string(),
        PromptTarget::Slot(index) => format!(
            " Assign slot {} ({}) ",
            index + 1,
            SLOT_LABELS.get(index).copied().unwrap_or('?')
        ),
    };

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  path: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(prompt.input.clone(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("▏", Style::default().fg(ACCENT_HIGHLIGHT)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to accept · Esc to cancel",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, inner);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
