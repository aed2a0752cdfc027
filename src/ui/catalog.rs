//! Product catalog with live search

use super::render_scrollable_list;
use crate::app::App;
use crate::state::CatalogFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the catalog view: search bar on top, products and details below
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_search_bar(frame, chunks[0], app);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_product_list(frame, h_chunks[0], app);
    draw_product_detail(frame, h_chunks[1], app);
}

fn draw_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.catalog_focus == CatalogFocus::Search;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(Color::DarkGray))];
    if app.state.search_query.is_empty() && !is_focused {
        spans.push(Span::styled(
            "Search products...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(app.state.search_query.as_str()));
    }
    if is_focused {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search, area);
}

fn draw_product_list(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.catalog_focus == CatalogFocus::List;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(
            " Products ({}/{}) ",
            app.state.visible_products.len(),
            app.state.products.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.state.visible_products.is_empty() {
        let message = if app.state.show_no_results() {
            "No results found.\nPress Ctrl+N to request it."
        } else {
            "No products available."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .visible()
        .enumerate()
        .map(|(idx, product)| {
            let is_selected = is_focused && idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(product.name.as_str(), style.add_modifier(Modifier::BOLD)),
            ];
            if !product.category.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", product.category),
                    Style::default().fg(Color::Magenta),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}

fn draw_product_detail(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(product) = app.state.selected_product() else {
        let content = Paragraph::new("Select a product to see its details.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            product.name.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if !product.category.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::raw(product.category.as_str()),
        ]));
        lines.push(Line::from(""));
    }
    if !product.description.is_empty() {
        lines.push(Line::from(product.description.as_str()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" order this product", Style::default().fg(Color::DarkGray)),
    ]));

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(content, area);
}
