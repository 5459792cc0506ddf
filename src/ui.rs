#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::components::GameState;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &mut App) {
    // Each cell is 2 characters wide and 1 tall; +2 for borders
    let cell_width = 2u16;
    let board_width = BOARD_WIDTH as u16 * cell_width + 2;
    let board_height = BOARD_HEIGHT as u16 + 2;
    let min_info_width = 20u16;

    // Check if the terminal is too small to render the game properly
    if f.area().width < board_width + min_info_width || f.area().height < board_height + 3 {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Blockdrop"));

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),              // Spacing below
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Stats
            Constraint::Min(5),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("BLOCKDROP")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let game_state = app.world.resource::<GameState>();
    let stats = format!(
        "Score: {}\nRows: {}\nGames lost: {}",
        game_state.score, game_state.rows_cleared, game_state.games_lost,
    );
    let status = if game_state.game_over {
        Paragraph::new(format!("{stats}\n\nGAME OVER!"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
    } else {
        Paragraph::new(stats).wrap(Wrap { trim: true })
    };
    f.render_widget(status, info_layout[1]);

    let keys = crate::config::CONFIG.read().unwrap().keys.clone();
    let controls = Paragraph::new(format!(
        "Controls:\n\
        {}/{}: Move left/right\n\
        {}: Soft drop\n\
        {}: Rotate\n\
        {}: Quit\n",
        keys.move_left, keys.move_right, keys.soft_drop, keys.rotate, keys.quit,
    ))
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2u16;
    let inner_area = Block::default().borders(Borders::ALL).inner(area);

    f.render_widget(Block::default().borders(Borders::ALL), area);

    // Row 0 is the top of the grid, matching screen rows directly.
    for (position, kind) in app.get_render_blocks() {
        if position.x < 0 || position.y < 0 {
            continue;
        }
        let x = position.x as u16;
        let y = position.y as u16;

        if x < BOARD_WIDTH as u16 && y < BOARD_HEIGHT as u16 {
            let block_x = inner_area.left() + x * cell_width;
            let block_y = inner_area.top() + y;

            if block_x + 1 < inner_area.right() && block_y < inner_area.bottom() {
                let color = kind.color();

                for dx in 0..cell_width {
                    if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
                        cell.set_symbol("█");
                        cell.set_fg(color);
                        cell.set_bg(Color::Black);
                    }
                }
            }
        }
    }

    // Flash "GAME OVER" over the board while the banner timer runs
    let game_state = app.world.resource::<GameState>();
    if game_state.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x + (inner_area.width / 2).saturating_sub(5),
            y: inner_area.y + inner_area.height / 2,
            width: 10,
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
