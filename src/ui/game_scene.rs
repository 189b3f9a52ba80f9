//! Terminal renderer for the flappy shrimp scene.
//!
//! Primitives are kept in world units and rasterized into character cells on
//! every draw, so any terminal size works.

use crate::core::config::GameConfig;
use crate::core::geometry::Vec2;
use crate::host::{Banner, Hud, Primitive, Renderer};
use crate::obstacles::BarrierKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;

/// Columns between backdrop dots, in cells.
const BACKDROP_SPACING: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Backdrop,
    Body,
    Cap,
    /// Sprite body.
    Shell,
    /// Cell under the sprite centre, glyph picked from rotation.
    Head(char),
}

impl Cell {
    fn span(self) -> Span<'static> {
        match self {
            Cell::Empty => Span::raw(" "),
            Cell::Backdrop => Span::styled("·", Style::default().fg(Color::DarkGray)),
            Cell::Body => Span::styled("█", Style::default().fg(Color::Green)),
            Cell::Cap => Span::styled("▓", Style::default().fg(Color::LightGreen)),
            Cell::Shell => Span::styled("▒", Style::default().fg(Color::LightRed)),
            Cell::Head(c) => Span::styled(
                c.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

pub struct TerminalScene {
    world_width: f64,
    world_height: f64,
    backdrop_tile_width: f64,
    /// Unrotated sprite size in world units at scale 1.
    sprite_size: Vec2,
    primitives: HashMap<u32, Primitive>,
    next_handle: u32,
    hud: Hud,
}

impl TerminalScene {
    pub fn new(config: &GameConfig, sprite_size: Vec2) -> Self {
        Self {
            world_width: config.world_width,
            world_height: config.world_height,
            backdrop_tile_width: config.backdrop_tile_width,
            sprite_size,
            primitives: HashMap::new(),
            next_handle: 0,
            hud: Hud {
                score: 0,
                high_score: 0,
                banner: Some(Banner::GetReady),
                backdrop_offset: 0.0,
            },
        }
    }

    /// Map the world onto a `width` x `height` grid of cells, sampling each
    /// cell at its centre.
    pub fn rasterize(&self, width: usize, height: usize) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::Empty; width]; height];
        if width == 0 || height == 0 {
            return grid;
        }
        let cell_w = self.world_width / width as f64;
        let cell_h = self.world_height / height as f64;

        // Backdrop dots drift left by the scroll offset.
        let shift = if self.backdrop_tile_width > 0.0 {
            (self.hud.backdrop_offset / cell_w).round() as usize
        } else {
            0
        };
        for (row, cells) in grid.iter_mut().enumerate() {
            if row % 4 != 1 {
                continue;
            }
            for (col, cell) in cells.iter_mut().enumerate() {
                if (col + shift + row * 5) % BACKDROP_SPACING == 0 {
                    *cell = Cell::Backdrop;
                }
            }
        }

        let center_of = |col: usize, row: usize| {
            Vec2::new((col as f64 + 0.5) * cell_w, (row as f64 + 0.5) * cell_h)
        };

        for primitive in self.primitives.values() {
            if let Primitive::Barrier { rect, kind } = primitive {
                let cell = barrier_cell(*kind);
                for (row, cells) in grid.iter_mut().enumerate() {
                    for (col, slot) in cells.iter_mut().enumerate() {
                        if rect.contains(center_of(col, row)) {
                            *slot = cell;
                        }
                    }
                }
            }
        }

        // Player last so it draws over pipes it has crashed into.
        for primitive in self.primitives.values() {
            if let Primitive::Player {
                center,
                rotation_deg,
                scale,
            } = primitive
            {
                let half_w = self.sprite_size.x * scale * 0.5;
                let half_h = self.sprite_size.y * scale * 0.5;
                for (row, cells) in grid.iter_mut().enumerate() {
                    for (col, slot) in cells.iter_mut().enumerate() {
                        let p = center_of(col, row);
                        if (p.x - center.x).abs() < half_w && (p.y - center.y).abs() < half_h {
                            *slot = Cell::Shell;
                        }
                    }
                }
                let col = ((center.x / cell_w).floor().max(0.0) as usize).min(width - 1);
                let row = ((center.y / cell_h).floor().max(0.0) as usize).min(height - 1);
                grid[row][col] = Cell::Head(head_glyph(*rotation_deg));
            }
        }

        grid
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Flappy Shrimp ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(22)])
            .split(inner);
        let v_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(2)])
            .split(h_chunks[0]);

        self.render_play_area(frame, v_chunks[0]);
        self.render_status_bar(frame, v_chunks[1]);
        self.render_info_panel(frame, h_chunks[1]);
    }

    fn render_play_area(&self, frame: &mut Frame, area: Rect) {
        let grid = self.rasterize(area.width as usize, area.height as usize);
        let lines: Vec<Line> = grid
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Cell::span).collect::<Vec<_>>()))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if area.height < 1 {
            return;
        }
        let (text, color) = match self.hud.banner {
            Some(Banner::GetReady) => ("Press Space to start!".to_string(), Color::Yellow),
            Some(Banner::GameOver) => (
                format!("CRASH! {} points. Space to try again.", self.hud.score),
                Color::Red,
            ),
            Some(Banner::GoalReached) => (
                format!("Goal reached! Score: {}", self.hud.score),
                Color::LightGreen,
            ),
            None => (format!("Score: {}", self.hud.score), Color::Green),
        };
        let status = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(status, Rect { height: 1, ..area });

        if area.height >= 2 {
            let mut spans = Vec::new();
            for (i, (key, action)) in [("[Space/Up/Enter]", "Flap"), ("[R]", "Restart"), ("[Q]", "Quit")]
                .iter()
                .enumerate()
            {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(*key, Style::default().fg(Color::White)));
                spans.push(Span::styled(
                    format!(" {}", action),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
                Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                },
            );
        }
    }

    fn render_info_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Info ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width < 4 {
            return;
        }

        let label = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" Score: ", label),
                Span::styled(
                    self.hud.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Best:  ", label),
                Span::styled(
                    self.hud.high_score.to_string(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn head_glyph(rotation_deg: f64) -> char {
    if rotation_deg < -5.0 {
        '▲'
    } else if rotation_deg > 5.0 {
        '▼'
    } else {
        '►'
    }
}

impl Renderer for TerminalScene {
    type Handle = u32;

    fn spawn(&mut self, primitive: &Primitive) -> u32 {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        self.primitives.insert(handle, primitive.clone());
        handle
    }

    fn update(&mut self, handle: u32, primitive: &Primitive) {
        if let Some(slot) = self.primitives.get_mut(&handle) {
            *slot = primitive.clone();
        }
    }

    fn despawn(&mut self, handle: u32) {
        self.primitives.remove(&handle);
    }

    fn set_hud(&mut self, hud: &Hud) {
        self.hud = hud.clone();
    }
}

/// Upper and lower pieces share a look.
fn barrier_cell(kind: BarrierKind) -> Cell {
    if kind.is_cap() {
        Cell::Cap
    } else {
        Cell::Body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Aabb;

    fn scene() -> TerminalScene {
        TerminalScene::new(&GameConfig::default(), Vec2::new(16.0, 11.0))
    }

    #[test]
    fn test_barrier_fills_cells() {
        let mut s = scene();
        s.spawn(&Primitive::Barrier {
            rect: Aabb::new(0.0, 0.0, 400.0, 300.0),
            kind: BarrierKind::UpperBody,
        });
        let grid = s.rasterize(8, 6);
        assert_eq!(grid[0][0], Cell::Body);
        assert_eq!(grid[2][3], Cell::Body);
        assert_ne!(grid[3][4], Cell::Body);
    }

    #[test]
    fn test_player_head_glyph() {
        let mut s = scene();
        let h = s.spawn(&Primitive::Player {
            center: Vec2::new(160.0, 300.0),
            rotation_deg: 0.0,
            scale: 3.0,
        });
        let grid = s.rasterize(80, 24);
        assert_eq!(grid[12][16], Cell::Head('►'));

        s.update(
            h,
            &Primitive::Player {
                center: Vec2::new(160.0, 300.0),
                rotation_deg: 20.0,
                scale: 3.0,
            },
        );
        let grid = s.rasterize(80, 24);
        assert_eq!(grid[12][16], Cell::Head('▼'));
    }

    #[test]
    fn test_despawn_removes_primitive() {
        let mut s = scene();
        let h = s.spawn(&Primitive::Barrier {
            rect: Aabb::new(0.0, 0.0, 100.0, 100.0),
            kind: BarrierKind::LowerCap,
        });
        let has_cap = |s: &TerminalScene| {
            s.rasterize(80, 24)
                .iter()
                .flatten()
                .any(|c| *c == Cell::Cap)
        };
        assert!(has_cap(&s));
        s.despawn(h);
        assert!(!has_cap(&s));
    }

    #[test]
    fn test_zero_area_is_empty() {
        assert!(scene().rasterize(0, 0).is_empty());
    }
}
