use image::RgbImage;
use image::imageops::{self, FilterType};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::consts::{HEIGHT, WIDTH};
use crate::entities::{Bounds, Entity, EntityKind};
use crate::round::LossCause;
use crate::session::{Phase, Session};
use crate::settings::Settings;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub session: &'a Session,
    pub area: Rect,
    /// Measured frame rate, when the HUD should show it
    pub fps: Option<u32>,
}

/// Maps playfield pixels onto terminal cells
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    /// Cells covered by `bounds`, clipped to the area. `None` when nothing of
    /// the box is visible.
    pub fn project(&self, bounds: Bounds) -> Option<Rect> {
        let cols = i64::from(self.area.width);
        let rows = i64::from(self.area.height);
        let (width, height) = (i64::from(WIDTH), i64::from(HEIGHT));

        let x0 = (i64::from(bounds.x) * cols).div_euclid(width).clamp(0, cols);
        let x1 = (i64::from(bounds.right()) * cols + width - 1)
            .div_euclid(width)
            .clamp(0, cols);
        let y0 = (i64::from(bounds.y) * rows).div_euclid(height).clamp(0, rows);
        let y1 = (i64::from(bounds.bottom()) * rows + height - 1)
            .div_euclid(height)
            .clamp(0, rows);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        // All four values are within the area, which is itself u16-sized
        Some(Rect {
            x: self.area.x + x0 as u16,
            y: self.area.y + y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// Background picture, rescaled whenever the terminal size changes
struct Backdrop {
    source: RgbImage,
    scaled: RgbImage,
}

impl Backdrop {
    fn load(settings: &Settings) -> Option<Self> {
        if !settings.background_image {
            return None;
        }

        let path = settings.image_path("space.jpg");
        match image::open(&path) {
            Ok(picture) => Some(Self {
                source: picture.to_rgb8(),
                scaled: RgbImage::new(0, 0),
            }),
            Err(err) => {
                log::warn!(
                    "Failed to load background {}, using starfield: {}",
                    path.display(),
                    err
                );
                None
            }
        }
    }

    fn scaled_to(&mut self, width: u16, height: u16) -> &RgbImage {
        let size = (u32::from(width), u32::from(height));
        if self.scaled.dimensions() != size {
            self.scaled = imageops::resize(&self.source, size.0, size.1, FilterType::Triangle);
        }
        &self.scaled
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    backdrop: Option<Backdrop>,
}

impl GameRenderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            backdrop: Backdrop::load(settings),
        }
    }

    /// Draws the playfield, then the game over panel when the round has ended
    pub fn render(&mut self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        if view.session.phase != Phase::Playing {
            self.render_game_over(frame, view);
        }
    }

    fn render_game(&mut self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let round = &view.session.round;

        self.render_background(frame, area, round.frame);

        let viewport = Viewport::new(area);
        for entity in round.draw_list() {
            render_entity(frame, &viewport, entity);
        }

        // Stats overlay at the top left
        let ammo_line = Line::from(vec![
            Span::styled("Toasts: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", round.remaining_ammo()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let kills_line = Line::from(vec![
            Span::styled("Kills: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", round.kills),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(2),
        };
        frame.render_widget(Paragraph::new(vec![ammo_line, kills_line]), stats_area);

        if let Some(fps) = view.fps {
            let fps_line = Line::from(vec![
                Span::styled("FPS: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}", fps), Style::default().fg(Color::White)),
            ]);
            frame.render_widget(
                Paragraph::new(fps_line).alignment(Alignment::Right),
                Rect {
                    height: area.height.min(1),
                    ..stats_area
                },
            );
        }

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[W/S/Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_background(&mut self, frame: &mut Frame, area: Rect, frame_count: u64) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if let Some(backdrop) = self.backdrop.as_mut() {
            let picture = backdrop.scaled_to(area.width, area.height);
            let buffer = frame.buffer_mut();
            for (col, row, pixel) in picture.enumerate_pixels() {
                let [r, g, b] = pixel.0;
                // Dimmed so sprites stay readable on top
                let color = Color::Rgb(r / 2, g / 2, b / 2);
                if let Some(cell) = buffer.cell_mut((area.x + col as u16, area.y + row as u16)) {
                    cell.set_bg(color);
                }
            }
            return;
        }

        // Twinkling starfield fallback
        if frame_count % 10 < 5 {
            let mut rng = rand::rng();
            let star_text: Vec<Line> = (0..area.height)
                .map(|_| {
                    let row: String = (0..area.width)
                        .map(|_| if rng.random_bool(0.02) { '.' } else { ' ' })
                        .collect();
                    Line::from(row)
                })
                .collect();
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
    }

    /// Renders the game over panel over the frozen playfield
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let session = view.session;
        let reason = match session.round.loss {
            Some(LossCause::Breach) => "An asteroid slipped past the toaster",
            Some(LossCause::Collision) => "The toaster was hit",
            None => "",
        };

        let mut game_over_text = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().red().bold(),
            Line::from(reason).centered().gray(),
            Line::from(""),
            Line::from(format!(
                "Kills: {}   Best: {}",
                session.round.kills, session.best_kills
            ))
            .centered()
            .yellow()
            .bold(),
            Line::from(""),
        ];
        if session.phase == Phase::WaitingRestart {
            game_over_text.push(Line::from("Press Enter to play again").centered().white());
            game_over_text.push(Line::from("Press Q to quit").centered().white());
        }

        let panel = centered_rect(view.area, 44, 10);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            panel,
        );
    }
}

fn render_entity(frame: &mut Frame, viewport: &Viewport, entity: &dyn Entity) {
    let Some(cells) = viewport.project(entity.bounds()) else {
        return;
    };

    let color = match entity.kind() {
        EntityKind::Player => Color::LightCyan,
        EntityKind::Obstacle => Color::LightRed,
        EntityKind::Projectile => Color::Yellow,
    };

    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let text: Vec<Line> = fit_sprite(entity.sprite_lines(), entity.glyph(), cells)
        .into_iter()
        .map(|line| Line::from(line).style(style))
        .collect();

    frame.render_widget(Paragraph::new(text), cells);
}

/// Full art when it fits in `cells`, otherwise a solid block of `glyph`
fn fit_sprite(lines: &[&str], glyph: char, cells: Rect) -> Vec<String> {
    let art_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if art_width <= cells.width as usize && lines.len() <= cells.height as usize {
        return lines.iter().map(|l| (*l).to_string()).collect();
    }
    let row: String = std::iter::repeat_n(glyph, cells.width as usize).collect();
    vec![row; cells.height as usize]
}

/// Rect of at most `width` x `height` centred in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Obstacle, Player};
    use ratatui::{Terminal, backend::TestBackend};

    fn quiet_settings() -> Settings {
        Settings {
            background_image: false,
            ..Settings::default()
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_project_full_playfield() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 30));
        assert_eq!(
            viewport.project(Bounds::new(0, 0, WIDTH, HEIGHT)),
            Some(Rect::new(0, 0, 80, 30))
        );
    }

    #[test]
    fn test_project_rounds_outward() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 30));
        assert_eq!(
            viewport.project(Bounds::new(400, 300, 10, 10)),
            Some(Rect::new(40, 15, 1, 1))
        );
    }

    #[test]
    fn test_project_offsets_by_area_origin() {
        let viewport = Viewport::new(Rect::new(5, 2, 80, 30));
        assert_eq!(
            viewport.project(Bounds::new(0, 0, 10, 20)),
            Some(Rect::new(5, 2, 1, 1))
        );
    }

    #[test]
    fn test_project_clips_offscreen() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 30));
        assert_eq!(viewport.project(Bounds::new(-100, 100, 48, 48)), None);
        assert_eq!(viewport.project(Bounds::new(900, 100, 48, 48)), None);

        let partial = viewport.project(Bounds::new(780, 100, 48, 48)).unwrap();
        assert_eq!(partial.x + partial.width, 80);
    }

    #[test]
    fn test_sprite_kept_when_it_fits() {
        let art = [" .-~-. ", "( o  O)", " `-~-' "];
        assert_eq!(
            fit_sprite(&art, '@', Rect::new(0, 0, 7, 3)),
            vec![" .-~-. ", "( o  O)", " `-~-' "]
        );
    }

    #[test]
    fn test_sprite_replaced_by_glyph_on_small_terminal() {
        let player = Player::spawn();
        // 80x24 squeezes the 64x48 box into 7x2 cells
        let cells = Viewport::new(Rect::new(0, 0, 80, 24))
            .project(player.bounds())
            .unwrap();
        let lines = fit_sprite(player.sprite_lines(), player.glyph(), cells);
        assert_eq!(lines.len(), cells.height as usize);
        assert!(lines.iter().all(|l| l.chars().count() == cells.width as usize));
        assert!(lines.iter().all(|l| l.chars().all(|c| c == '=')));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let rect = centered_rect(Rect::new(0, 0, 20, 5), 44, 10);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_render_hud() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut renderer = GameRenderer::new(&quiet_settings());
        let mut session = Session::new();
        session.round.kills = 7;

        terminal
            .draw(|frame| {
                let view = RenderView {
                    session: &session,
                    area: frame.area(),
                    fps: None,
                };
                renderer.render(frame, &view);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Toasts: 2"));
        assert!(text.contains("Kills: 7"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_game_over_panel() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut renderer = GameRenderer::new(&quiet_settings());
        let mut session = Session::new();
        session.round.obstacles.push(Obstacle::new(400, 300));
        session.round.loss = Some(LossCause::Breach);
        session.phase = Phase::WaitingRestart;

        terminal
            .draw(|frame| {
                let view = RenderView {
                    session: &session,
                    area: frame.area(),
                    fps: Some(60),
                };
                renderer.render(frame, &view);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press Enter to play again"));
        assert!(text.contains("FPS: 60"));
    }
}
