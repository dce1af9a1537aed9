//! Terminal render host.
//!
//! Keeps a [`SceneCanvas`] as its retained state and paints it with a
//! ratatui braille canvas. Each terminal cell stands for a block of
//! virtual pixels so the view can keep working in pixel units.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glam::Vec2;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TermColor, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::core::error::{Result, VolterriaError};
use crate::engine::SimulationEngine;
use crate::render::colors::{Color, BACKGROUND};
use crate::render::host::{LabelAlign, NodeId, NodeKind, RenderHost};
use crate::render::metrics::SyncMetrics;
use crate::render::scene::{Node, SceneCanvas};
use crate::render::view::SyncView;

const TARGET_HZ: f64 = 60.0;

/// Virtual pixels covered by one terminal cell.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

const HEADER_HEIGHT: u16 = 3;
const MAX_FILL_RINGS: usize = 64;

/// Render host backed by a terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    scene: SceneCanvas,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the virtual surface to the map area of a terminal of `area`.
    pub fn fit_to(&mut self, area: Rect) {
        let map = map_inner(area);
        self.scene.resize(
            f32::from(map.width) * CELL_WIDTH_PX,
            f32::from(map.height) * CELL_HEIGHT_PX,
        );
    }

    pub fn scene(&self) -> &SceneCanvas {
        &self.scene
    }

    /// Paint the header and the scene.
    pub fn draw(&self, frame: &mut Frame<'_>, metrics: &SyncMetrics) {
        let (header, map) = split(frame.size());

        let totals = metrics.totals();
        let info = Line::from(vec![
            Span::styled(
                "volterria",
                Style::default().fg(TermColor::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  frame {}  sim {:.1}s  sync {:.2}ms (max {:.2})  nodes {}  [q] quit",
                totals.frames,
                totals.simulated_seconds,
                metrics.avg_tick_ms(),
                metrics.max_tick_ms(),
                self.scene.len(),
            )),
        ]);
        frame.render_widget(
            Paragraph::new(info).block(Block::default().borders(Borders::ALL)),
            header,
        );

        let size = self.scene.surface_size();
        let (width, height) = (f64::from(size.x), f64::from(size.y));
        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL))
            .background_color(term_color(BACKGROUND))
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for (_, node) in self.scene.iter() {
                    paint_node(ctx, node, height);
                }
            });
        frame.render_widget(canvas, map);
    }
}

impl RenderHost for TerminalHost {
    fn attach(&mut self, kind: NodeKind) -> NodeId {
        self.scene.attach(kind)
    }

    fn detach(&mut self, node: NodeId) {
        self.scene.detach(node);
    }

    fn set_position(&mut self, node: NodeId, position: Vec2) {
        self.scene.set_position(node, position);
    }

    fn set_fill(&mut self, node: NodeId, color: Color) {
        self.scene.set_fill(node, color);
    }

    fn set_stroke(&mut self, node: NodeId, color: Color) {
        self.scene.set_stroke(node, color);
    }

    fn set_circle_radius(&mut self, node: NodeId, radius: f32) {
        self.scene.set_circle_radius(node, radius);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.scene.set_text(node, text);
    }

    fn surface_size(&self) -> Vec2 {
        self.scene.surface_size()
    }
}

/// Run `view` in the terminal until `q` or `Esc`.
///
/// Raw mode and the alternate screen are restored even when the loop
/// fails. The view is torn down before returning.
pub fn run<E: SimulationEngine>(view: &mut SyncView<E>) -> Result<()> {
    enable_raw_mode()
        .map_err(|e| VolterriaError::Terminal(format!("failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| VolterriaError::Terminal(format!("failed to enter alternate screen: {e}")))?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor().ok();

    let mut host = TerminalHost::new();
    let result = run_loop(&mut terminal, &mut host, view);
    view.teardown(&mut host);

    terminal.show_cursor().ok();
    if let Err(err) = disable_raw_mode() {
        tracing::error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        tracing::error!(?err, "failed to leave alternate screen");
    }

    result
}

fn run_loop<E: SimulationEngine>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    host: &mut TerminalHost,
    view: &mut SyncView<E>,
) -> Result<()> {
    let frame_interval = Duration::from_secs_f64(1.0 / TARGET_HZ);
    let start = Instant::now();

    loop {
        let frame_start = Instant::now();
        render_frame(terminal, host, view, start.elapsed().as_secs_f64())?;

        let timeout = frame_interval.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

/// Tick the view at `now` and draw the result.
pub fn render_frame<B: Backend, E: SimulationEngine>(
    terminal: &mut Terminal<B>,
    host: &mut TerminalHost,
    view: &mut SyncView<E>,
    now: f64,
) -> Result<()> {
    host.fit_to(terminal.size()?);
    view.tick(host, now);
    terminal.draw(|frame| host.draw(frame, view.metrics()))?;
    Ok(())
}

fn split(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);
    (rows[0], rows[1])
}

fn map_inner(area: Rect) -> Rect {
    let (_, map) = split(area);
    Block::default().borders(Borders::ALL).inner(map)
}

fn paint_node(ctx: &mut Context<'_>, node: &Node, height: f64) {
    let x = f64::from(node.position.x);
    // canvas Y grows upward
    let y = height - f64::from(node.position.y);

    match node.kind {
        NodeKind::Circle => {
            let radius = f64::from(node.radius);
            if !node.fill.is_transparent() && radius.is_finite() {
                // concentric rings stand in for a solid fill
                let spacing = f64::from(CELL_WIDTH_PX) / 2.0;
                let rings = ((radius / spacing).ceil() as usize).min(MAX_FILL_RINGS);
                for ring in 0..rings {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: radius - ring as f64 * spacing,
                        color: term_color(node.fill),
                    });
                }
            }
            if !node.stroke.is_transparent() {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius + 1.0,
                    color: term_color(node.stroke),
                });
            }
        }
        NodeKind::Label { font_size, align } => {
            let line_height = f64::from(font_size.max(CELL_HEIGHT_PX));
            let style = Style::default().fg(term_color(node.fill));
            for (i, text) in node.text.lines().enumerate() {
                let left = match align {
                    LabelAlign::TopLeft => x,
                    LabelAlign::Center => {
                        x - text.chars().count() as f64 * f64::from(CELL_WIDTH_PX) / 2.0
                    }
                };
                let top = y - i as f64 * line_height;
                ctx.print(left, top, Line::from(Span::styled(text.to_string(), style)));
            }
        }
    }
}

fn term_color(color: Color) -> TermColor {
    let [r, g, b] = color.over_black();
    TermColor::Rgb(r, g, b)
}
