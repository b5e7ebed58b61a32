//! Ratatui-based terminal UI.
//!
//! The TUI draws the GDP bars with Plotters and drives the tooltip state
//! machine from pointer events: moving the mouse onto a bar enters it, moving
//! above it or out of the chart area leaves it. ←/→ step through bars from
//! the keyboard and Esc hides the tooltip.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_chart};
use crate::chart::scene::{AxisOrientation, LabelRole};
use crate::chart::{PointerEvent, Scene, Tooltip};
use crate::cli::TuiArgs;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::GdpPlottersChart;

/// Frame interval while a tooltip fade is running.
const FADE_TICK: Duration = Duration::from_millis(40);
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    // Fetch before touching the terminal so failures print normally.
    let run = run_chart(&args.source)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(run);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

struct App {
    run: RunOutput,
    tooltip: Tooltip,
    hovered: Option<usize>,
    last_event: Instant,
    /// Where the plot itself was drawn on the last frame.
    chart_rect: Option<Rect>,
    status: String,
}

impl App {
    fn new(run: RunOutput) -> Self {
        let baseline = run.scene.config.baseline();
        let status = format!("{} quarters loaded", run.scene.bars.len());
        Self {
            run,
            tooltip: Tooltip::new(baseline),
            hovered: None,
            last_event: Instant::now(),
            chart_rect: None,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw || self.fading() {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let tick = if self.fading() { FADE_TICK } else { IDLE_TICK };
            if !event::poll(tick).map_err(|e| AppError::terminal(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse);
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn fading(&self) -> bool {
        self.tooltip
            .fade()
            .is_some_and(|f| !f.is_done(self.last_event.elapsed()))
    }

    fn shown_opacity(&self) -> f64 {
        self.tooltip.opacity_at(self.last_event.elapsed())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => {
                let idx = match self.hovered {
                    Some(i) => i.saturating_sub(1),
                    None => 0,
                };
                self.enter_bar_at_center(idx);
            }
            KeyCode::Right => {
                let last = self.run.scene.bars.len().saturating_sub(1);
                let idx = match self.hovered {
                    Some(i) => (i + 1).min(last),
                    None => last,
                };
                self.enter_bar_at_center(idx);
            }
            KeyCode::Esc => self.leave(),
            _ => {}
        }
        false
    }

    /// Returns whether the frame needs redrawing.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return false;
        }
        let Some(rect) = self.chart_rect else {
            return false;
        };

        let inside = mouse.column >= rect.x
            && mouse.column < rect.x + rect.width
            && mouse.row >= rect.y
            && mouse.row < rect.y + rect.height;
        if !inside {
            if self.hovered.is_some() {
                self.leave();
                return true;
            }
            return false;
        }

        let [x0, x1] = x_bounds(&self.run.scene);
        let page_x = column_to_scene_x(mouse.column, rect, x0, x1);
        let page_y = row_to_scene_y(mouse.row, rect, &self.run.scene);
        let Some(idx) = self.run.scene.nearest_bar(page_x) else {
            return false;
        };

        // A cell counts as over the bar when it reaches within half a row of its top.
        let half_row = plot_height(&self.run.scene) / rect.height.max(1) as f64 / 2.0;
        let over_bar = self
            .run
            .scene
            .bars
            .get(idx)
            .is_some_and(|bar| page_y >= bar.y - half_row);
        if !over_bar {
            if self.hovered.is_some() {
                self.leave();
                return true;
            }
            return false;
        }

        if Some(idx) == self.hovered {
            return false;
        }
        self.enter(idx, PointerEvent { page_x, page_y });
        true
    }

    fn enter_bar_at_center(&mut self, idx: usize) {
        let Some(bar) = self.run.scene.bars.get(idx) else {
            return;
        };
        let event = PointerEvent {
            page_x: bar.center_x(),
            page_y: bar.y,
        };
        self.enter(idx, event);
    }

    fn enter(&mut self, idx: usize, event: PointerEvent) {
        let shown = self.shown_opacity();
        let Some(bar) = self.run.scene.bars.get(idx) else {
            return;
        };
        self.tooltip.on_pointer_enter(event, bar, shown);
        self.hovered = Some(idx);
        self.last_event = Instant::now();
        self.status = format!("data-date={}", bar.date);
    }

    fn leave(&mut self) {
        if self.hovered.is_none() {
            return;
        }
        let shown = self.shown_opacity();
        self.tooltip.on_pointer_leave(shown);
        self.hovered = None;
        self.last_event = Instant::now();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let scene = &self.run.scene;
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            scene.title().unwrap_or("GDP").to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        if let Some(citation) = scene.citation() {
            lines.push(Line::from(Span::styled(
                citation.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let scene = &self.run.scene;
        let series = scene
            .label(LabelRole::Series)
            .map(|l| l.text.clone())
            .unwrap_or_default();
        let block = Block::default().title(series).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = GdpPlottersChart {
            bars: &scene.bars,
            hovered: self.hovered,
            x_bounds: x_bounds(scene),
            y_bounds: [0.0, plot_height(scene)],
        };
        frame.render_widget(widget, chart_rect);

        if insets.is_some() {
            draw_axis_ticks(frame, inner, chart_rect, scene);
        }
        self.draw_tooltip(frame, chart_rect);
        self.chart_rect = Some(chart_rect);
    }

    fn draw_tooltip(&self, frame: &mut ratatui::Frame<'_>, chart: Rect) {
        let opacity = self.shown_opacity();
        if opacity <= 0.0 || self.tooltip.html().is_empty() {
            return;
        }

        let lines: Vec<Line> = self
            .tooltip
            .html()
            .split("<br>")
            .map(|s| Line::from(s.to_string()))
            .collect();
        let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 2;
        let height = lines.len() as u16 + 2;
        if chart.width < width || chart.height < height {
            return;
        }

        let [x0, x1] = x_bounds(&self.run.scene);
        let col = scene_x_to_column(self.tooltip.left(), chart, x0, x1);
        let x = col.min(chart.x + chart.width - width);
        // Pinned to the baseline row, like the tooltip's `top`.
        let y = scene_y_to_row(self.tooltip.top(), chart, &self.run.scene)
            .saturating_sub(height - 1)
            .max(chart.y);

        // No alpha in a terminal: dim the box while it is mostly transparent.
        let style = if opacity >= 0.6 {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };

        let rect = Rect { x, y, width, height };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .style(style)
                .block(Block::default().borders(Borders::ALL).style(style)),
            rect,
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "mouse hover / ←/→ inspect  Esc hide  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn x_bounds(scene: &Scene) -> [f64; 2] {
    let [x0, x1] = scene
        .axis(AxisOrientation::Bottom)
        .map(|a| a.range)
        .unwrap_or([0.0, scene.config.width]);
    [x0, x1 + scene.config.bar_width]
}

fn plot_height(scene: &Scene) -> f64 {
    scene.config.baseline() - scene.config.padding.vertical
}

/// Scene x under the centre of a terminal column.
fn column_to_scene_x(column: u16, chart: Rect, x0: f64, x1: f64) -> f64 {
    let width = chart.width.max(1) as f64;
    let u = (column.saturating_sub(chart.x) as f64 + 0.5) / width;
    x0 + u.clamp(0.0, 1.0) * (x1 - x0)
}

fn scene_x_to_column(x: f64, chart: Rect, x0: f64, x1: f64) -> u16 {
    if x1 <= x0 || chart.width == 0 {
        return chart.x;
    }
    let u = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    chart.x + (u * (chart.width - 1) as f64).round() as u16
}

/// Scene y (top padding .. baseline) under the centre of a terminal row.
fn row_to_scene_y(row: u16, chart: Rect, scene: &Scene) -> f64 {
    let top = scene.config.padding.vertical;
    let height = chart.height.max(1) as f64;
    let u = (row.saturating_sub(chart.y) as f64 + 0.5) / height;
    top + u.clamp(0.0, 1.0) * plot_height(scene)
}

fn scene_y_to_row(y: f64, chart: Rect, scene: &Scene) -> u16 {
    let span = plot_height(scene);
    if span <= 0.0 || chart.height == 0 {
        return chart.y;
    }
    let u = ((y - scene.config.padding.vertical) / span).clamp(0.0, 1.0);
    chart.y + (u * (chart.height - 1) as f64).round() as u16
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Draw the scene's own axis ticks around the plot area.
fn draw_axis_ticks(frame: &mut ratatui::Frame<'_>, inner: Rect, chart: Rect, scene: &Scene) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = x_bounds(scene);

    if let Some(axis) = scene.axis(AxisOrientation::Bottom) {
        let y = chart.y + chart.height;
        let mut next_free = chart.x;
        for tick in &axis.ticks {
            let x = scene_x_to_column(tick.position, chart, x0, x1);
            let label_len = tick.label.chars().count() as u16;
            let start = x.saturating_sub(label_len / 2);
            // Skip labels that would overlap the previous one on narrow terminals.
            if start < next_free || start + label_len > inner.x + inner.width || y >= inner.y + inner.height {
                continue;
            }
            frame.render_widget(
                Paragraph::new(tick.label.clone()).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
            next_free = start + label_len + 1;
        }
    }

    if let Some(axis) = scene.axis(AxisOrientation::Left) {
        let mut last_row = None;
        for tick in &axis.ticks {
            let y = scene_y_to_row(tick.position, chart, scene);
            if last_row == Some(y) {
                continue;
            }
            let label_len = tick.label.chars().count() as u16;
            let x = chart.x.saturating_sub(1);
            let start = x.saturating_sub(label_len);
            if start < inner.x {
                continue;
            }
            frame.render_widget(
                Paragraph::new(tick.label.clone()).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
            last_row = Some(y);
        }
    }
}
