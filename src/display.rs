/// Rendering layer: all terminal I/O lives here.
///
/// The simulation works in an 800×600 world; this module scales it to
/// whatever the terminal offers and draws glyph art in its place.  No game
/// logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use aliens::actor::Actor;
use aliens::entities::{Align, Category, Label, Tint, Vec2};
use aliens::game::Game;

/// Fonts at least this large are drawn bold.
const BIG_FONT: u16 = 32;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(game.screen(), cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Scenery first so everything else draws over it.
    let actors = game.level().actors();
    for (_, actor) in actors.iter().filter(|(_, a)| a.category().is_scenery()) {
        draw_scenery(out, &view, actor)?;
    }
    for (_, actor) in actors.iter().filter(|(_, a)| !a.category().is_scenery()) {
        draw_actor(out, &view, actor)?;
    }

    for label in game.level().labels() {
        draw_label(out, &view, label)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Geometry ──────────────────────────────────────────────────────────────────

struct Viewport {
    sx: f32,
    sy: f32,
    cols: i32,
    rows: i32,
}

impl Viewport {
    fn new(screen: Vec2, cols: u16, rows: u16) -> Self {
        Viewport {
            sx: f32::from(cols) / screen.x,
            sy: f32::from(rows) / screen.y,
            cols: i32::from(cols),
            rows: i32::from(rows),
        }
    }

    fn cell(&self, p: Vec2) -> (i32, i32) {
        ((p.x * self.sx).round() as i32, (p.y * self.sy).round() as i32)
    }
}

/// Print `text` at (`col`, `row`), clipped to the terminal.
fn put<W: Write>(out: &mut W, view: &Viewport, col: i32, row: i32, text: &str) -> std::io::Result<()> {
    if row < 0 || row >= view.rows || col >= view.cols {
        return Ok(());
    }
    let skip = (-col).max(0) as usize;
    let room = (view.cols - col.max(0)) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Grey => Color::DarkGrey,
        Tint::Red => Color::DarkRed,
        Tint::LightRed => Color::Red,
        Tint::Green => Color::DarkGreen,
        Tint::LightGreen => Color::Green,
        Tint::LightBlue => Color::Blue,
        Tint::Yellow => Color::Yellow,
        Tint::Cyan => Color::Cyan,
        Tint::Magenta => Color::Magenta,
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

fn draw_scenery<W: Write>(out: &mut W, view: &Viewport, actor: &Actor) -> std::io::Result<()> {
    let body = &actor.body;
    out.queue(style::SetForegroundColor(color(body.sprite.tint)))?;
    match body.category {
        Category::Background => {
            // One art row repeated across the full width, pinned to its bottom edge.
            let Some(pattern) = body.sprite.art.first() else {
                return Ok(());
            };
            let (_, row) = view.cell(Vec2::new(body.pos.x, body.pos.y + body.height() / 2.0));
            let width = view.cols.max(0) as usize;
            let line: String = pattern.chars().cycle().take(width).collect();
            put(out, view, 0, row - 1, &line)
        }
        _ => {
            // Bigger stars shine brighter.
            let glyph = if body.size >= 70 { "*" } else { "." };
            let (col, row) = view.cell(body.pos);
            put(out, view, col, row, glyph)
        }
    }
}

fn draw_actor<W: Write>(out: &mut W, view: &Viewport, actor: &Actor) -> std::io::Result<()> {
    let body = &actor.body;
    let art = body.sprite.art;
    let (col, row) = view.cell(body.pos);
    let top = row - art.len() as i32 / 2;

    out.queue(style::SetForegroundColor(color(body.sprite.tint)))?;
    for (i, line) in art.iter().enumerate() {
        let left = col - line.chars().count() as i32 / 2;
        put(out, view, left, top + i as i32, line)?;
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_label<W: Write>(out: &mut W, view: &Viewport, label: &Label) -> std::io::Result<()> {
    if label.text.is_empty() {
        return Ok(());
    }
    let (mut col, row) = view.cell(label.pos);
    if label.align == Align::Center {
        col -= label.text.chars().count() as i32 / 2;
    }

    let big = label.font.size >= BIG_FONT;
    if big {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    out.queue(style::SetForegroundColor(color(label.tint)))?;
    put(out, view, col, row, &label.text)?;
    if big {
        out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
    }
    Ok(())
}
