//! Terminal rendering of the scene.
//!
//! Draws a [`Scene`] as the manager last left it.  Field coordinates are
//! scaled onto the terminal area inside the border; no game logic runs here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_pirates::canvas::{Scene, SpriteKind, SpriteNode};
use space_pirates::entities::EnemyTier;
use space_pirates::session::PlayField;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_TEXT: Color = Color::Yellow;
const C_LIFE: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_BANNER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn enemy_color(tier: EnemyTier) -> Color {
    match tier {
        EnemyTier::One => Color::Green,
        EnemyTier::Two => Color::Cyan,
        EnemyTier::Three => Color::Magenta,
        EnemyTier::Four => Color::Red,
    }
}

/// Two frames per tier; tier one never toggles.
fn enemy_glyph(tier: EnemyTier, alternate: bool) -> &'static str {
    match (tier, alternate) {
        (EnemyTier::One, _) => "«▼»",
        (EnemyTier::Two, false) => "(◎)",
        (EnemyTier::Two, true) => "(●)",
        (EnemyTier::Three, false) => "╔═╗",
        (EnemyTier::Three, true) => "╚═╝",
        (EnemyTier::Four, false) => "<■>",
        (EnemyTier::Four, true) => ">■<",
    }
}

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Inner drawing area: columns 1..width-1, rows 1..height-2.
struct Viewport {
    field_width: f64,
    field_height: f64,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(field: &PlayField, width: u16, height: u16) -> Self {
        Viewport {
            field_width: field.width(),
            field_height: field.height(),
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(3).max(1),
        }
    }

    /// Terminal cell for a field position, or `None` when off screen.
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (x / self.field_width * f64::from(self.cols)).floor();
        let row = (y / self.field_height * f64::from(self.rows)).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some((col as u16 + 1, row as u16 + 1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene, field: &PlayField) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(field, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, width, height)?;

    for (_, node) in scene.iter() {
        draw_node(out, &view, node)?;
    }

    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_node<W: Write>(out: &mut W, view: &Viewport, node: &SpriteNode) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(node.x, node.y) else {
        return Ok(());
    };
    match node.kind {
        SpriteKind::PlayerShip => put(out, col, row, C_PLAYER, "/▲\\"),
        SpriteKind::EnemyShip(tier) => put(
            out,
            col,
            row,
            enemy_color(tier),
            enemy_glyph(tier, node.alternate_frame),
        ),
        SpriteKind::Bullet => put(out, col, row, C_BULLET, "║"),
        SpriteKind::Life => put(out, col, row, C_LIFE, "♥"),
        SpriteKind::ScoreBlock => {
            let text = node.text.as_deref().unwrap_or_default();
            put(out, col, row, C_HUD_TEXT, text)
        }
        SpriteKind::GameOverBlock => draw_banner(out, view, node),
    }
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Banner overlay ────────────────────────────────────────────────────────────

/// Multi-line banner, each line centred on the field's middle column.
fn draw_banner<W: Write>(out: &mut W, view: &Viewport, node: &SpriteNode) -> std::io::Result<()> {
    let Some(text) = node.text.as_deref() else {
        return Ok(());
    };
    let Some((_, row)) = view.cell(node.x, node.y) else {
        return Ok(());
    };
    let cx = view.cols / 2 + 1;
    for (i, line) in text.lines().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        put(out, col, row + i as u16, C_BANNER, line)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   S : Next level   R : Restart   Q : Quit",
    ))?;
    Ok(())
}
