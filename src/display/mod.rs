/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates state
/// into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    Arena, Boss, BossPalette, Bullet, BulletOwner, Enemy, Entity, Explosion, Player, World,
};
use crate::game::Game;
use crate::level::LevelInfo;
use crate::menu::{Menu, MenuKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_PROGRESS: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_BOSS_FLASH: Color = Color::Rgb { r: 255, g: 100, b: 100 };
const C_MENU_TEXT: Color = Color::White;
const C_MENU_SELECTED: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const BOSS_BAR_WIDTH: usize = 12;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: the world if a level is loaded, then the
/// active menu on top.
pub fn render<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let arena = game.arena();

    if let Some(world) = game.world() {
        draw_border(out, &arena)?;
        draw_hud(out, world)?;

        for enemy in world.enemies.iter().filter(|e| e.is_alive()) {
            draw_enemy(out, enemy)?;
        }
        if let Some(boss) = world.boss.as_ref().filter(|b| b.is_alive()) {
            draw_boss(out, boss)?;
            draw_boss_bar(out, boss, &arena)?;
        }
        for bullet in world.bullets.iter().filter(|b| b.is_alive()) {
            draw_bullet(out, bullet)?;
        }
        for explosion in world.explosions.iter().filter(|e| e.is_alive()) {
            draw_explosion(out, explosion)?;
        }
        if world.player.is_alive() {
            draw_player(out, &world.player)?;
        }
        draw_controls_hint(out, &arena)?;
    }

    if let Some(menu) = game.menu() {
        draw_menu(out, game, menu)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, arena.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Cursor to the cell containing (x, y).
fn move_to<W: Write>(out: &mut W, x: f32, y: f32) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(x.round().max(0.0) as u16, y.round().max(0.0) as u16))?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    arena: &Arena,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (arena.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, arena: &Arena) -> std::io::Result<()> {
    let w = arena.width as usize;
    let h = arena.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(arena.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>7}", world.score)))?;

    let level_str = format!("[ {}: {} ]", world.level.number(), world.level.name());
    print_centered(out, &world.arena, 0, &level_str, C_HUD_LEVEL)?;

    let progress = format!("Enemies: {}", progress_text(&world.level.info()));
    let rx = world
        .arena
        .width
        .saturating_sub(progress.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_PROGRESS))?;
    out.queue(Print(&progress))?;

    Ok(())
}

/// `killed/total (pct%)`
fn progress_text(info: &LevelInfo) -> String {
    format!(
        "{}/{} ({:.0}%)",
        info.enemies_killed, info.total_enemies, info.progress_percentage
    )
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &Player) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /|\      ← row y+1    (wings + fuselage)
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    move_to(out, player.x + 1.0, player.y)?;
    out.queue(Print("▲"))?;
    move_to(out, player.x, player.y + 1.0)?;
    out.queue(Print("/|\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy) -> std::io::Result<()> {
    // Row 0:  <▼>
    // Row 1:  [_]
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    move_to(out, enemy.x, enemy.y)?;
    out.queue(Print("<▼>"))?;
    move_to(out, enemy.x, enemy.y + 1.0)?;
    out.queue(Print("[_]"))?;
    Ok(())
}

fn boss_color(palette: BossPalette) -> Color {
    match palette {
        BossPalette::Purple => Color::Rgb { r: 128, g: 0, b: 128 },
        BossPalette::RedOrange => Color::Rgb { r: 200, g: 50, b: 0 },
        BossPalette::Gold => Color::Rgb { r: 255, g: 215, b: 0 },
    }
}

fn draw_boss<W: Write>(out: &mut W, boss: &Boss) -> std::io::Result<()> {
    let color = if boss.is_flashing() {
        C_BOSS_FLASH
    } else {
        boss_color(boss.spec.palette)
    };
    out.queue(style::SetForegroundColor(color))?;
    let rows = ["╔═══════╗", "║ ◉ ◉ ◉ ║", "╚╦═╦═╦═╦╝"];
    for (i, row) in rows.iter().enumerate() {
        move_to(out, boss.x, boss.y + i as f32)?;
        out.queue(Print(*row))?;
    }
    Ok(())
}

/// Name, HP bar and "hp/max" on the top border.
fn draw_boss_bar<W: Write>(out: &mut W, boss: &Boss, arena: &Arena) -> std::io::Result<()> {
    let fraction = boss.hp_fraction();
    let filled = (BOSS_BAR_WIDTH as f32 * fraction).round() as usize;
    let color = if fraction > 0.6 {
        Color::Green
    } else if fraction > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    };
    let text = format!(
        " {} [{}{}] {}/{} ",
        boss.name(),
        "█".repeat(filled),
        "░".repeat(BOSS_BAR_WIDTH - filled.min(BOSS_BAR_WIDTH)),
        boss.current_hp,
        boss.max_hp()
    );
    print_centered(out, arena, 1, &text, color)
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet) -> std::io::Result<()> {
    move_to(out, bullet.x, bullet.y)?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BulletOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

fn draw_explosion<W: Write>(out: &mut W, explosion: &Explosion) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    if explosion.large {
        for (i, row) in ["\\|/", "-*-", "/|\\"].iter().enumerate() {
            move_to(out, explosion.x - 1.0, explosion.y - 1.0 + i as f32)?;
            out.queue(Print(*row))?;
        }
    } else {
        move_to(out, explosion.x, explosion.y)?;
        out.queue(Print("*"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, arena: &Arena) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, arena.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

/// Lines shown between the title and the options.
fn menu_details(game: &Game, menu: &Menu) -> Vec<(String, Color)> {
    let world = game.world();
    let level_line = world
        .map(|w| format!("Level {}: {}", w.level.number(), w.level.name()))
        .unwrap_or_default();
    let score = world.map_or(0, |w| w.score);

    match menu.kind {
        MenuKind::Main => vec![("Clear every wave. Defeat the bosses.".to_string(), C_HINT)],
        MenuKind::Pause => vec![(level_line, C_MENU_TEXT)],
        MenuKind::GameOver => vec![
            (level_line, C_MENU_TEXT),
            (format!("Final Score: {}", score), C_HUD_SCORE),
        ],
        MenuKind::LevelComplete => {
            let mut lines = vec![(level_line, C_MENU_TEXT)];
            if game.levels().has_next() {
                lines.push(("Great job! Ready for the next challenge?".to_string(), C_MENU_TEXT));
            } else {
                lines.push(("CONGRATULATIONS! You've completed all levels!".to_string(), C_HUD_SCORE));
            }
            if let Some(w) = world {
                let defeated = format!("Enemies defeated: {}", progress_text(&w.level.info()));
                lines.push((defeated, C_HUD_PROGRESS));
            }
            lines.push((format!("Score: {}", score), C_HUD_SCORE));
            if !game.accepts_input() {
                let secs = game.dwell_remaining_ms().div_ceil(1000);
                lines.push((format!("Continue in {}s...", secs), C_HINT));
            }
            lines
        }
        MenuKind::LevelSelect => Vec::new(),
    }
}

fn title_color(kind: MenuKind) -> Color {
    match kind {
        MenuKind::Main | MenuKind::LevelSelect => Color::Cyan,
        MenuKind::Pause => Color::Yellow,
        MenuKind::GameOver => Color::Red,
        MenuKind::LevelComplete => Color::Green,
    }
}

fn draw_menu<W: Write>(out: &mut W, game: &Game, menu: &Menu) -> std::io::Result<()> {
    let arena = game.arena();
    let title = if menu.kind == MenuKind::Main {
        format!("★  {}  ★", menu.title)
    } else {
        menu.title.to_string()
    };
    let details = menu_details(game, menu);
    let options = menu.options();

    // title, blank, details, blank, options, blank, hint
    let total = 1 + 1 + details.len() + 1 + options.len() + 1 + 1;
    let mut row = (arena.height / 2).saturating_sub(total as u16 / 2);

    print_centered(out, &arena, row, &title, title_color(menu.kind))?;
    row += 2;
    for (text, color) in &details {
        print_centered(out, &arena, row, text, *color)?;
        row += 1;
    }
    row += 1;

    for (i, option) in options.iter().enumerate() {
        let (text, color) = if i == menu.selected_index() {
            (format!("> {} <", option.label), C_MENU_SELECTED)
        } else {
            (option.label.clone(), C_MENU_TEXT)
        };
        print_centered(out, &arena, row, &text, color)?;
        row += 1;
    }
    row += 1;

    print_centered(out, &arena, row, "↑ ↓ / W S : Navigate   ENTER / SPACE : Select", C_HINT)
}
