//! Plain-text board rendering for the terminal driver.

use breach_core::{Grid, Session, Tile, TileKind, active_connections};

use crate::reason_code;

const POWERED_MARK: char = '*';

/// Glyph for a single tile, chosen from its live connection mask.
pub fn tile_glyph(tile: &Tile) -> char {
    match tile.kind {
        TileKind::Start => 'S',
        TileKind::End => 'E',
        TileKind::Blocker => '#',
        TileKind::Empty => '.',
        kind => pipe_glyph(active_connections(kind, tile.rotation)),
    }
}

fn pipe_glyph(mask: [bool; 4]) -> char {
    match mask {
        [false, true, false, true] => '─',
        [true, false, true, false] => '│',
        [false, true, true, false] => '┌',
        [false, false, true, true] => '┐',
        [true, false, false, true] => '┘',
        [true, true, false, false] => '└',
        [false, true, true, true] => '┬',
        [true, false, true, true] => '┤',
        [true, true, false, true] => '┴',
        [true, true, true, false] => '├',
        [true, true, true, true] => '┼',
        _ => '?',
    }
}

/// Renders the grid with row and column headers. Powered tiles carry a trailing `*`.
pub fn render(grid: &Grid) -> String {
    let mut out = String::from("   ");
    for col in 0..grid.size() {
        out.push_str(&format!("{col:<3}"));
    }
    out.push('\n');

    for (row, tiles) in grid.rows().enumerate() {
        out.push_str(&format!("{row:>2} "));
        for tile in tiles {
            out.push(tile_glyph(tile));
            out.push(if tile.is_powered { POWERED_MARK } else { ' ' });
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Board followed by the session status line.
pub fn render_session(session: &Session) -> String {
    let mut out = render(session.grid());
    out.push_str(&status_line(session));
    out.push('\n');
    out
}

pub fn status_line(session: &Session) -> String {
    let grid = session.grid();
    let mut line = format!(
        "{} | time {:.1}s | attempt {} | powered {}/{}",
        reason_code(session.status()),
        session.time_left().as_secs_f32(),
        session.attempts(),
        grid.powered_count(),
        grid.tiles().len(),
    );
    if let Some(reward) = session.reward() {
        line.push_str(&format!(" | reward {reward}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use breach_core::{Coord, PuzzleConfig};

    fn tile(kind: TileKind, rotation: u8) -> Tile {
        Tile {
            coord: Coord::new(0, 0),
            kind,
            rotation,
            is_powered: false,
            is_locked: false,
            is_firewall: false,
        }
    }

    #[test]
    fn pipe_glyphs_follow_rotation() {
        assert_eq!(tile_glyph(&tile(TileKind::Straight, 0)), '─');
        assert_eq!(tile_glyph(&tile(TileKind::Straight, 1)), '│');
        assert_eq!(tile_glyph(&tile(TileKind::Corner, 0)), '┌');
        assert_eq!(tile_glyph(&tile(TileKind::Corner, 1)), '┐');
        assert_eq!(tile_glyph(&tile(TileKind::Corner, 2)), '┘');
        assert_eq!(tile_glyph(&tile(TileKind::Corner, 3)), '└');
        assert_eq!(tile_glyph(&tile(TileKind::TShape, 0)), '┬');
        assert_eq!(tile_glyph(&tile(TileKind::Cross, 2)), '┼');
    }

    #[test]
    fn fixed_tiles_have_letter_glyphs() {
        assert_eq!(tile_glyph(&tile(TileKind::Start, 0)), 'S');
        assert_eq!(tile_glyph(&tile(TileKind::End, 3)), 'E');
        assert_eq!(tile_glyph(&tile(TileKind::Blocker, 0)), '#');
    }

    #[test]
    fn render_has_header_rows_and_status() {
        let session = Session::start(7, PuzzleConfig::default()).expect("valid config");
        let text = render_session(&session);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 8 + 1);
        assert!(lines[0].trim_start().starts_with("0  1  2"));
        assert!(lines[1].starts_with(" 0 "));
        assert!(lines[9].starts_with("PLAYING | time 60.0s | attempt 1"));
    }

    #[test]
    fn start_tile_is_rendered_powered() {
        let session = Session::start(7, PuzzleConfig::default()).expect("valid config");
        let text = render(session.grid());
        assert!(text.contains(&format!("S{POWERED_MARK}")));
    }
}
