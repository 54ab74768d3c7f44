use engine::{Actor, Frame, World};

use super::pawns::{DAMAGING, HEALING, PLAYER};

const FLOOR: char = '#';

/// Draws the board top row first, so `y = height - 1` is the first line.
/// Later actors overwrite earlier ones on a shared cell.
pub(crate) fn render_grid(world: &World, width: u32, height: u32) -> Vec<String> {
    let mut cells = vec![vec![FLOOR; width as usize]; height as usize];
    for actor in world.actors() {
        let (Some(frame), Some(sigil)) = (actor.frame(), sigil_for(actor)) else {
            continue;
        };
        let Some((row, col)) = cell_of(frame, width, height) else {
            continue;
        };
        cells[row][col] = sigil;
    }
    cells
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn sigil_for(actor: &Actor) -> Option<char> {
    match actor.kind() {
        kind if kind == HEALING => Some('H'),
        kind if kind == DAMAGING => Some('D'),
        kind if kind == PLAYER => actor.frame().map(player_sigil),
        _ => None,
    }
}

fn player_sigil(frame: Frame) -> char {
    let facing = frame.facing;
    if facing.y > 0.0 {
        '^'
    } else if facing.y < 0.0 {
        'V'
    } else if facing.x > 0.0 {
        '>'
    } else if facing.x < 0.0 {
        '<'
    } else {
        'o'
    }
}

fn cell_of(frame: Frame, width: u32, height: u32) -> Option<(usize, usize)> {
    let x = frame.pos.x.floor();
    let y = frame.pos.y.floor();
    if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
        return None;
    }
    let row = height as usize - 1 - y as usize;
    Some((row, x as usize))
}
