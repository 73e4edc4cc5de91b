// 文本棋盘：只通过 Janggi 的只读接口取数据

use std::fmt::Write;

use common::{Position, BOARD_HEIGHT, BOARD_WIDTH};

use crate::game::Janggi;

const EMPTY_CELL: &str = "    ";

pub fn render(game: &Janggi) -> String {
    let mut out = String::new();
    let columns: String = (0..BOARD_WIDTH)
        .map(|x| format!("  {}  ", (b'a' + x as u8) as char))
        .collect();
    let rule = format!("    {}", "-".repeat(columns.len()));

    let _ = writeln!(out, "    {}", columns);
    let _ = writeln!(out, "{}", rule);
    for y in 0..BOARD_HEIGHT {
        let _ = write!(out, "{:>3} ", y + 1);
        for x in 0..BOARD_WIDTH {
            let cell = match game.piece_at(Position::new(x, y)) {
                Some(piece) => format!("{:<4}", piece.name()),
                None => EMPTY_CELL.to_owned(),
            };
            let _ = write!(out, "{} ", cell);
        }
        let _ = writeln!(out, "{}", y + 1);
    }
    let _ = writeln!(out, "{}", rule);
    let _ = write!(out, "    {}", columns);
    out
}
