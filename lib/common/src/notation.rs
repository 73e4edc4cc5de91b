// 格子标签：列字母 a-i 加行号 1-10，例如 a1 = (0, 0)，e2 = (4, 1)，i10 = (8, 9)

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use thiserror::Error;

use crate::position::Position;

static LABELS: LazyLock<HashMap<String, Position>> = LazyLock::new(|| {
    Position::all()
        .map(|pos| (label_of(pos), pos))
        .collect()
});

fn label_of(pos: Position) -> String {
    format!("{}{}", (b'a' + pos.x as u8) as char, pos.y + 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown square `{0}`")]
pub struct ParseSquareError(pub String);

impl FromStr for Position {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LABELS
            .get(s.trim())
            .copied()
            .ok_or_else(|| ParseSquareError(s.to_owned()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_board() {
            return write!(f, "({}, {})", self.x, self.y);
        }
        f.write_str(&label_of(*self))
    }
}
