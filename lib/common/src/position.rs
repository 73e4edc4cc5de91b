// 棋盘坐标：x 为列（0..=8），y 为行（0..=9），红方在上（y 小），蓝方在下（y 大）

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
    pub fn next(&self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
    /// Row delta of a Soldier's forward step.
    pub fn forward(&self) -> i32 {
        match self {
            Side::Blue => -1,
            Side::Red => 1,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }
    pub fn letter(&self) -> char {
        match self {
            Side::Blue => 'b',
            Side::Red => 'r',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position { x: value.0, y: value.1 }
    }
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }
    pub fn in_board(&self) -> bool {
        in_board(*self)
    }

    /// 按列优先（x 外层、y 内层）遍历全部 90 个格子，与走法生成的扫描顺序一致
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_WIDTH).flat_map(|x| (0..BOARD_HEIGHT).map(move |y| Position::new(x, y)))
    }
}

// 棋子是否在棋盘内
pub fn in_board(pos: Position) -> bool {
    pos.x >= 0 && pos.x < BOARD_WIDTH && pos.y >= 0 && pos.y < BOARD_HEIGHT
}
