use crate::board::Kind;
use common::{Position, Side, BOARD_HEIGHT};

// 固定开局：红方一侧的摆法，蓝方按 y -> 9 - y 镜像
// 象、马的位置固定，不允许开局前调换
pub const RED_LAYOUT: [(Kind, Position); 16] = [
    (Kind::Chariot, Position::new(0, 0)),
    (Kind::Chariot, Position::new(8, 0)),
    (Kind::Elephant, Position::new(1, 0)),
    (Kind::Elephant, Position::new(6, 0)),
    (Kind::Horse, Position::new(2, 0)),
    (Kind::Horse, Position::new(7, 0)),
    (Kind::Guard, Position::new(3, 0)),
    (Kind::Guard, Position::new(5, 0)),
    (Kind::General, Position::new(4, 1)),
    (Kind::Cannon, Position::new(1, 2)),
    (Kind::Cannon, Position::new(7, 2)),
    (Kind::Soldier, Position::new(0, 3)),
    (Kind::Soldier, Position::new(2, 3)),
    (Kind::Soldier, Position::new(4, 3)),
    (Kind::Soldier, Position::new(6, 3)),
    (Kind::Soldier, Position::new(8, 3)),
];

pub fn start_layout(side: Side) -> impl Iterator<Item = (Kind, Position)> {
    RED_LAYOUT.into_iter().map(move |(kind, pos)| match side {
        Side::Red => (kind, pos),
        Side::Blue => (kind, Position::new(pos.x, BOARD_HEIGHT - 1 - pos.y)),
    })
}

pub const ENGINE_NAME: &str = "janggi 0.1.0";
