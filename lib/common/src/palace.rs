// 九宫：3x3 区域，中心与四角之间由斜线相连，整盘棋只有这些斜线上可以斜走

use crate::position::{Position, Side};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palace {
    center: Position,
}

impl Palace {
    pub const RED: Palace = Palace {
        center: Position::new(4, 1),
    };
    pub const BLUE: Palace = Palace {
        center: Position::new(4, 8),
    };

    pub fn of(side: Side) -> Palace {
        match side {
            Side::Blue => Palace::BLUE,
            Side::Red => Palace::RED,
        }
    }

    /// 返回包含该格子的九宫
    pub fn containing(pos: Position) -> Option<Palace> {
        [Palace::RED, Palace::BLUE]
            .into_iter()
            .find(|palace| palace.contains(pos))
    }

    pub fn contains(&self, pos: Position) -> bool {
        (pos.x - self.center.x).abs() <= 1 && (pos.y - self.center.y).abs() <= 1
    }

    /// 中心或四角之一
    pub fn on_diagonal(&self, pos: Position) -> bool {
        self.contains(pos) && (pos.x - self.center.x).abs() == (pos.y - self.center.y).abs()
    }

    /// 一步斜走：必须是九宫内某条斜线上相邻的两个点
    pub fn is_diagonal_step(&self, from: Position, to: Position) -> bool {
        self.on_diagonal(from)
            && self.on_diagonal(to)
            && (to.x - from.x).abs() == 1
            && (to.y - from.y).abs() == 1
    }

    /// 沿九宫斜线的直线移动（一步，或经过中心的角到角两步）
    pub fn is_diagonal_line(&self, from: Position, to: Position) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        self.on_diagonal(from) && self.on_diagonal(to) && dx != 0 && dx.abs() == dy.abs()
    }

    /// 斜线移动途经的格子（不含起点与终点）
    pub fn diagonal_between(&self, from: Position, to: Position) -> Vec<Position> {
        if !self.is_diagonal_line(from, to) {
            return vec![];
        }
        let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
        (1..(to.x - from.x).abs())
            .map(|step| from.offset(sx * step, sy * step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert!(Palace::RED.contains(Position::new(3, 0)));
        assert!(Palace::RED.contains(Position::new(5, 2)));
        assert!(!Palace::RED.contains(Position::new(4, 3)));
        assert!(Palace::BLUE.contains(Position::new(4, 9)));
        assert!(!Palace::BLUE.contains(Position::new(2, 8)));
        assert_eq!(Palace::containing(Position::new(5, 7)), Some(Palace::BLUE));
        assert_eq!(Palace::containing(Position::new(4, 4)), None);
        assert_eq!(Palace::of(Side::Red), Palace::RED);
    }

    #[test]
    fn test_diagonals() {
        let palace = Palace::BLUE;
        assert!(palace.on_diagonal(Position::new(4, 8)));
        assert!(palace.on_diagonal(Position::new(3, 9)));
        assert!(!palace.on_diagonal(Position::new(4, 9)));

        assert!(palace.is_diagonal_step(Position::new(3, 7), Position::new(4, 8)));
        // 边中点之间不连斜线
        assert!(!palace.is_diagonal_step(Position::new(4, 7), Position::new(5, 8)));
        assert!(!palace.is_diagonal_step(Position::new(3, 7), Position::new(5, 9)));

        assert!(palace.is_diagonal_line(Position::new(3, 7), Position::new(5, 9)));
        assert!(palace.is_diagonal_line(Position::new(5, 7), Position::new(3, 9)));
        assert!(!palace.is_diagonal_line(Position::new(3, 7), Position::new(5, 7)));
        assert_eq!(
            palace.diagonal_between(Position::new(3, 7), Position::new(5, 9)),
            vec![Position::new(4, 8)]
        );
        assert!(palace
            .diagonal_between(Position::new(4, 8), Position::new(5, 9))
            .is_empty());
    }
}
