/* 走法规则：按棋种判定一步走子 (from, to) 是否合法 */
//
// 所有棋种共用的约定
// - 原地不动（to == from）总是合法，不吃子
// - 终点有己方棋子则不合法
// - 终点是对方的将：走法合法，同时报告对方被将军
//
// 判定只读取棋盘，不修改任何状态；结果由 Evaluation 返回，由调用方汇总

use common::{Palace, Position, Side};

use crate::board::{Board, Kind};

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Evaluation {
    pub legal: bool,
    /// 这一步会吃掉哪一方的将
    pub discovered_check_on: Option<Side>,
}

impl Evaluation {
    pub const ILLEGAL: Evaluation = Evaluation {
        legal: false,
        discovered_check_on: None,
    };
    pub const LEGAL: Evaluation = Evaluation {
        legal: true,
        discovered_check_on: None,
    };
}

pub fn evaluate(board: &Board, side: Side, kind: Kind, from: Position, to: Position) -> Evaluation {
    if !from.in_board() || !to.in_board() {
        return Evaluation::ILLEGAL;
    }
    if from == to {
        return Evaluation::LEGAL;
    }

    let target = board.piece_at(to);
    if target.is_some_and(|p| p.belong_to(side)) {
        return Evaluation::ILLEGAL;
    }

    let geometry_ok = match kind {
        Kind::Soldier => soldier_step(side, from, to),
        Kind::Guard | Kind::General => palace_step(side, from, to),
        Kind::Chariot => line_between(from, to).is_some_and(|between| between.iter().all(|p| !board.is_occupied(*p))),
        Kind::Cannon => cannon_jump(board, from, to),
        Kind::Elephant => leap(board, from, to, 2),
        Kind::Horse => leap(board, from, to, 1),
    };
    if !geometry_ok {
        return Evaluation::ILLEGAL;
    }

    // 包不能吃包
    if kind == Kind::Cannon && target.is_some_and(|p| p.kind == Kind::Cannon) {
        return Evaluation::ILLEGAL;
    }

    Evaluation {
        legal: true,
        discovered_check_on: target.filter(|p| p.kind == Kind::General).map(|p| p.side),
    }
}

// 兵：向前、向左、向右一格；在对方九宫内还可以沿斜线向前一格
fn soldier_step(side: Side, from: Position, to: Position) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let forward = side.forward();

    let straight = (dx == 0 && dy == forward) || (dy == 0 && dx.abs() == 1);
    let diagonal = dy == forward && Palace::of(side.next()).is_diagonal_step(from, to);
    straight || diagonal
}

// 士、将：一格直走，或沿九宫斜线一格；终点必须在本方九宫内
fn palace_step(side: Side, from: Position, to: Position) -> bool {
    let palace = Palace::of(side);
    if !palace.contains(to) {
        return false;
    }
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    dx + dy == 1 || palace.is_diagonal_step(from, to)
}

// 车、包共用的直线几何：同行、同列，或者起止点同在一个九宫的斜线上
// 返回途经的格子（不含起点与终点），几何不成立时返回 None
fn line_between(from: Position, to: Position) -> Option<Vec<Position>> {
    if from.x == to.x || from.y == to.y {
        let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
        let distance = (to.x - from.x).abs().max((to.y - from.y).abs());
        return Some((1..distance).map(|step| from.offset(sx * step, sy * step)).collect());
    }
    let palace = Palace::containing(from)?;
    if palace.contains(to) && palace.is_diagonal_line(from, to) {
        Some(palace.diagonal_between(from, to))
    } else {
        None
    }
}

// 包：必须正好越过一个棋子，且越过的棋子不能是包
fn cannon_jump(board: &Board, from: Position, to: Position) -> bool {
    let Some(between) = line_between(from, to) else {
        return false;
    };
    let mut screens = between.iter().filter_map(|pos| board.piece_at(*pos));
    match (screens.next(), screens.next()) {
        (Some(screen), None) => screen.kind != Kind::Cannon,
        _ => false,
    }
}

// 象、马：先直走一格，再向外斜走 diagonals 格；途经的每一格都不能有子
// 马 diagonals = 1，象 diagonals = 2
fn leap(board: &Board, from: Position, to: Position, diagonals: i32) -> bool {
    for (dx, dy) in ORTHOGONAL {
        // 与直走方向垂直的两个分量
        for (px, py) in [(dy, dx), (-dy, -dx)] {
            let (sx, sy) = (dx + px, dy + py);
            if from.offset(dx + sx * diagonals, dy + sy * diagonals) != to {
                continue;
            }
            let mut path = vec![from.offset(dx, dy)];
            for step in 1..diagonals {
                path.push(from.offset(dx + sx * step, dy + sy * step));
            }
            return path.iter().all(|pos| !board.is_occupied(*pos));
        }
    }
    false
}
