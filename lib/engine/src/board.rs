/*
 * 详细中文注释 - 棋盘模块（Board 与棋子表示）
 *
 * 设计要点
 * - 棋盘尺寸为 9 列 x 10 行，红方在上（y = 0..3），蓝方在下（y = 6..9）
 * - 棋子在开局时一次性创建，之后只会移动或被吃，不会重新创建
 * - cells 保存每个格子的占用者（PieceId 或空），pieces 保存每个棋子的阵营、棋种与当前坐标
 * - 两者必须始终一致，只有试走（Speculation）期间例外，且试走结束时一定会还原
 *
 * 主要功能
 * - 初始化固定开局、构造空棋盘并摆子（测试与嵌入使用）
 * - 走子的应用与撤销（apply / undo），以及带自动回滚的试走（speculate）
 */

use std::ops::Deref;

use common::{Position, Side, BOARD_HEIGHT, BOARD_WIDTH};

use crate::constant::start_layout;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Soldier,  // 兵/卒
    Cannon,   // 包
    Chariot,  // 车
    Elephant, // 象
    Horse,    // 马
    Guard,    // 士
    General,  // 将
}

impl Kind {
    pub fn code(&self) -> &'static str {
        match self {
            Kind::Soldier => "So",
            Kind::Cannon => "Ca",
            Kind::Chariot => "Ch",
            Kind::Elephant => "El",
            Kind::Horse => "Ho",
            Kind::Guard => "Gu",
            Kind::General => "Gen",
        }
    }

    /// 只能在本方九宫内活动的棋种
    pub fn is_palace_bound(&self) -> bool {
        matches!(self, Kind::Guard | Kind::General)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceId(pub usize);

#[derive(Clone, PartialEq, Debug)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub kind: Kind,
    pub position: Position,
    pub captured: bool,
    ordinal: usize,
}

impl Piece {
    pub fn belong_to(&self, side: Side) -> bool {
        self.side == side
    }

    /// 显示名：阵营字母 + 棋种代码 + 序号，例如 rCh1、bSo4；将只有一个，不带序号
    pub fn name(&self) -> String {
        if self.kind == Kind::General {
            format!("{}{}", self.side.letter(), self.kind.code())
        } else {
            format!("{}{}{}", self.side.letter(), self.kind.code(), self.ordinal)
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    // cells[y][x]
    cells: [[Option<PieceId>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pieces: Vec<Piece>,
}

/// 一次 apply 的还原凭据，交给 undo 就能精确撤销这一步
#[must_use]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Undo {
    pub piece: PieceId,
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceId>,
}

impl Board {
    // 固定开局，红方棋子先编号，蓝方随后
    pub fn init() -> Self {
        let mut board = Board::empty();
        for side in [Side::Red, Side::Blue] {
            for (kind, pos) in start_layout(side) {
                board.place(side, kind, pos);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            pieces: vec![],
        }
    }

    /// 在空格上摆一个新棋子；格子越界或已被占用时返回 None
    pub fn place(&mut self, side: Side, kind: Kind, pos: Position) -> Option<PieceId> {
        if !pos.in_board() || self.occupant(pos).is_some() {
            return None;
        }
        let id = PieceId(self.pieces.len());
        let ordinal = self
            .pieces
            .iter()
            .filter(|p| p.side == side && p.kind == kind)
            .count()
            + 1;
        self.pieces.push(Piece {
            id,
            side,
            kind,
            position: pos,
            captured: false,
            ordinal,
        });
        self.set_occupant(pos, Some(id));
        Some(id)
    }

    pub fn occupant(&self, pos: Position) -> Option<PieceId> {
        if pos.in_board() {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.occupant(pos).map(|id| &self.pieces[id.0])
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupant(pos).is_some()
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// 全部棋子（包括已被吃的），按编号排列
    pub fn all_pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// 场上棋子，按列优先的扫描顺序
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos))
    }

    pub fn general(&self, side: Side) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.side == side && p.kind == Kind::General && !p.captured)
    }

    fn set_occupant(&mut self, pos: Position, occupant: Option<PieceId>) {
        self.cells[pos.y as usize][pos.x as usize] = occupant;
    }

    // 应用走子：移走终点原有的棋子（记下以便回滚），再移动棋子
    // 原地不动（from == to）不吃子
    pub fn apply(&mut self, from: Position, to: Position) -> Option<Undo> {
        let piece = self.occupant(from)?;
        if !to.in_board() {
            return None;
        }
        let captured = if from == to { None } else { self.occupant(to) };
        if let Some(victim) = captured {
            self.pieces[victim.0].captured = true;
        }
        self.set_occupant(from, None);
        self.set_occupant(to, Some(piece));
        self.pieces[piece.0].position = to;
        Some(Undo {
            piece,
            from,
            to,
            captured,
        })
    }

    // 撤销走子：先还原终点的被吃子，再把棋子放回起点
    pub fn undo(&mut self, undo: Undo) {
        self.set_occupant(undo.to, undo.captured);
        if let Some(victim) = undo.captured {
            self.pieces[victim.0].captured = false;
        }
        self.set_occupant(undo.from, Some(undo.piece));
        self.pieces[undo.piece.0].position = undo.from;
    }

    /// 试走：返回的守卫在离开作用域时无条件回滚，除非调用了 commit
    pub fn speculate(&mut self, from: Position, to: Position) -> Option<Speculation<'_>> {
        let undo = self.apply(from, to)?;
        Some(Speculation {
            board: self,
            undo: Some(undo),
        })
    }

    /// cells 与每个棋子记录的坐标是否一致
    pub fn is_consistent(&self) -> bool {
        let pieces_ok = self.pieces.iter().all(|p| {
            p.captured || self.occupant(p.position) == Some(p.id)
        });
        let cells_ok = Position::all().all(|pos| match self.occupant(pos) {
            Some(id) => {
                let p = &self.pieces[id.0];
                !p.captured && p.position == pos
            }
            None => true,
        });
        pieces_ok && cells_ok
    }
}

pub struct Speculation<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl Speculation<'_> {
    pub fn captured(&self) -> Option<&Piece> {
        self.undo
            .and_then(|undo| undo.captured)
            .map(|id| self.board.piece(id))
    }

    /// 确认走子，不再回滚；返回被吃的棋子
    pub fn commit(mut self) -> Option<PieceId> {
        self.undo.take().and_then(|undo| undo.captured)
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.undo(undo);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;

    #[test]
    fn test_init() {
        let board = Board::init();
        assert_eq!(board.pieces().count(), 32);
        assert!(board.is_consistent());
        assert_eq!(board.piece_at(Position::new(4, 1)).unwrap().name(), "rGen");
        assert_eq!(board.piece_at(Position::new(4, 8)).unwrap().name(), "bGen");
        assert_eq!(board.piece_at(Position::new(1, 9)).unwrap().name(), "bEl1");
        assert_eq!(board.piece_at(Position::new(8, 6)).unwrap().name(), "bSo5");
        assert_eq!(board.piece_at(Position::new(7, 2)).unwrap().name(), "rCa2");
        assert!(board.piece_at(Position::new(4, 4)).is_none());
        assert_eq!(board.general(Side::Blue).unwrap().position, Position::new(4, 8));
    }

    #[test]
    fn test_place() {
        let mut board = Board::empty();
        assert!(board.place(Side::Red, Kind::Horse, Position::new(2, 2)).is_some());
        assert!(board.place(Side::Blue, Kind::Horse, Position::new(2, 2)).is_none());
        assert!(board.place(Side::Blue, Kind::Horse, Position::new(9, 2)).is_none());
        assert!(board.general(Side::Red).is_none());
    }

    #[test]
    fn test_apply_and_undo() {
        let mut board = Board::init();
        let before = board.clone();
        for _ in 0..1_000 {
            let undo = board.apply(Position::new(0, 9), Position::new(0, 7)).unwrap();
            board.undo(undo);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_and_undo() {
        let mut board = Board::empty();
        let chariot = board.place(Side::Blue, Kind::Chariot, Position::new(0, 9)).unwrap();
        let soldier = board.place(Side::Red, Kind::Soldier, Position::new(0, 3)).unwrap();
        let before = board.clone();

        let undo = board.apply(Position::new(0, 9), Position::new(0, 3)).unwrap();
        assert_eq!(undo.captured, Some(soldier));
        assert!(board.piece(soldier).captured);
        assert_eq!(board.occupant(Position::new(0, 3)), Some(chariot));
        assert!(!board.is_occupied(Position::new(0, 9)));
        assert!(board.is_consistent());

        board.undo(undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_stay_does_not_capture() {
        let mut board = Board::init();
        let before = board.clone();
        let undo = board.apply(Position::new(4, 8), Position::new(4, 8)).unwrap();
        assert_eq!(undo.captured, None);
        assert!(board.is_consistent());
        board.undo(undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_speculation_rolls_back() {
        let mut board = Board::init();
        let before = board.clone();
        {
            let spec = board
                .speculate(Position::new(0, 6), Position::new(0, 5))
                .unwrap();
            assert!(spec.is_occupied(Position::new(0, 5)));
            assert!(spec.captured().is_none());
        }
        assert_eq!(board, before);
        assert!(board.speculate(Position::new(4, 4), Position::new(4, 5)).is_none());
    }

    #[test]
    fn test_speculation_commit() {
        let mut board = Board::init();
        let spec = board
            .speculate(Position::new(0, 6), Position::new(0, 5))
            .unwrap();
        assert_eq!(spec.commit(), None);
        assert!(board.is_occupied(Position::new(0, 5)));
        assert!(!board.is_occupied(Position::new(0, 6)));
        assert!(board.is_consistent());
    }
}
