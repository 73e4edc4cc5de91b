/*
 * 对局控制：轮次、提交走子、胜负状态
 *
 * 提交一步棋的流程
 * 1. 对局已结束 -> 拒绝
 * 2. 坐标越界、起点无子、不是当前走棋方的棋子（free_movement 时跳过）-> 拒绝
 * 3. 终点不在该棋子最近一次计算出的合法落点中 -> 拒绝
 * 4. 试走并重算全盘
 * 5. 走完后己方被将军 -> 回滚并拒绝（不能送将）
 * 6. 确认走子、交换走棋方；新的走棋方被将军时进行将死搜索
 */

use std::fmt;

use common::{ParseSquareError, Position, Side};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board::{Board, Kind, Piece},
    movegen::{refresh, Analysis},
    search::checkmate_search,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Unfinished,
    Won(Side),
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Unfinished => f.write_str("UNFINISHED"),
            GameState::Won(Side::Blue) => f.write_str("BLUE_WON"),
            GameState::Won(Side::Red) => f.write_str("RED_WON"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GameConfig {
    /// 允许移动任意一方的棋子，调试用
    pub free_movement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game already over")]
    GameOver,
    #[error(transparent)]
    UnknownSquare(#[from] ParseSquareError),
    #[error("square {0} is outside the board")]
    OutOfBoard(Position),
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error("{found:?} piece moved on {expected:?}'s turn")]
    WrongSide { expected: Side, found: Side },
    #[error("{from} -> {to} is not a legal destination")]
    IllegalDestination { from: Position, to: Position },
    #[error("{from} -> {to} leaves the general in check")]
    SelfCheck { from: Position, to: Position },
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Move {
    pub side: Side,
    pub kind: Kind,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Kind>,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

pub struct Janggi {
    board: Board,
    turn: Side,
    state: GameState,
    analysis: Analysis,
    config: GameConfig,
}

impl Default for Janggi {
    fn default() -> Self {
        Janggi::new(GameConfig::default())
    }
}

impl Janggi {
    // 固定开局，蓝方先走
    pub fn new(config: GameConfig) -> Self {
        Janggi::from_board(Board::init(), Side::Blue, config)
    }

    /// 从任意局面开始；走棋方一开始就被将军时立即做将死判定
    pub fn from_board(board: Board, turn: Side, config: GameConfig) -> Self {
        let analysis = refresh(&board);
        let mut game = Janggi {
            board,
            turn,
            state: GameState::Unfinished,
            analysis,
            config,
        };
        game.test_checkmate();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.analysis.is_checked(side)
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.board.piece_at(pos)
    }

    pub fn legal_destinations(&self, pos: Position) -> &[Position] {
        match self.board.occupant(pos) {
            Some(id) => self.analysis.legal_destinations(id),
            None => &[],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn set_free_movement(&mut self, enabled: bool) {
        self.config.free_movement = enabled;
    }

    /// 以格子标签提交走子，例如 ("a7", "a6")；只返回是否被接受
    pub fn submit_move(&mut self, from: &str, to: &str) -> bool {
        match self.play(from, to) {
            Ok(m) => {
                debug!(%m, "move accepted");
                true
            }
            Err(err) => {
                debug!(from, to, %err, "move rejected");
                false
            }
        }
    }

    pub fn play(&mut self, from: &str, to: &str) -> Result<Move, MoveError> {
        if self.state != GameState::Unfinished {
            return Err(MoveError::GameOver);
        }
        let from: Position = from.parse()?;
        let to: Position = to.parse()?;
        self.make_move(from, to)
    }

    pub fn make_move(&mut self, from: Position, to: Position) -> Result<Move, MoveError> {
        if self.state != GameState::Unfinished {
            return Err(MoveError::GameOver);
        }
        for pos in [from, to] {
            if !pos.in_board() {
                return Err(MoveError::OutOfBoard(pos));
            }
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        let (id, side, kind) = (piece.id, piece.side, piece.kind);
        if !self.config.free_movement && side != self.turn {
            return Err(MoveError::WrongSide {
                expected: self.turn,
                found: side,
            });
        }
        if !self.analysis.legal_destinations(id).contains(&to) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        let Some(spec) = self.board.speculate(from, to) else {
            return Err(MoveError::EmptySquare(from));
        };
        let analysis = refresh(&spec);
        // 不能在被将军的状态下结束自己的回合；spec 离开作用域即回滚
        if analysis.is_checked(side) {
            return Err(MoveError::SelfCheck { from, to });
        }
        let captured = spec.commit().map(|victim| self.board.piece(victim).kind);
        self.analysis = analysis;

        let m = Move {
            side,
            kind,
            from,
            to,
            captured,
        };
        info!(side = side.name(), kind = kind.code(), %m, ?captured, "move played");

        self.turn = self.turn.next();
        self.test_checkmate();
        Ok(m)
    }

    fn test_checkmate(&mut self) {
        if !self.analysis.is_checked(self.turn) {
            return;
        }
        if checkmate_search(&mut self.board, &mut self.analysis, self.turn) {
            let winner = self.turn.next();
            self.state = GameState::Won(winner);
            info!(winner = winner.name(), "checkmate");
        }
    }
}
