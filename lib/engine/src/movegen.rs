// 走法生成：对整盘棋逐子逐格判定，得到每个棋子的合法落点、双方的落点总表以及将军标志
// 只读取棋盘，多次调用结果相同

use common::{Position, Side};
use tracing::trace;

use crate::{
    board::{Board, PieceId},
    rules::evaluate,
};

/// 一次 refresh 的结果；每步之后整体重算，不跨步复用
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Analysis {
    // 按 PieceId 索引；被吃的棋子为空
    legal: Vec<Vec<Position>>,
    // 双方所有合法落点（含原地不动），按 Side::index 索引
    targets: [Vec<Position>; 2],
    checked: [bool; 2],
}

impl Analysis {
    pub fn legal_destinations(&self, id: PieceId) -> &[Position] {
        self.legal.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_targets(&self, side: Side) -> &[Position] {
        &self.targets[side.index()]
    }

    pub fn is_checked(&self, side: Side) -> bool {
        self.checked[side.index()]
    }

    pub(crate) fn reset_side(&mut self, side: Side) {
        self.targets[side.index()].clear();
    }

    pub(crate) fn reset_piece(&mut self, id: PieceId) {
        if let Some(legal) = self.legal.get_mut(id.0) {
            legal.clear();
        }
    }

    pub(crate) fn record(&mut self, id: PieceId, side: Side, to: Position) {
        if self.legal.len() <= id.0 {
            self.legal.resize(id.0 + 1, vec![]);
        }
        self.legal[id.0].push(to);
        self.targets[side.index()].push(to);
    }
}

pub fn refresh(board: &Board) -> Analysis {
    let mut analysis = Analysis {
        legal: vec![vec![]; board.all_pieces().len()],
        ..Default::default()
    };

    for piece in board.pieces() {
        for to in Position::all() {
            let eval = evaluate(board, piece.side, piece.kind, piece.position, to);
            if !eval.legal {
                continue;
            }
            analysis.record(piece.id, piece.side, to);
            if let Some(side) = eval.discovered_check_on {
                analysis.checked[side.index()] = true;
            }
        }
    }

    trace!(
        blue = analysis.targets[0].len(),
        red = analysis.targets[1].len(),
        "refreshed legal destinations"
    );
    analysis
}
