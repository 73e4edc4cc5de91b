/*
 * Checkmate Search Module - 将死搜索
 *
 * 被将军的一方开始行棋时调用：
 * - 逐个尝试己方每个棋子的每个合法落点（试走）
 * - 对试走后的局面，检查对方是否还有任何一步能吃掉己方的将
 * - 仍然被将的落点从合法落点中剔除；全部剔除则判负
 *
 * 每次试走都由 Speculation 守卫负责回滚，提前跳出也不会遗留修改
 */

use common::{Position, Side};
use tracing::trace;

use crate::{
    board::{Board, Kind, PieceId},
    movegen::Analysis,
    rules::evaluate,
};

/// 返回 true 表示 side 已被将死
pub fn checkmate_search(board: &mut Board, analysis: &mut Analysis, side: Side) -> bool {
    analysis.reset_side(side);

    let friendly: Vec<(PieceId, Kind, Position)> = board
        .pieces()
        .filter(|p| p.belong_to(side))
        .map(|p| (p.id, p.kind, p.position))
        .collect();

    let mut candidates = 0;
    for (id, kind, from) in friendly {
        analysis.reset_piece(id);
        for to in Position::all() {
            if !evaluate(board, side, kind, from, to).legal {
                continue;
            }
            candidates += 1;

            let escapes = match board.speculate(from, to) {
                Some(spec) => !is_attacked(&spec, side, to),
                None => false,
            };
            if escapes {
                trace!(%from, %to, "escape found");
                analysis.record(id, side, to);
            }
        }
    }

    let mated = analysis.total_targets(side).is_empty();
    trace!(side = side.name(), candidates, mated, "checkmate search finished");
    mated
}

/// 对方是否有一步能吃掉 side 的将；moved_to 是己方刚试走到的格子
pub fn is_attacked(board: &Board, side: Side, moved_to: Position) -> bool {
    let Some(general) = board.general(side).map(|g| g.position) else {
        return true;
    };
    board
        .pieces()
        .filter(|enemy| !enemy.belong_to(side))
        // 刚被己方吃掉的棋子不参与应着
        .filter(|enemy| enemy.position != moved_to)
        .any(|enemy| {
            evaluate(board, enemy.side, enemy.kind, enemy.position, general).discovered_check_on
                == Some(side)
        })
}
