/**
 * 详细中文注释 - 引擎核心库入口
 *
 * 说明
 * - board：棋盘与棋子，走子的应用/撤销与试走回滚
 * - rules：七种棋子的走法判定
 * - movegen：全盘合法落点与将军标志的重算
 * - search：被将军时的将死搜索
 * - game：对局控制（轮次、提交走子、胜负）
 * - engine / render：文本协议与文本棋盘，只使用 game 的只读接口
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod render;
pub mod rules;
pub mod search;

pub use board::{Board, Kind, Piece, PieceId};
pub use game::{GameConfig, GameState, Janggi, Move, MoveError};
