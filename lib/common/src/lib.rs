/**
 * 详细中文注释 - 公共坐标库（common）
 *
 * 目标
 * - 定义 9 x 10 棋盘的坐标系、双方阵营以及两个九宫（palace）
 * - 提供格子标签（a1 ... i10）与内部坐标之间的双向转换
 *
 * 使用注意
 * - 本库不依赖棋子与棋盘状态，engine 与驱动程序都可以直接复用
 */
pub mod notation;
pub mod palace;
pub mod position;

pub use notation::ParseSquareError;
pub use palace::Palace;
pub use position::{in_board, Position, Side, BOARD_HEIGHT, BOARD_WIDTH};
