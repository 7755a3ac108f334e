use crate::models::common::Vector2;

/// 移動可能なエージェントのインターフェース
///
/// 到達判定や距離計算はこのトレイト越しに位置を参照します。
pub trait IMovable {
    /// 現在位置の取得
    fn get_position(&self) -> Vector2;
}
