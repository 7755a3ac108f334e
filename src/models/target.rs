use std::fmt;

use crate::models::{common::Vector2, traits::IMovable};

/// 名前付きの目標地点
///
/// ロボットが位置を完全に一致させたときだけ到達とみなします（許容誤差なし）。
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// 目標地点の位置
    pub position: Vector2,
    /// 目標地点の名前
    pub name: String,
}

impl Target {
    pub fn new(position: Vector2, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }

    /// 到達判定
    ///
    /// x, y ともに厳密に一致する場合のみ `true`。
    pub fn is_reached_by<M: IMovable>(&self, agent: &M) -> bool {
        let position = agent.get_position();
        position.x == self.position.x && position.y == self.position.y
    }

    /// エージェントからこの目標地点までの距離
    pub fn distance_from<M: IMovable>(&self, agent: &M) -> f64 {
        agent.get_position().distance_to(&self.position)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target '{}' at ({}, {})", self.name, self.position.x, self.position.y)
    }
}
