use std::fmt;

use crate::models::{common::Vector2, traits::IMovable};

/// 2次元平面上を移動するロボット
///
/// 一度に1軸ずつ整数ステップで移動します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Robot {
    /// ロボットの現在位置
    pub position: Vector2,
}

impl Robot {
    pub fn new(position: Vector2) -> Self {
        Self { position }
    }

    /// x軸方向に `n` 歩進む（負なら左へ）
    pub fn step_right(&mut self, n: i64) {
        self.position.add_in_place((n as f64, 0.0));
    }

    /// y軸方向に `n` 歩進む（負なら下へ）
    pub fn step_up(&mut self, n: i64) {
        self.position.add_in_place((0.0, n as f64));
    }

    /// 他のロボットとのユークリッド距離
    pub fn distance_to(&self, other: &Robot) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// 目標位置まで軸ごとに1歩ずつ移動する
    ///
    /// 先にx軸、次にy軸を歩きます。各軸の歩数は差分を0方向に切り捨てた
    /// 整数の絶対値なので、小数部分の差はそのまま残ります。
    pub fn go_to(&mut self, target: Vector2) {
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;

        let step_x = if dx > 0.0 { 1 } else { -1 };
        for _ in 0..axis_steps(dx) {
            self.step_right(step_x);
        }

        let step_y = if dy > 0.0 { 1 } else { -1 };
        for _ in 0..axis_steps(dy) {
            self.step_up(step_y);
        }
    }
}

fn axis_steps(delta: f64) -> u64 {
    delta.trunc().abs() as u64
}

impl IMovable for Robot {
    fn get_position(&self) -> Vector2 {
        self.position
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Robot at {}", self.position)
    }
}
