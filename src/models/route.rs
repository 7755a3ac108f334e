use tracing::trace;

use crate::models::{
    common::Vector2,
    ground::{self, GroundType},
    robot::Robot,
    target::Target,
};

/// 順序付きの目標地点リスト
///
/// 追加した順に巡回します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    targets: Vec<Target>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目標地点を末尾に追加
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// 目標地点の数
    pub fn count(&self) -> usize {
        self.targets.len()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// ロボットに全目標地点を順番に巡回させる
    ///
    /// 通過済みの地点には戻りません。障害物や衝突は考慮しません。
    pub fn execute(&self, robot: &mut Robot) {
        for target in &self.targets {
            robot.go_to(target.position);
            trace!(waypoint = %target.name, position = %robot.position, "target visited");
        }
    }

    /// `from` から各目標地点を直線で結んだ経路長
    pub fn path_length(&self, from: Vector2) -> f64 {
        self.legs(from).map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// 経路全体の移動コスト
    pub fn movement_cost(&self, from: Vector2, ground: GroundType) -> f64 {
        self.legs(from)
            .map(|(a, b)| ground::movement_cost(&a, &b, ground))
            .sum()
    }

    /// 経路全体の所要時間（秒）
    pub fn travel_time(&self, from: Vector2, ground: GroundType) -> f64 {
        self.legs(from)
            .map(|(a, b)| ground::travel_time(&a, &b, ground))
            .sum()
    }

    fn legs(&self, from: Vector2) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        let starts = std::iter::once(from).chain(self.targets.iter().map(|t| t.position));
        starts.zip(self.targets.iter().map(|t| t.position))
    }
}
