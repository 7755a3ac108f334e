use std::fmt;

use tracing::debug;

use crate::models::{robot::Robot, route::Route};

/// ロボット群と巡回経路を保持するフィールド
#[derive(Debug, Clone, Default)]
pub struct Field {
    robots: Vec<Robot>,
    route: Option<Route>,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// ロボットを追加
    pub fn add_robot(&mut self, robot: Robot) {
        self.robots.push(robot);
    }

    /// 巡回経路を設定（既存の経路は置き換え）
    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// 全ロボットに経路を実行させる
    ///
    /// 追加順に1台ずつ最後まで実行します（交互には動かしません）。
    /// 経路未設定の場合は何も動かさずに `FieldError::NoRoute` を返します。
    pub fn run(&mut self) -> Result<(), FieldError> {
        let route = self.route.as_ref().ok_or(FieldError::NoRoute)?;

        for (index, robot) in self.robots.iter_mut().enumerate() {
            let start = robot.position;
            route.execute(robot);
            debug!(robot = index, %start, end = %robot.position, "route executed");
        }

        Ok(())
    }

    /// 各ロボットの現在位置を1行ずつ返す
    pub fn state_lines(&self) -> Vec<String> {
        self.robots
            .iter()
            .enumerate()
            .map(|(i, r)| format!("Robot #{} -> {}", i, r.position))
            .collect()
    }
}

/// フィールド実行エラー
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    NoRoute,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoRoute => write!(f, "no route configured"),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{common::Vector2, target::Target};

    fn single_target_route(x: f64, y: f64) -> Route {
        let mut route = Route::new();
        route.add_target(Target::new(Vector2::new(x, y), "Objective"));
        route
    }

    #[test]
    fn test_run_without_route_fails() {
        let mut field = Field::new();
        field.add_robot(Robot::new(Vector2::new(1.0, 1.0)));

        assert_eq!(field.run(), Err(FieldError::NoRoute));
        assert_eq!(field.robots()[0].position, Vector2::new(1.0, 1.0));
        assert_eq!(FieldError::NoRoute.to_string(), "no route configured");
    }

    #[test]
    fn test_run_moves_every_robot() {
        let mut field = Field::new();
        field.add_robot(Robot::new(Vector2::new(0.0, 0.0)));
        field.add_robot(Robot::new(Vector2::new(1.0, 1.0)));
        field.set_route(single_target_route(3.0, 3.0));

        assert_eq!(field.run(), Ok(()));
        for robot in field.robots() {
            assert_eq!(robot.position, Vector2::new(3.0, 3.0));
        }
    }

    #[test]
    fn test_set_route_replaces_previous() {
        let mut field = Field::new();
        field.add_robot(Robot::default());
        field.set_route(single_target_route(3.0, 3.0));
        field.set_route(single_target_route(-2.0, 5.0));

        assert_eq!(field.route().map(Route::count), Some(1));
        field.run().unwrap();
        assert_eq!(field.robots()[0].position, Vector2::new(-2.0, 5.0));
    }

    #[test]
    fn test_run_with_no_robots() {
        let mut field = Field::new();
        field.set_route(single_target_route(1.0, 0.0));
        assert_eq!(field.run(), Ok(()));
        assert!(field.state_lines().is_empty());
    }

    #[test]
    fn test_state_lines() {
        let mut field = Field::new();
        field.add_robot(Robot::new(Vector2::new(0.0, 0.0)));
        field.add_robot(Robot::new(Vector2::new(1.0, 2.0)));
        assert_eq!(
            field.state_lines(),
            vec![
                "Robot #0 -> Position(x=0, y=0)".to_string(),
                "Robot #1 -> Position(x=1, y=2)".to_string(),
            ]
        );
    }
}
