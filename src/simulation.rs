//! # Simulation モジュール
//!
//! シナリオからフィールドを組み立てて巡回ミッションを実行するエンジンを提供します。
//!
//! ## 処理順序
//!
//! 1. **初期化**: シナリオのロボットと経路を `Field` に登録
//! 2. **実行**: 追加順にロボット1台ずつ経路を最後まで巡回
//! 3. **集計**: 各ロボットの最終位置、最終目標への到達、経路の移動コストをレポート化
//!
//! 時間刻みはありません。経路はロボットごとに一括で実行されます。

use std::fmt;

use tracing::{debug, info, warn};

use crate::models::*;
use crate::scenario::{ScenarioConfig, ScenarioError};

pub struct SimulationEngine {
    pub field: Field,
    pub ground: GroundType,
    pub starts: Vec<Vector2>,
    pub initialized: bool,

    pub scenario_config: ScenarioConfig,
    pub verbose_level: u8,
}

impl SimulationEngine {
    pub fn new(scenario: ScenarioConfig, verbose_level: u8) -> Self {
        let ground = scenario.ground;

        Self {
            field: Field::new(),
            ground,
            starts: Vec::new(),
            initialized: false,
            scenario_config: scenario,
            verbose_level,
        }
    }

    /// シナリオの地面設定を上書き
    pub fn with_ground(mut self, ground: GroundType) -> Self {
        self.ground = ground;
        self
    }

    /// シナリオからフィールドを組み立てる
    ///
    /// 再度呼び出した場合はフィールドを作り直します。
    pub fn initialize(&mut self) -> Result<(), ScenarioError> {
        if self.verbose_level > 0 {
            info!("initializing simulation engine");
        }

        self.field = Field::new();
        self.starts.clear();
        self.initialized = false;

        self.initialize_robots()?;
        self.initialize_route()?;
        self.initialized = true;

        if self.verbose_level > 0 {
            info!(
                robots = self.field.robots().len(),
                targets = self.field.route().map(Route::count).unwrap_or(0),
                ground = %self.ground,
                "initialization complete"
            );
        }

        Ok(())
    }

    fn initialize_robots(&mut self) -> Result<(), ScenarioError> {
        for start in self.scenario_config.robot_starts()? {
            if self.verbose_level > 1 {
                debug!(index = self.starts.len(), %start, "robot registered");
            }
            self.field.add_robot(Robot::new(start));
            self.starts.push(start);
        }

        Ok(())
    }

    fn initialize_route(&mut self) -> Result<(), ScenarioError> {
        match self.scenario_config.build_route()? {
            Some(route) => {
                if self.verbose_level > 1 {
                    for target in route.targets() {
                        debug!(name = %target.name, position = %target.position, "target registered");
                    }
                }
                self.field.set_route(route);
            }
            None => warn!("scenario has no route"),
        }

        Ok(())
    }

    pub fn run(&mut self) -> Result<MissionReport, SimulationError> {
        if !self.initialized {
            return Err(SimulationError::NotInitialized);
        }

        info!("=== mission start ===");
        self.field.run()?;
        info!("=== mission complete ===");

        let report = self.build_report();
        if !report.all_reached() {
            warn!("some robots stopped short of the last target");
        }
        Ok(report)
    }

    fn build_report(&self) -> MissionReport {
        let Some(route) = self.field.route() else {
            return MissionReport { robots: Vec::new() };
        };
        let last_target = route.targets().last();

        let robots = self
            .field
            .robots()
            .iter()
            .zip(&self.starts)
            .enumerate()
            .map(|(index, (robot, start))| RobotReport {
                index,
                start: *start,
                end: robot.position,
                reached_last_target: last_target.is_none_or(|t| t.is_reached_by(robot)),
                remaining_distance: last_target.map(|t| t.distance_from(robot)).unwrap_or(0.0),
                path_length: route.path_length(*start),
                movement_cost: route.movement_cost(*start, self.ground),
                travel_time: route.travel_time(*start, self.ground),
            })
            .collect();

        MissionReport { robots }
    }
}

/// ロボット1台分の実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct RobotReport {
    pub index: usize,
    pub start: Vector2,
    pub end: Vector2,
    pub reached_last_target: bool,
    /// 最終目標地点までの残り距離（小数部分の移動が切り捨てられた分）
    pub remaining_distance: f64,
    /// 各目標地点を直線で結んだ経路長
    pub path_length: f64,
    pub movement_cost: f64,
    /// 秒
    pub travel_time: f64,
}

/// ミッション全体の実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub robots: Vec<RobotReport>,
}

impl MissionReport {
    pub fn all_reached(&self) -> bool {
        self.robots.iter().all(|r| r.reached_last_target)
    }

    pub fn print(&self) {
        println!("=== Mission report ===");
        for r in &self.robots {
            println!("Robot #{} -> {}", r.index, r.end);
            println!(
                "  start {}  reached: {} (remaining {:.2})  path: {:.2}  cost: {:.2}  time: {:.2}s",
                r.start,
                if r.reached_last_target { "yes" } else { "no" },
                r.remaining_distance,
                r.path_length,
                r.movement_cost,
                r.travel_time
            );
        }
    }
}

/// シミュレーション実行エラー
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    NotInitialized,
    Field(FieldError),
}

impl From<FieldError> for SimulationError {
    fn from(err: FieldError) -> Self {
        SimulationError::Field(err)
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NotInitialized => write!(f, "simulation engine is not initialized"),
            SimulationError::Field(err) => write!(f, "mission failed: {}", err),
        }
    }
}

impl std::error::Error for SimulationError {}
