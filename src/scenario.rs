use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::{FIELD_LIMIT, GeometryError, GroundType, Route, Target, Vector2};

/// シナリオメタデータ
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioMeta {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// ロボット設定
#[derive(Debug, Deserialize, Serialize)]
pub struct RobotConfig {
    /// 初期位置 [x, y]（省略時は原点）
    #[serde(default = "origin_xy")]
    pub start: Vec<f64>,
}

/// 目標地点設定
#[derive(Debug, Deserialize, Serialize)]
pub struct TargetConfig {
    pub name: String,
    /// 位置 [x, y]
    pub position: Vec<f64>,
}

/// 巡回経路設定
#[derive(Debug, Deserialize, Serialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn origin_xy() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// シナリオ設定全体
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub meta: ScenarioMeta,
    #[serde(default)]
    pub ground: GroundType,
    pub robots: Vec<RobotConfig>,
    /// 省略した場合、実行時に経路未設定エラーになる
    #[serde(default)]
    pub route: Option<RouteConfig>,
}

impl ScenarioConfig {
    /// YAMLファイルからシナリオ設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();

        // ファイル存在チェック
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ScenarioError::IoError(path.to_path_buf(), e))?;

        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ScenarioError::ParseError(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// 設定の基本的な検証
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.robots.is_empty() {
            return Err(ScenarioError::ValidationError("at least one robot is required".to_string()));
        }

        for (index, robot) in self.robots.iter().enumerate() {
            check_position(&format!("robots[{}].start", index), &robot.start)?;
        }

        if let Some(route) = &self.route {
            for target in &route.targets {
                check_position(&format!("target '{}'", target.name), &target.position)?;
            }
        }

        Ok(())
    }

    /// ロボットの初期位置一覧
    pub fn robot_starts(&self) -> Result<Vec<Vector2>, ScenarioError> {
        self.robots
            .iter()
            .enumerate()
            .map(|(index, robot)| to_vector(&format!("robots[{}].start", index), &robot.start))
            .collect()
    }

    /// 経路設定から `Route` を組み立てる（未設定なら `None`）
    pub fn build_route(&self) -> Result<Option<Route>, ScenarioError> {
        let Some(config) = &self.route else {
            return Ok(None);
        };

        let mut route = Route::new();
        for target in &config.targets {
            let position = to_vector(&format!("target '{}'", target.name), &target.position)?;
            route.add_target(Target::new(position, target.name.clone()));
        }

        Ok(Some(route))
    }

    /// シナリオの概要を表示
    pub fn print_summary(&self) {
        println!("=== Scenario ===");
        println!("Name: {}", self.meta.name);
        if !self.meta.description.is_empty() {
            println!("Description: {}", self.meta.description);
        }
        println!("Version: {}", self.meta.version);
        println!("Ground: {}", self.ground);
        println!();

        println!("=== Robots ===");
        println!("Count: {}", self.robots.len());
        for (index, robot) in self.robots.iter().enumerate() {
            println!("  #{}: start {:?}", index, robot.start);
        }
        println!();

        println!("=== Route ===");
        match &self.route {
            Some(route) => {
                println!("Targets: {}", route.targets.len());
                for target in &route.targets {
                    println!("  {}: {:?}", target.name, target.position);
                }
            }
            None => println!("(none)"),
        }
    }
}

fn to_vector(label: &str, values: &[f64]) -> Result<Vector2, ScenarioError> {
    Vector2::try_from(values).map_err(|e| ScenarioError::InvalidPosition(label.to_string(), e))
}

fn check_position(label: &str, values: &[f64]) -> Result<(), ScenarioError> {
    let position = to_vector(label, values)?;
    if !position.is_finite() {
        return Err(ScenarioError::ValidationError(format!("{} must be finite", label)));
    }
    if !position.is_in_field_bounds() {
        return Err(ScenarioError::ValidationError(format!(
            "{} is outside the field (|x|, |y| <= {})",
            label, FIELD_LIMIT
        )));
    }
    Ok(())
}

/// シナリオ読み込みエラー
#[derive(Debug)]
pub enum ScenarioError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    InvalidPosition(String, GeometryError),
    ValidationError(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::FileNotFound(path) => {
                write!(f, "scenario file not found: {}", path.display())
            }
            ScenarioError::IoError(path, err) => {
                write!(f, "failed to read {}: {}", path.display(), err)
            }
            ScenarioError::ParseError(path, err) => {
                write!(f, "failed to parse YAML {}: {}", path.display(), err)
            }
            ScenarioError::InvalidPosition(label, err) => {
                write!(f, "invalid position for {}: {}", label, err)
            }
            ScenarioError::ValidationError(msg) => {
                write!(f, "invalid scenario: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
