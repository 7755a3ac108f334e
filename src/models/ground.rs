use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::common::Vector2;

/// 地面の種類
///
/// 移動コストの係数と走行速度は地面ごとに固定です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum GroundType {
    /// 道路
    #[default]
    #[serde(rename = "R", alias = "road")]
    Road,
    /// 草地
    #[serde(rename = "H", alias = "grass")]
    Grass,
    /// 砂地
    #[serde(rename = "S", alias = "sand")]
    Sand,
    /// 障害物
    #[serde(rename = "O", alias = "obstacle")]
    Obstacle,
}

impl GroundType {
    /// 移動コスト係数
    pub fn cost_coefficient(&self) -> f64 {
        match self {
            GroundType::Road => 1.0,
            GroundType::Grass => 1.5,
            GroundType::Sand => 2.0,
            GroundType::Obstacle => 3.0,
        }
    }

    /// 走行速度（距離単位/秒）
    pub fn speed(&self) -> f64 {
        match self {
            GroundType::Road => 2.0,
            GroundType::Grass => 1.5,
            GroundType::Sand => 1.0,
            GroundType::Obstacle => 0.5,
        }
    }

    pub fn code(&self) -> char {
        match self {
            GroundType::Road => 'R',
            GroundType::Grass => 'H',
            GroundType::Sand => 'S',
            GroundType::Obstacle => 'O',
        }
    }
}

impl fmt::Display for GroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroundType::Road => "road",
            GroundType::Grass => "grass",
            GroundType::Sand => "sand",
            GroundType::Obstacle => "obstacle",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

impl FromStr for GroundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "r" | "road" => Ok(GroundType::Road),
            "h" | "grass" => Ok(GroundType::Grass),
            "s" | "sand" => Ok(GroundType::Sand),
            "o" | "obstacle" => Ok(GroundType::Obstacle),
            _ => Err(format!("invalid ground type: {}. available: R, H, S, O", s)),
        }
    }
}

/// 2点間を直線移動するときのコスト
pub fn movement_cost(from: &Vector2, to: &Vector2, ground: GroundType) -> f64 {
    from.distance_to(to) * ground.cost_coefficient()
}

/// 2点間を直線移動するときの所要時間（秒）
pub fn travel_time(from: &Vector2, to: &Vector2, ground: GroundType) -> f64 {
    from.distance_to(to) / ground.speed()
}
