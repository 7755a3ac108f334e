use std::fmt;
use std::ops::{Add, AddAssign};

/// フィールドの座標範囲（各軸の絶対値の上限）
///
/// 移動は1軸1歩ずつなので、1回の移動の歩数は各軸 `2 * FIELD_LIMIT` 以下に収まる。
pub const FIELD_LIMIT: f64 = 1_000_000.0;

/// 2次元位置を表す構造体
///
/// ロボットとターゲットの両方の座標に使用します。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 原点 (0, 0)
    pub fn origin() -> Self {
        Self::default()
    }

    /// ユークリッド距離を計算
    pub fn distance_to(&self, other: &Vector2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// 自身に加算する（破壊的）
    ///
    /// 加算値は `Vector2` または `(x, y)` の組のどちらでも受け付けます。
    pub fn add_in_place(&mut self, other: impl Into<Operand>) {
        let (dx, dy) = other.into().components();
        self.x += dx;
        self.y += dy;
    }

    /// 両座標が有限値かどうか
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// フィールド範囲内かどうかを判定
    pub fn is_in_field_bounds(&self) -> bool {
        self.x.abs() <= FIELD_LIMIT && self.y.abs() <= FIELD_LIMIT
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(x={}, y={})", self.x, self.y)
    }
}

/// 加算の右辺（または左辺）として受け付ける値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Vector(Vector2),
    Pair(f64, f64),
}

impl Operand {
    fn components(self) -> (f64, f64) {
        match self {
            Operand::Vector(v) => (v.x, v.y),
            Operand::Pair(x, y) => (x, y),
        }
    }
}

impl From<Vector2> for Operand {
    fn from(v: Vector2) -> Self {
        Operand::Vector(v)
    }
}

impl From<(f64, f64)> for Operand {
    fn from((x, y): (f64, f64)) -> Self {
        Operand::Pair(x, y)
    }
}

// YAMLなどから読んだ生の数値列は2要素のときだけ受け付ける
impl TryFrom<&[f64]> for Operand {
    type Error = GeometryError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            [x, y] => Ok(Operand::Pair(*x, *y)),
            _ => Err(GeometryError::UnsupportedOperand { len: values.len() }),
        }
    }
}

impl TryFrom<&[f64]> for Vector2 {
    type Error = GeometryError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let (x, y) = Operand::try_from(values)?.components();
        Ok(Vector2::new(x, y))
    }
}

impl<T: Into<Operand>> Add<T> for Vector2 {
    type Output = Self;

    fn add(self, other: T) -> Self::Output {
        let mut sum = self;
        sum.add_in_place(other);
        sum
    }
}

// (x, y) + Vector2 の演算を可能にする
impl Add<Vector2> for (f64, f64) {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Self::Output {
        other + self
    }
}

impl Add<Vector2> for Operand {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Self::Output {
        other + self
    }
}

impl<T: Into<Operand>> AddAssign<T> for Vector2 {
    fn add_assign(&mut self, other: T) {
        self.add_in_place(other);
    }
}

/// 幾何演算のエラー
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// 2要素でない数値列を加算値として渡された
    UnsupportedOperand { len: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::UnsupportedOperand { len } => {
                write!(f, "unsupported operand: expected Vector2 or (x, y) pair, got {} values", len)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// 計測ユーティリティ関数
pub mod math_utils {
    /// 3つの計測値からロバストな距離を求める
    ///
    /// 中央値から中央値の半分より離れた値を外れ値として除外し、
    /// 残った値の平均を返します。有効な値が1つもなければ `None`。
    pub fn robust_distance(a: f64, b: f64, c: f64) -> Option<f64> {
        let median = median_of_three(a, b, c);
        let valid: Vec<f64> = [a, b, c]
            .into_iter()
            .filter(|m| (m - median).abs() <= 0.5 * median)
            .collect();

        match valid.len() {
            0 => None,
            1 => Some(valid[0]),
            n => Some(valid.iter().sum::<f64>() / n as f64),
        }
    }

    fn median_of_three(a: f64, b: f64, c: f64) -> f64 {
        a.max(b).min(a.min(b).max(c))
    }
}

#[cfg(test)]
mod tests {
    use super::math_utils::robust_distance;
    use super::*;

    #[test]
    fn test_distance_to() {
        assert_eq!(Vector2::origin().distance_to(&Vector2::new(3.0, 4.0)), 5.0);
        assert_eq!(Vector2::new(1.5, -2.0).distance_to(&Vector2::new(1.5, -2.0)), 0.0);
    }

    #[test]
    fn test_add_is_commutative() {
        let a = Vector2::new(1.0, 2.5);
        let b = Vector2::new(-4.0, 3.0);
        assert_eq!(a + b, b + a);
        assert_eq!(a + b, Vector2::new(-3.0, 5.5));

        assert_eq!(a + (2.0, -1.0), Vector2::new(3.0, 1.5));
        assert_eq!((2.0, -1.0) + a, a + (2.0, -1.0));
        assert_eq!(Operand::Pair(2.0, -1.0) + a, a + Operand::Pair(2.0, -1.0));
    }

    #[test]
    fn test_pure_add_leaves_operands_untouched() {
        let a = Vector2::new(1.0, 1.0);
        let _ = a + (5.0, 5.0);
        assert_eq!(a, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_add_in_place() {
        let mut p = Vector2::origin();
        p.add_in_place((3.0, 0.0));
        p.add_in_place(Vector2::new(0.0, 4.0));
        p += (-1.0, -1.0);
        assert_eq!(p, Vector2::new(2.0, 3.0));
    }

    #[test]
    fn test_operand_from_slice() {
        assert_eq!(Operand::try_from(&[1.0, 2.0][..]), Ok(Operand::Pair(1.0, 2.0)));
        assert_eq!(
            Operand::try_from(&[1.0, 2.0, 3.0][..]),
            Err(GeometryError::UnsupportedOperand { len: 3 })
        );
        let empty: [f64; 0] = [];
        assert_eq!(
            Vector2::try_from(&empty[..]),
            Err(GeometryError::UnsupportedOperand { len: 0 })
        );
        assert_eq!(Vector2::try_from(&[-3.0, 0.5][..]), Ok(Vector2::new(-3.0, 0.5)));
    }

    #[test]
    fn test_field_bounds() {
        assert!(Vector2::new(FIELD_LIMIT, -FIELD_LIMIT).is_in_field_bounds());
        assert!(!Vector2::new(FIELD_LIMIT + 1.0, 0.0).is_in_field_bounds());
        assert!(!Vector2::new(0.0, -9_007_199_254_740_992.0).is_in_field_bounds());
        assert!(!Vector2::new(f64::NAN, 0.0).is_in_field_bounds());
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector2::new(2.0, -1.5).to_string(), "Position(x=2, y=-1.5)");
    }

    #[test]
    fn test_robust_distance() {
        assert!((robust_distance(2.0, 2.1, 1.9).unwrap() - 2.0).abs() < 1e-9);
        assert!((robust_distance(2.0, 2.1, 15.0).unwrap() - 2.05).abs() < 1e-9);
        assert_eq!(robust_distance(1.0, 15.0, 20.0), Some(17.5));
        // 外れ値が2つあれば中央値だけが残る
        assert_eq!(robust_distance(1.0, 15.0, 30.0), Some(15.0));
    }

    #[test]
    fn test_robust_distance_without_valid_reading() {
        // 中央値が負だと許容幅も負になり、どの値も有効にならない
        assert_eq!(robust_distance(-1.0, -2.0, -3.0), None);
        assert_eq!(robust_distance(0.0, 0.0, 0.0), Some(0.0));
    }
}
