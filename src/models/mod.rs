// 基本的なデータ型と計測ユーティリティ
pub mod common;

// 地面の種類と移動コスト
pub mod ground;

// エージェントの基本インターフェース（trait）定義
pub mod traits;

// 各モデルの実装
pub mod robot;
pub mod target;
pub mod route;
pub mod field;

// 便利な re-export
pub use common::*;
pub use ground::GroundType;
pub use traits::*;
pub use robot::Robot;
pub use target::Target;
pub use route::Route;
pub use field::{Field, FieldError};
