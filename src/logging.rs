//! # Logging モジュール
//!
//! ミッション実行のログ出力を設定します。
//!
//! コンソールには compact 形式、ファイルには JSON 形式で出力します。
//! ファイル出力は tracing-appender の日次ローテーションと非同期書き込みを使います。
//! `RUST_LOG` が設定されている場合はそちらのフィルタを優先します。

use std::str::FromStr;
use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログ出力先の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogOutput {
    /// コンソールのみ
    Console,
    /// ファイルのみ
    File,
    /// コンソールとファイルの両方
    Both,
}

impl LogOutput {
    pub fn writes_console(&self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    pub fn writes_file(&self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(format!("invalid log output: {}. available: console, file, both", s)),
        }
    }
}

/// ログ設定構造体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル
    pub level: Level,
    /// 出力先
    pub output: LogOutput,
    /// ログファイルのディレクトリ（File または Both の場合）
    pub log_dir: String,
    /// ログファイル名のプレフィックス
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            output: LogOutput::Console,
            log_dir: "logs".to_string(),
            file_prefix: "robofield".to_string(),
        }
    }
}

/// ログシステムを初期化
///
/// グローバルな subscriber を登録するため、プロセス内で一度だけ呼び出します。
/// 出力先ごとのレイヤーは `Option` で組み立て、使わないものは `None` にします。
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_string()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = config
        .output
        .writes_console()
        .then(|| fmt::layer().with_target(true).compact());

    let (file_layer, guard) = if config.output.writes_file() {
        ensure_log_directory(&config.log_dir)?;
        let (writer, guard) = non_blocking(rolling::daily(&config.log_dir, &config.file_prefix));
        let layer = fmt::layer().with_writer(writer).with_target(true).json();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    // guardを保持し続けないと書き込みスレッドが止まる
    if let Some(guard) = guard {
        std::mem::forget(guard);
    }

    Ok(())
}

/// ログレベルを文字列から解析
///
/// 無効な文字列の場合は警告を出して INFO を返します。
pub fn parse_log_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("warning: invalid log level '{}', falling back to INFO", level_str);
            Level::INFO
        }
    }
}

/// 詳細出力レベル (-v の数) からログレベルを決める
pub fn level_for_verbosity(verbose_level: u8) -> Level {
    match verbose_level {
        0 | 1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// ログディレクトリを作成
pub fn ensure_log_directory(log_dir: &str) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(log_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_output_from_str() {
        assert_eq!(LogOutput::from_str("console"), Ok(LogOutput::Console));
        assert_eq!(LogOutput::from_str("STDOUT"), Ok(LogOutput::Console));
        assert_eq!(LogOutput::from_str("file"), Ok(LogOutput::File));
        assert_eq!(LogOutput::from_str("all"), Ok(LogOutput::Both));
        assert!(LogOutput::from_str("invalid").is_err());
    }

    #[test]
    fn test_writes_file() {
        assert!(LogOutput::Console.writes_console());
        assert!(!LogOutput::File.writes_console());
        assert!(LogOutput::Both.writes_console());
        assert!(!LogOutput::Console.writes_file());
        assert!(LogOutput::File.writes_file());
        assert!(LogOutput::Both.writes_file());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level("INFO"), Level::INFO);
        assert_eq!(parse_log_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(5), Level::TRACE);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.output, LogOutput::Console);
        assert_eq!(config.file_prefix, "robofield");
    }
}
