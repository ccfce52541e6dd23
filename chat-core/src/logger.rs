//! 日志初始化：控制台与（可选的）日志文件共用同一个 tracing_subscriber fmt layer。

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// 初始化全局 tracing 订阅者。
///
/// 日志级别取自 `RUST_LOG`，未设置时为 `info`。给出 `log_file_path` 时输出同时追加写入该文件。
/// `json` 为 true 时使用 JSON 格式（便于日志采集）。需在调用前加载 `.env`。
pub fn init_tracing(log_file_path: Option<&str>, json: bool) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match log_file_path {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    let registry = Registry::default().with(env_filter);

    let result = match (file, json) {
        (Some(file), false) => registry
            .with(fmt_layer().with_writer(io::stdout.and(file)))
            .try_init(),
        (Some(file), true) => registry
            .with(fmt_layer().json().with_writer(io::stdout.and(file)))
            .try_init(),
        (None, false) => registry.with(fmt_layer().with_writer(io::stdout)).try_init(),
        (None, true) => registry
            .with(fmt_layer().json().with_writer(io::stdout))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

fn fmt_layer<S>() -> tracing_subscriber::fmt::Layer<S> {
    tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false)
}
