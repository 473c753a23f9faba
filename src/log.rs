// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs::File;
use std::io::{Stderr, stderr};
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_tree::time::UtcDateTime;

/// Guards that flush the log writers when dropped.
#[must_use = "dropping the guards stops log output"]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Logs hierarchically to stderr, filtered by `RUST_LOG`.
pub fn init_logging() -> LogGuards {
    let (err_appender, err_appender_guard) = tracing_appender::non_blocking(stderr());
    tracing_subscriber::registry().with(stderr_layer(err_appender)).init();
    LogGuards { _guards: vec![err_appender_guard] }
}

/// Like [`init_logging`], and additionally writes every event to `path`
/// without filtering or colour.
pub fn init_logging_to_file(path: &Path) -> anyhow::Result<LogGuards> {
    let logfile = File::create(path)?;
    let (file_appender, file_appender_guard) = tracing_appender::non_blocking(logfile);
    let (err_appender, err_appender_guard) = tracing_appender::non_blocking(stderr());
    tracing_subscriber::registry()
        .with(stderr_layer(err_appender))
        .with(tracing_subscriber::fmt::layer().with_writer(file_appender).with_ansi(false))
        .try_init()?;
    Ok(LogGuards {
        _guards: vec![file_appender_guard, err_appender_guard],
    })
}

fn stderr_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tree_layer().with_writer(writer).with_filter(EnvFilter::from_default_env())
}

pub fn tree_layer() -> tracing_tree::HierarchicalLayer<fn() -> Stderr, UtcDateTime> {
    tracing_tree::HierarchicalLayer::default()
        .with_indent_amount(2)
        .with_indent_lines(true)
        .with_deferred_spans(true)
        .with_span_retrace(true)
        .with_targets(true)
        .with_timer(UtcDateTime::default())
}

/// Times a function call and emits the duration as a `trace` event named
/// after the function.
#[macro_export]
macro_rules! trace_call {
    ($($path:ident)::*($($args:expr),*)) => { {
        let start = ::std::time::Instant::now();
        let out = $($path)::* ($($args),*);
        let end = ::std::time::Instant::now();
        ::tracing::trace!(time = ?(end - start), stringify!($($path)::*));
        out
    } };
}
