use kvlog_otel::{keyvals, timestamp_utc, with, Config, Log, OtelLogger, Value};
use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
use opentelemetry::Context;
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};

fn main() {
    let exporter = InMemoryLogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    let logger = OtelLogger::new(
        "demos/in_memory",
        Config::new()
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_logger_provider(provider.clone()),
    );

    let cx = Context::new().with_remote_span_context(SpanContext::new(
        TraceId::from_bytes(0x4bf92f3577b34da6a3ce929d0e0e4736u128.to_be_bytes()),
        SpanId::from_bytes(0x00f067aa0ba902b7u64.to_be_bytes()),
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    ));

    // ts is read on every call
    let request = with(&logger, keyvals!["ts", timestamp_utc(), "ctx", cx]);
    request
        .log(&keyvals!["level", "info", "route", "/login", "tags", Value::seq(["auth", "web"])])
        .expect("log");
    request
        .log(&keyvals!["level", "warn", "attempts", 3])
        .expect("log");

    for log in exporter.get_emitted_logs().expect("emitted logs") {
        let record = &log.record;
        let attributes: Vec<String> = record
            .attributes_iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect();
        println!(
            "{} {:?} {:?} trace={:?} {}",
            log.instrumentation.name(),
            record.timestamp(),
            record.severity_text(),
            record.trace_context().map(|tc| tc.trace_id),
            attributes.join(" ")
        );
    }
    let _ = provider.shutdown();
}
