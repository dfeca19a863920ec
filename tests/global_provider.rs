use kvlog_otel::global;
use kvlog_otel::{keyvals, Config, Log, OtelLogger};
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};

// Everything touching the global provider lives in one test so ordering
// inside this binary does not matter.
#[test]
fn loggers_resolve_global_provider_at_construction() {
    let before = OtelLogger::new("before", Config::new());
    before.log(&keyvals!["level", "info"]).unwrap();

    let exporter = InMemoryLogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    let _previous = global::set_logger_provider(provider.clone());

    let after = OtelLogger::new("after", Config::new().with_version("2.0.0"));
    after.log(&keyvals!["level", "warn", "k", "v"]).unwrap();
    before.log(&keyvals!["level", "error"]).unwrap();

    let logs = exporter.get_emitted_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].instrumentation.name(), "after");
    assert_eq!(logs[0].instrumentation.version(), Some("2.0.0"));
    assert_eq!(logs[0].record.severity_text(), Some("warn"));
}
