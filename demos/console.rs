use kvlog_otel::init::init_console;
use kvlog_otel::{keyvals, Config, Log, OtelLogger, Value};

fn main() {
    init_console().expect("set global subscriber");

    // No explicit provider: the console init installed a global provider
    // that forwards to the tracing subscriber.
    let logger = OtelLogger::new(module_path!(), Config::from_env().unwrap_or_default());

    logger
        .log(&keyvals!["level", "info", "msg", "starting service"])
        .expect("log");
    logger
        .log(&keyvals![
            "level", "error",
            "user_id", 42,
            "reason", "invalid password",
            "detail", Value::structure([("count", 3)]),
        ])
        .expect("log");
}
