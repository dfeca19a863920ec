use std::time::Instant;

use kvlog_otel::{keyvals, Config, Log, OtelLogger};
use opentelemetry_sdk::logs::SdkLoggerProvider;

fn main() {
    // no processors: records are assembled and then dropped
    let provider = SdkLoggerProvider::builder().build();
    let logger = OtelLogger::new(
        "examples_load/default_load",
        Config::new().with_logger_provider(provider),
    );

    let n: i64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger
            .log(&keyvals!["level", "error", "iteration", i, "tags", ["load", "drop"]])
            .expect("log");
    }

    let elapsed = start.elapsed();
    println!("default config: assembled {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
