#![expect(missing_docs, reason = "example")]

use std::sync::Arc;
use std::time::Instant;

use linelog::{CollectOutput, log, slog};

fn main() {
    log!("starting up");

    let start = Instant::now();
    let previous = linelog::set_logger_prefix_hook(Some(Arc::new(move |buffer: &mut String| {
        let elapsed = start.elapsed();
        buffer.push_str(&format!("[{:>4}ms] ", elapsed.as_millis()));
    })));

    slog!("prefix", "installed");

    let report = {
        let collector = CollectOutput::new(true);
        work();
        collector.get()
    };
    log!("work logged ", report.lines().count(), " lines");

    linelog::set_logger_prefix_hook(previous);
    log!("done");
}

fn work() {
    for step in 1..=3 {
        slog!("step", step, "of", 3);
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
}
