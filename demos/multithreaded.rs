use std::sync::Arc;
use std::thread;

use signal_rules::{DataValues, ProgramRulesBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules = Arc::new(
        ProgramRulesBuilder::new()
            .variable("cases", "DE1")
            .rule("cluster", |r| r.when("#{cases} >= 5").assign("RISK", "High"))
            .rule("single", |r| r.when("#{cases} < 5").assign("RISK", "Low"))
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let data = DataValues::new().set("DE1", 2 + i * 2);
                let result = rules.evaluate(&data);
                println!("Thread {i}: {:?}", result.assignment("RISK"));
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
