use signal_rules::{DataValues, ProgramRulesBuilder, var};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules = ProgramRulesBuilder::new()
        .variable("triage", "RZMTtSyhdHY")
        .variable("cases", "Vk1tN8cHbTg")
        .variable("region", "OU1")
        .rule("needs verification", |r| {
            r.when_expr(var("triage").strict_eq("Relevant"))
                .show_field("FidiishnZJZ")
        })
        .rule("cluster", |r| {
            r.when("#{cases} >= 5 && #{region} != 'restricted'")
                .show_warning("Possible cluster")
                .assign("x84ZTtD0Z8u", "High")
        })
        .rule("broken", |r| r.when("#{cases} >").hide_field("FidiishnZJZ"))
        .build();

    println!("{rules}");
    for (index, err) in rules.invalid_conditions() {
        println!("rule {index}: {err}");
    }

    let data = DataValues::new()
        .set("RZMTtSyhdHY", "Relevant")
        .set("Vk1tN8cHbTg", "8")
        .set("OU1", "north");

    let report = rules.evaluate_detailed(&data);

    println!("{report}");
    println!();
    println!("Rules fired: {:?}", report.fired_names());
    println!("Skipped as invalid: {:?}", report.invalid());
    for (name, value) in report.variables().iter() {
        println!("  #{{{name}}} = {value}");
    }
    println!("Assignments: {:?}", report.result().assignments());
}
