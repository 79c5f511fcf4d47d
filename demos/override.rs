use signal_rules::{
    DataValues, EngineOptions, EqualityMode, ProgramRulesBuilder, VisibilityPolicy,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let build = |options: EngineOptions| {
        ProgramRulesBuilder::new()
            .variable("cases", "DE1")
            .rule("hide when zero", |r| r.when("#{cases} == 0").hide_field("DE2"))
            .rule("show when numeric", |r| r.when("#{cases} >= 0").show_field("DE2"))
            .options(options)
            .build()
    };

    let data = DataValues::new().set("DE1", "0");

    for options in [
        EngineOptions::new(),
        EngineOptions::new().visibility(VisibilityPolicy::ShowWins),
        EngineOptions::new().equality(EqualityMode::Strict),
    ] {
        let result = build(options).evaluate(&data);
        println!("{options:?}");
        println!(
            "  hidden: {:?}, shown: {:?}, DE2 -> {:?}",
            result.hidden_fields(),
            result.shown_fields(),
            result.visibility("DE2"),
        );
    }
}
