use signal_rules::{DataValues, Rule, RuleAction, RuleVariable, execute_program_rules};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let variables = vec![
        RuleVariable::bound("age", "DE1"),
        RuleVariable::bound("pregnant", "DE3"),
    ];
    let rules = vec![
        Rule::new("#{age} >= 18")
            .named("adult")
            .action(RuleAction::show_field("DE2")),
        Rule::new("#{age} < 12 && #{pregnant} === 'Yes'")
            .named("implausible pregnancy")
            .action(RuleAction::error("Check the patient age"))
            .action(RuleAction::hide_field("DE3")),
    ];

    for data in [
        DataValues::new().set("DE1", "20"),
        DataValues::new().set("DE1", "10").set("DE3", "Yes"),
    ] {
        let result = execute_program_rules(&rules, &variables, &data);
        println!("shown:    {:?}", result.shown_fields());
        println!("hidden:   {:?}", result.hidden_fields());
        println!("messages: {:?}", result.messages());
        println!();
    }
}
