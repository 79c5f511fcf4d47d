use std::env;

use signal_rules::workflow::Workflow;
use signal_rules::{DataValues, EngineError, ProgramRules};
use tracing_subscriber::EnvFilter;

const METADATA: &str = r##"{
    "programRuleVariables": [
        {"name": "triage", "dataElement": {"id": "RZMTtSyhdHY"}},
        {"name": "verification", "dataElement": {"id": "FidiishnZJZ"}}
    ],
    "programRules": [
        {
            "name": "Hide verification until triaged relevant",
            "condition": "#{triage} !== 'Relevant'",
            "programRuleActions": [
                {"programRuleActionType": "HIDEFIELD", "dataElement": {"id": "FidiishnZJZ"}}
            ]
        },
        {
            "name": "Alert notice",
            "condition": "#{verification} === 'Alert'",
            "programRuleActions": [
                {"programRuleActionType": "DISPLAYTEXT", "value": "Risk assessment required"}
            ]
        }
    ]
}"##;

/// Loads metadata from the file given as the first argument, or a built-in
/// document, and evaluates it against a sample signal.
fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules = match env::args().nth(1) {
        Some(path) => ProgramRules::from_file(path)?,
        None => ProgramRules::from_json(METADATA)?,
    };
    println!("{rules}");

    let data: DataValues =
        serde_json::from_str(r#"{"RZMTtSyhdHY": "Relevant", "FidiishnZJZ": "Alert"}"#)?;
    let result = rules.evaluate(&data);
    println!("{}", serde_json::to_string_pretty(&result)?);

    let workflow = Workflow::default();
    let status = workflow.status(&data);
    println!(
        "status: {} ({}), next step: {:?}",
        status.label(),
        status.color().as_str(),
        workflow.next_step(&data).next.map(|s| s.label()),
    );
    Ok(())
}
