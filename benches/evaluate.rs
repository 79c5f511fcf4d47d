use criterion::{Criterion, black_box, criterion_group, criterion_main};
use signal_rules::{
    DataValues, ProgramRules, ProgramRulesBuilder, Rule, RuleAction, RuleVariable,
    execute_program_rules,
};

/// `n` rules, each reading its own variable and touching its own field, plus
/// a snapshot where every other rule fires.
fn build_rules(n: usize) -> (Vec<Rule>, Vec<RuleVariable>, DataValues) {
    let mut rules = Vec::with_capacity(n);
    let mut variables = Vec::with_capacity(n);
    let mut data = DataValues::new();

    for i in 0..n {
        let de = format!("DE{i}");
        variables.push(RuleVariable::bound(&format!("v{i}"), de.as_str()));
        rules.push(
            Rule::new(&format!("#{{v{i}}} >= 5 && #{{v{i}}} != 'Discard'"))
                .named(&format!("r{i}"))
                .action(RuleAction::show_field(&format!("F{i}")))
                .action(RuleAction::assign(&format!("A{i}"), "High")),
        );
        data.insert(&de, if i % 2 == 0 { 10.into() } else { "1".into() });
    }

    (rules, variables, data)
}

fn compiled(n: usize) -> (ProgramRules, DataValues) {
    let (rules, variables, data) = build_rules(n);
    (ProgramRules::new(rules, variables), data)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_eval");

    for &n in &[5, 20, 50] {
        let (rules, data) = compiled(n);
        group.bench_function(format!("{n}_rules_compiled"), |b| {
            b.iter(|| rules.evaluate(black_box(&data)));
        });

        let (rules, variables, data) = build_rules(n);
        group.bench_function(format!("{n}_rules_one_shot"), |b| {
            b.iter(|| execute_program_rules(&rules, &variables, black_box(&data)));
        });
    }

    group.finish();
}

fn bench_detailed(c: &mut Criterion) {
    let mut group = c.benchmark_group("detailed_eval");

    for &n in &[5, 20, 50] {
        let (rules, data) = compiled(n);
        group.bench_function(format!("{n}_rules"), |b| {
            b.iter(|| rules.evaluate_detailed(black_box(&data)));
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[5, 20, 50] {
        group.bench_function(format!("{n}_rules"), |b| {
            b.iter(|| {
                let mut builder = ProgramRulesBuilder::new();
                for i in 0..n {
                    let condition = format!("#{{v{i}}} >= 5 || #{{v{i}}} === 'Alert'");
                    builder = builder
                        .variable(&format!("v{i}"), format!("DE{i}").as_str())
                        .rule(&format!("r{i}"), move |r| r.when(&condition).hide_field("F"));
                }
                black_box(builder.build())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_detailed, bench_compilation);
criterion_main!(benches);
