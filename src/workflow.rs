//! Signal lifecycle derived from a signal's data values.
//!
//! A signal moves through triage, verification and risk assessment. Each step
//! records its outcome in a data element; the functions here read those
//! outcomes back to label the signal and decide which form step comes next.

use serde::{Deserialize, Serialize};

use crate::{DataValues, Value};

/// Data element ids of the workflow's outcome fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowFields {
    /// Triage outcome: `Relevant` or `Discard`.
    pub triage: String,
    /// Set to `Yes` when a discarded signal duplicates another.
    pub duplicate: String,
    /// Verification outcome: `Alert` or `Discard`.
    pub verification: String,
    /// Any value marks the risk assessment as done.
    pub assessment: String,
    /// Risk level chosen during assessment.
    pub risk_level: String,
}

impl Default for WorkflowFields {
    fn default() -> Self {
        Self {
            triage: "RZMTtSyhdHY".to_owned(),
            duplicate: "LxWNKdd93lq".to_owned(),
            verification: "FidiishnZJZ".to_owned(),
            assessment: "VaO1WnueBpu".to_owned(),
            risk_level: "x84ZTtD0Z8u".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Gray,
    Red,
    Yellow,
    Green,
    Blue,
    Orange,
    Crimson,
}

impl Color {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Crimson => "crimson",
        }
    }
}

/// Form steps, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Details,
    Triage,
    Verification,
    RiskAssessment,
}

impl WorkflowStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Details,
            Self::Triage,
            Self::Verification,
            Self::RiskAssessment,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Details => 0,
            Self::Triage => 1,
            Self::Verification => 2,
            Self::RiskAssessment => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Details => "Signal details",
            Self::Triage => "Triage",
            Self::Verification => "Verification",
            Self::RiskAssessment => "Risk assessment",
        }
    }
}

/// The step to open next and the steps the form should enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextStep {
    /// `None` once the signal needs no further input.
    pub next: Option<WorkflowStep>,
    pub active: Vec<WorkflowStep>,
}

impl NextStep {
    fn new(next: Option<WorkflowStep>, active_through: WorkflowStep) -> Self {
        Self {
            next,
            active: WorkflowStep::ordered()
                .into_iter()
                .filter(|step| *step <= active_through)
                .collect(),
        }
    }
}

/// How far through the workflow a signal has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStage {
    Open,
    Triaged,
    Verified,
    Assessed,
}

impl SignalStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Triaged => "Triaged",
            Self::Verified => "Verified",
            Self::Assessed => "Assessed",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Open => Color::Gray,
            Self::Triaged => Color::Red,
            Self::Verified => Color::Yellow,
            Self::Assessed => Color::Green,
        }
    }
}

/// Status shown for a signal in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    New,
    Triaged,
    Duplicate,
    Reviewed,
    /// Discarded at verification.
    Verified,
    Alerted,
    Assessed,
    Closed,
    UnderMonitoring,
    Actioned,
    Critical,
}

impl SignalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Triaged => "Triaged",
            Self::Duplicate => "Duplicate",
            Self::Reviewed => "Reviewed",
            Self::Verified => "Verified",
            Self::Alerted => "Alerted",
            Self::Assessed => "Assessed",
            Self::Closed => "Closed",
            Self::UnderMonitoring => "Under Monitoring",
            Self::Actioned => "Actioned",
            Self::Critical => "Critical",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::New | Self::Triaged => Color::Gray,
            Self::Duplicate | Self::Verified => Color::Red,
            Self::Reviewed | Self::UnderMonitoring => Color::Blue,
            Self::Alerted | Self::Actioned => Color::Orange,
            Self::Assessed | Self::Closed => Color::Green,
            Self::Critical => Color::Crimson,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Parse the option code stored in the risk level field.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Low" => Some(Self::Low),
            "Moderate" => Some(Self::Moderate),
            "High" => Some(Self::High),
            "Very High" => Some(Self::VeryHigh),
            _ => None,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Low => Color::Yellow,
            Self::Moderate => Color::Orange,
            Self::High => Color::Red,
            Self::VeryHigh => Color::Crimson,
        }
    }
}

/// Reads workflow outcomes out of a signal's data values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workflow {
    fields: WorkflowFields,
}

impl Workflow {
    #[must_use]
    pub fn new(fields: WorkflowFields) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &WorkflowFields {
        &self.fields
    }

    fn is_set(values: &DataValues, id: &str) -> bool {
        values.get(id).is_some_and(Value::is_truthy)
    }

    /// Current stage: the furthest step with a recorded outcome.
    #[must_use]
    pub fn stage(&self, values: &DataValues) -> SignalStage {
        if Self::is_set(values, &self.fields.assessment) {
            SignalStage::Assessed
        } else if Self::is_set(values, &self.fields.verification) {
            SignalStage::Verified
        } else if Self::is_set(values, &self.fields.triage) {
            SignalStage::Triaged
        } else {
            SignalStage::Open
        }
    }

    /// Listing status combining the stage with each step's outcome.
    #[must_use]
    pub fn status(&self, values: &DataValues) -> SignalStatus {
        let f = &self.fields;
        if Self::is_set(values, &f.assessment) {
            return match self.risk_level(values) {
                Some(RiskLevel::Moderate) => SignalStatus::UnderMonitoring,
                Some(RiskLevel::High) => SignalStatus::Actioned,
                Some(RiskLevel::VeryHigh) => SignalStatus::Critical,
                Some(RiskLevel::Low) => SignalStatus::Closed,
                None if Self::is_set(values, &f.risk_level) => SignalStatus::Closed,
                None => SignalStatus::Assessed,
            };
        }
        match values.text(&f.verification) {
            Some("Discard") => return SignalStatus::Verified,
            Some("Alert") => return SignalStatus::Alerted,
            _ => {}
        }
        match values.text(&f.triage) {
            Some("Relevant") => SignalStatus::Reviewed,
            Some("Discard") if values.text(&f.duplicate) == Some("Yes") => SignalStatus::Duplicate,
            Some("Discard") => SignalStatus::Triaged,
            _ => SignalStatus::New,
        }
    }

    #[must_use]
    pub fn risk_level(&self, values: &DataValues) -> Option<RiskLevel> {
        values
            .text(&self.fields.risk_level)
            .and_then(RiskLevel::from_code)
    }

    /// Which step the form should open and which steps it should enable.
    #[must_use]
    pub fn next_step(&self, values: &DataValues) -> NextStep {
        let f = &self.fields;
        if Self::is_set(values, &f.assessment) {
            return NextStep::new(None, WorkflowStep::RiskAssessment);
        }
        match values.text(&f.verification) {
            Some("Discard") => return NextStep::new(None, WorkflowStep::Verification),
            Some("Alert") => {
                return NextStep::new(
                    Some(WorkflowStep::RiskAssessment),
                    WorkflowStep::RiskAssessment,
                );
            }
            _ => {}
        }
        match values.text(&f.triage) {
            Some("Discard") => NextStep::new(None, WorkflowStep::Triage),
            Some("Relevant") => NextStep::new(
                Some(WorkflowStep::Verification),
                WorkflowStep::Verification,
            ),
            _ => NextStep::new(Some(WorkflowStep::Triage), WorkflowStep::Triage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> DataValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn new_signal() {
        let wf = Workflow::default();
        let v = DataValues::new();
        assert_eq!(wf.stage(&v), SignalStage::Open);
        assert_eq!(wf.status(&v), SignalStatus::New);
        assert_eq!(
            wf.next_step(&v),
            NextStep {
                next: Some(WorkflowStep::Triage),
                active: vec![WorkflowStep::Details, WorkflowStep::Triage],
            }
        );
    }

    #[test]
    fn untriaged_signal_opens_triage() {
        let wf = Workflow::default();
        let v = values(&[("SOME", "x"), ("LxWNKdd93lq", "Yes")]);
        let step = wf.next_step(&v);
        assert_eq!(step.next, Some(WorkflowStep::Triage));
        assert_eq!(step.next.map(WorkflowStep::index), Some(1));
        assert_eq!(step.active.iter().map(|s| s.index()).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn triage_outcomes() {
        let wf = Workflow::default();
        let relevant = values(&[("RZMTtSyhdHY", "Relevant")]);
        assert_eq!(wf.stage(&relevant), SignalStage::Triaged);
        assert_eq!(wf.status(&relevant), SignalStatus::Reviewed);
        assert_eq!(wf.next_step(&relevant).next, Some(WorkflowStep::Verification));
        assert_eq!(wf.next_step(&relevant).active.len(), 3);

        let discarded = values(&[("RZMTtSyhdHY", "Discard")]);
        assert_eq!(wf.status(&discarded), SignalStatus::Triaged);
        assert_eq!(wf.next_step(&discarded).next, None);

        let duplicate = values(&[("RZMTtSyhdHY", "Discard"), ("LxWNKdd93lq", "Yes")]);
        assert_eq!(wf.status(&duplicate), SignalStatus::Duplicate);
        assert_eq!(SignalStatus::Duplicate.color(), Color::Red);
    }

    #[test]
    fn verification_outcomes() {
        let wf = Workflow::default();
        let alert = values(&[("RZMTtSyhdHY", "Relevant"), ("FidiishnZJZ", "Alert")]);
        assert_eq!(wf.stage(&alert), SignalStage::Verified);
        assert_eq!(wf.status(&alert), SignalStatus::Alerted);
        assert_eq!(wf.next_step(&alert).next, Some(WorkflowStep::RiskAssessment));
        assert_eq!(wf.next_step(&alert).active, WorkflowStep::ordered().to_vec());

        let discard = values(&[("RZMTtSyhdHY", "Relevant"), ("FidiishnZJZ", "Discard")]);
        assert_eq!(wf.status(&discard), SignalStatus::Verified);
        assert_eq!(wf.next_step(&discard).next, None);
    }

    #[test]
    fn assessed_status_follows_risk_level() {
        let wf = Workflow::default();
        let cases = [
            ("Low", SignalStatus::Closed),
            ("Moderate", SignalStatus::UnderMonitoring),
            ("High", SignalStatus::Actioned),
            ("Very High", SignalStatus::Critical),
            ("Unknown", SignalStatus::Closed),
        ];
        for (level, expected) in cases {
            let v = values(&[("VaO1WnueBpu", "2024-05-01"), ("x84ZTtD0Z8u", level)]);
            assert_eq!(wf.status(&v), expected, "failed for {level}");
            assert_eq!(wf.stage(&v), SignalStage::Assessed);
        }

        let no_level = values(&[("VaO1WnueBpu", "2024-05-01")]);
        assert_eq!(wf.status(&no_level), SignalStatus::Assessed);
        assert_eq!(wf.next_step(&no_level).next, None);
    }

    #[test]
    fn risk_level_colors() {
        let wf = Workflow::default();
        let v = values(&[("x84ZTtD0Z8u", "Very High")]);
        assert_eq!(wf.risk_level(&v), Some(RiskLevel::VeryHigh));
        assert_eq!(RiskLevel::VeryHigh.color().as_str(), "crimson");
        assert_eq!(RiskLevel::Low.color(), Color::Yellow);
        assert_eq!(wf.risk_level(&DataValues::new()), None);
    }

    #[test]
    fn empty_outcome_is_not_set() {
        let wf = Workflow::default();
        let v = values(&[("VaO1WnueBpu", ""), ("RZMTtSyhdHY", "Relevant")]);
        assert_eq!(wf.stage(&v), SignalStage::Triaged);
    }

    #[test]
    fn custom_fields() {
        let wf = Workflow::new(WorkflowFields {
            triage: "T".into(),
            ..WorkflowFields::default()
        });
        assert_eq!(wf.status(&values(&[("T", "Relevant")])), SignalStatus::Reviewed);
        assert_eq!(wf.fields().triage, "T");
    }

    #[test]
    fn fields_deserialize_with_defaults() {
        let fields: WorkflowFields = serde_json::from_str(r#"{"triage": "T"}"#).unwrap();
        assert_eq!(fields.triage, "T");
        assert_eq!(fields.verification, "FidiishnZJZ");
    }
}
