use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Degree of clinician support provided during a therapy objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueingLevel {
    Independent,
    Min,
    Mod,
    Max,
    Models,
    Other,
}

impl CueingLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Min => "min",
            Self::Mod => "mod",
            Self::Max => "max",
            Self::Models => "models",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub objective_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
    pub cueing_level: CueingLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One trial-count row in the SOAP objective section. `accuracy` is derived
/// from `trials`/`correct` on every save path and is never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRow {
    pub target: String,
    pub trials: Option<f64>,
    pub correct: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cueing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub note_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
    pub updated_by: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteHeader {
    pub client_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub date_of_session: String,
    pub session_number: u32,
    pub student_clinician: String,
    pub supervisor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapyPlan {
    pub long_term_goals: String,
    pub short_term_objectives: Vec<Objective>,
    pub methods_procedures: String,
    pub cueing_supports: Vec<String>,
    pub materials_stimuli: String,
    pub data_plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipated_barriers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_program_planned: Option<String>,
    pub plan_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveSection {
    pub narrative: String,
    pub data_rows: Vec<DataRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapSection {
    pub subjective: String,
    pub objective: ObjectiveSection,
    pub assessment: String,
    pub plan: String,
    pub soap_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soap_completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorReview {
    pub strengths: String,
    pub growth_targets: String,
    pub required_edits_checklist: Vec<String>,
    pub reviewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
}

/// Canonical session note. Serialized shape doubles as the on-disk draft
/// file format, so field naming is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapNoteRecord {
    pub metadata: NoteMetadata,
    pub header: NoteHeader,
    pub therapy_plan: TherapyPlan,
    pub soap: SoapSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_review: Option<SupervisorReview>,
}

impl SoapNoteRecord {
    /// Sets the plan completion flag, stamping `planCompletedAt` on the
    /// false-to-true transition and clearing it on true-to-false.
    pub fn set_plan_complete(&mut self, complete: bool) {
        if complete && !self.therapy_plan.plan_complete {
            self.therapy_plan.plan_completed_at = Some(now_iso());
        } else if !complete {
            self.therapy_plan.plan_completed_at = None;
        }
        self.therapy_plan.plan_complete = complete;
    }

    pub fn set_soap_complete(&mut self, complete: bool) {
        if complete && !self.soap.soap_complete {
            self.soap.soap_completed_at = Some(now_iso());
        } else if !complete {
            self.soap.soap_completed_at = None;
        }
        self.soap.soap_complete = complete;
    }
}

/// Lightweight projection of a stored draft for list rendering. Always
/// derivable from the full record via [`StoredDraft::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soap_complete: Option<bool>,
}

/// Persistence envelope. `id` is the sole uniqueness key; `updated_at`
/// duplicates `note.metadata.updated_at` and is the list sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDraft {
    pub id: String,
    pub updated_at: String,
    pub note: SoapNoteRecord,
}

impl StoredDraft {
    pub fn summarize(&self) -> DraftSummary {
        DraftSummary {
            id: self.id.clone(),
            updated_at: self.updated_at.clone(),
            date_of_session: Some(self.note.header.date_of_session.clone()),
            client_key: Some(self.note.header.client_key.clone()),
            session_number: Some(self.note.header.session_number),
            plan_complete: Some(self.note.therapy_plan.plan_complete),
            soap_complete: Some(self.note.soap.soap_complete),
        }
    }
}

pub fn now_iso() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.to_rfc3339()
}
