use crate::derived::apply_derived_fields;
use crate::models::{
    now_iso, CueingLevel, DataRow, NoteHeader, NoteMetadata, Objective, ObjectiveSection,
    SoapNoteRecord, SoapSection, TherapyPlan,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_AUTHOR: &str = "local-user";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteArgs {
    pub date_of_session: String,
    pub session_number: u32,
    pub client_key: String,
    pub client_name: Option<String>,
    pub student_clinician: String,
    pub supervisor: String,
}

/// Builds a blank note: fresh id, version 1, one empty objective and one
/// empty data row, all completion flags false. Pure construction, nothing is
/// persisted here.
pub fn create_new_note(args: &CreateNoteArgs) -> SoapNoteRecord {
    let now = now_iso();
    SoapNoteRecord {
        metadata: NoteMetadata {
            note_id: Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
            created_by: DEFAULT_AUTHOR.to_string(),
            updated_by: DEFAULT_AUTHOR.to_string(),
            version: 1,
        },
        header: NoteHeader {
            client_key: args.client_key.clone(),
            client_name: args.client_name.clone(),
            dob: None,
            date_of_session: args.date_of_session.clone(),
            session_number: args.session_number,
            student_clinician: args.student_clinician.clone(),
            supervisor: args.supervisor.clone(),
            location: None,
        },
        therapy_plan: TherapyPlan {
            long_term_goals: String::new(),
            short_term_objectives: vec![Objective {
                objective_text: String::new(),
                condition: None,
                behavior: None,
                criterion: None,
                cueing_level: CueingLevel::Independent,
                notes: None,
            }],
            methods_procedures: String::new(),
            cueing_supports: Vec::new(),
            materials_stimuli: String::new(),
            data_plan: String::new(),
            anticipated_barriers: Some(String::new()),
            home_program_planned: Some(String::new()),
            plan_complete: false,
            plan_completed_at: None,
        },
        soap: SoapSection {
            subjective: String::new(),
            objective: ObjectiveSection {
                narrative: String::new(),
                data_rows: vec![DataRow {
                    target: String::new(),
                    trials: None,
                    correct: None,
                    accuracy: None,
                    cueing: Some(String::new()),
                    notes: Some(String::new()),
                }],
            },
            assessment: String::new(),
            plan: String::new(),
            soap_complete: false,
            soap_completed_at: None,
        },
        supervisor_review: None,
    }
}

/// Stamps a new revision onto the note: version + 1, fresh updatedAt and
/// updatedBy, derived fields recomputed. Every call produces a new revision
/// on purpose; callers invoke this once per persisted save.
pub fn prepare_for_save(note: &mut SoapNoteRecord, author: &str) {
    note.metadata.version += 1;
    note.metadata.updated_at = now_iso();
    note.metadata.updated_by = author.to_string();
    apply_derived_fields(note);
}

#[cfg(test)]
mod tests {
    use super::{create_new_note, prepare_for_save, CreateNoteArgs, DEFAULT_AUTHOR};
    use crate::models::CueingLevel;

    fn args() -> CreateNoteArgs {
        CreateNoteArgs {
            date_of_session: "2024-01-05".to_string(),
            session_number: 3,
            client_key: "CL1".to_string(),
            client_name: Some("C. L.".to_string()),
            student_clinician: "S. Clinician".to_string(),
            supervisor: "Dr. Supervisor".to_string(),
        }
    }

    #[test]
    fn new_note_starts_at_version_1_with_empty_substructures() {
        let note = create_new_note(&args());
        assert_eq!(note.metadata.version, 1);
        assert_eq!(note.metadata.created_at, note.metadata.updated_at);
        assert!(!note.metadata.note_id.is_empty());
        assert_eq!(note.therapy_plan.short_term_objectives.len(), 1);
        assert_eq!(
            note.therapy_plan.short_term_objectives[0].cueing_level,
            CueingLevel::Independent
        );
        assert_eq!(note.soap.objective.data_rows.len(), 1);
        assert!(!note.therapy_plan.plan_complete);
        assert!(!note.soap.soap_complete);
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        let a = create_new_note(&args());
        let b = create_new_note(&args());
        assert_ne!(a.metadata.note_id, b.metadata.note_id);
    }

    #[test]
    fn prepare_for_save_bumps_version_each_call() {
        let mut note = create_new_note(&args());
        prepare_for_save(&mut note, DEFAULT_AUTHOR);
        assert_eq!(note.metadata.version, 2);
        prepare_for_save(&mut note, "supervisor");
        assert_eq!(note.metadata.version, 3);
        assert_eq!(note.metadata.updated_by, "supervisor");
        // Creation metadata is never rewritten.
        assert_eq!(note.metadata.created_by, DEFAULT_AUTHOR);
    }

    #[test]
    fn prepare_for_save_refreshes_derived_accuracy() {
        let mut note = create_new_note(&args());
        note.soap.objective.data_rows[0].trials = Some(4.0);
        note.soap.objective.data_rows[0].correct = Some(3.0);
        prepare_for_save(&mut note, DEFAULT_AUTHOR);
        assert_eq!(note.soap.objective.data_rows[0].accuracy, Some(75.0));
    }
}
