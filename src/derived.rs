use crate::models::SoapNoteRecord;

/// Percentage of correct responses out of trials, rounded to one decimal and
/// clamped into `[0, 100]`. `None` when either count is missing or there are
/// no trials; out-of-range inputs (correct > trials, negatives) clamp rather
/// than fault.
pub fn compute_accuracy(trials: Option<f64>, correct: Option<f64>) -> Option<f64> {
    let trials = trials?;
    let correct = correct?;
    if trials <= 0.0 {
        return None;
    }
    let pct = (correct / trials) * 100.0;
    let clamped = pct.clamp(0.0, 100.0);
    Some((clamped * 10.0).round() / 10.0)
}

/// Recomputes `accuracy` for every data row from its current counts. Called
/// on every save path so stored accuracy never drifts from its inputs.
pub fn apply_derived_fields(note: &mut SoapNoteRecord) {
    for row in &mut note.soap.objective.data_rows {
        row.accuracy = compute_accuracy(row.trials, row.correct);
    }
}
