use fltk::dialog;

use crate::app::infrastructure::platform::{UNSAVED_CHANGES_MESSAGE, UnsavedChoice};

/// Three-button unsaved-changes prompt. Closing the dialog counts as cancel.
pub fn confirm_unsaved(document_name: &str) -> UnsavedChoice {
    let choice = dialog::choice2_default(
        &format!("\"{}\"\n{}", document_name, UNSAVED_CHANGES_MESSAGE),
        "저장",
        "저장 안 함",
        "취소",
    );
    match choice {
        Some(0) => UnsavedChoice::Save,
        Some(1) => UnsavedChoice::Discard,
        _ => UnsavedChoice::Cancel,
    }
}

pub fn alert_error(context: &str, error: &dyn std::fmt::Display) {
    dialog::alert_default(&format!("{}: {}", context, error));
}
