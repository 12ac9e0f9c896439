use fltk::dialog::{FileDialogType, NativeFileChooser};

pub const MARKDOWN_FILTER: &str = "Markdown Files\t*.{md,markdown}\nText Files\t*.txt";

fn run_chooser(mut nfc: NativeFileChooser, directory: Option<&str>) -> Option<String> {
    nfc.set_filter(MARKDOWN_FILTER);
    if let Some(dir) = directory {
        if let Err(e) = nfc.set_directory(&dir) {
            tracing::debug!("dialog directory {} not usable: {:?}", dir, e);
        }
    }
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub fn native_open_dialog(directory: Option<&str>) -> Option<String> {
    run_chooser(NativeFileChooser::new(FileDialogType::BrowseFile), directory)
}

pub fn native_save_dialog(directory: Option<&str>, suggested_name: &str) -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_preset_file(suggested_name);
    run_chooser(nfc, directory)
}
