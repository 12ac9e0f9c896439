use serde::{Deserialize, Serialize};

/// Header/footer templates and first-page policy for printing.
///
/// Field names double as the front-matter keys (`header_left`, ...,
/// `exclude_first_page`). Every field defaults independently, so a
/// preamble that names only some keys still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    pub header_left: String,
    pub header_center: String,
    pub header_right: String,
    pub footer_left: String,
    pub footer_center: String,
    pub footer_right: String,
    pub exclude_first_page: bool,
}

/// Front-matter keys understood by [`PrintSettings`].
pub const PRINT_SETTING_KEYS: [&str; 7] = [
    "header_left",
    "header_center",
    "header_right",
    "footer_left",
    "footer_center",
    "footer_right",
    "exclude_first_page",
];

impl PrintSettings {
    /// True for the all-empty/false value, the canonical "no custom settings" state.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn header(&self) -> [&str; 3] {
        [
            self.header_left.as_str(),
            self.header_center.as_str(),
            self.header_right.as_str(),
        ]
    }

    pub fn footer(&self) -> [&str; 3] {
        [
            self.footer_left.as_str(),
            self.footer_center.as_str(),
            self.footer_right.as_str(),
        ]
    }
}
