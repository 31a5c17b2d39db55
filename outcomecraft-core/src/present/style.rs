//! Table styling

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Visual options for rendered HTML tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub header_background: String,
    pub header_text: String,
    pub row_background: String,
    /// Background of every second body row; empty disables striping
    pub stripe_background: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size_px: u32,
    pub border_width_px: u32,
    pub border_color: String,
    pub cell_padding_px: u32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: "#f7f7f7".to_string(),
            header_text: "#000000".to_string(),
            row_background: "#ffffff".to_string(),
            stripe_background: "#fafafa".to_string(),
            text_color: "#000000".to_string(),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size_px: 16,
            border_width_px: 1,
            border_color: "#dddddd".to_string(),
            cell_padding_px: 6,
        }
    }
}

impl TableStyle {
    /// Named color fields, for validation and error messages
    pub fn colors(&self) -> [(&'static str, &str); 6] {
        [
            ("header_background", self.header_background.as_str()),
            ("header_text", self.header_text.as_str()),
            ("row_background", self.row_background.as_str()),
            ("stripe_background", self.stripe_background.as_str()),
            ("text_color", self.text_color.as_str()),
            ("border_color", self.border_color.as_str()),
        ]
    }

    /// Style attribute of the `<table>` element
    pub fn table_css(&self) -> String {
        format!(
            "border-collapse:collapse;width:100%;margin-bottom:16px;font-family:{};font-size:{}px;color:{};",
            self.font_family, self.font_size_px, self.text_color
        )
    }

    pub fn header_row_css(&self) -> String {
        format!(
            "background:{};color:{};",
            self.header_background, self.header_text
        )
    }

    /// Body row background; odd rows use the stripe color when one is set
    pub fn body_row_css(&self, index: usize) -> String {
        let background = if index % 2 == 1 && !self.stripe_background.is_empty() {
            &self.stripe_background
        } else {
            &self.row_background
        };
        format!("background:{};", background)
    }

    pub fn cell_css(&self) -> String {
        let border = if self.border_width_px == 0 {
            "none".to_string()
        } else {
            format!("{}px solid {}", self.border_width_px, self.border_color)
        };
        format!(
            "border:{};padding:{}px;text-align:left;",
            border, self.cell_padding_px
        )
    }
}

/// `#rgb`, `#rrggbb` or a plain CSS color name
pub fn is_valid_color(value: &str) -> bool {
    static COLOR: OnceLock<Regex> = OnceLock::new();
    COLOR
        .get_or_init(|| {
            Regex::new(r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$")
                .expect("color pattern is valid")
        })
        .is_match(value)
}
