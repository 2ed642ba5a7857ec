//! Form field serialization following the browser's successful-control rules.

use serde::Serialize;
use shared::protocol::FormBody;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Text,
    TextArea,
    Hidden,
    Checkbox,
    Radio,
    Select,
    Submit,
    Button,
    File,
    Other,
}

impl ControlKind {
    /// Classifies a control from its tag name and `type` attribute.
    pub fn from_tag(tag: &str, type_attr: Option<&str>) -> Self {
        let type_attr = type_attr.unwrap_or_default().to_ascii_lowercase();
        if tag.eq_ignore_ascii_case("textarea") {
            Self::TextArea
        } else if tag.eq_ignore_ascii_case("select") {
            Self::Select
        } else if tag.eq_ignore_ascii_case("button") {
            Self::Button
        } else if tag.eq_ignore_ascii_case("input") {
            match type_attr.as_str() {
                "hidden" => Self::Hidden,
                "checkbox" => Self::Checkbox,
                "radio" => Self::Radio,
                "submit" | "image" => Self::Submit,
                "button" | "reset" => Self::Button,
                "file" => Self::File,
                _ => Self::Text,
            }
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormControl {
    pub name: String,
    pub value: String,
    pub kind: ControlKind,
    pub disabled: bool,
    pub checked: bool,
}

impl FormControl {
    pub fn new(kind: ControlKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            disabled: false,
            checked: false,
        }
    }

    pub fn is_successful(&self) -> bool {
        if self.name.is_empty() || self.disabled {
            return false;
        }
        match self.kind {
            ControlKind::Checkbox | ControlKind::Radio => self.checked,
            ControlKind::Submit
            | ControlKind::Button
            | ControlKind::File
            | ControlKind::Other => false,
            ControlKind::Text
            | ControlKind::TextArea
            | ControlKind::Hidden
            | ControlKind::Select => true,
        }
    }

    /// One control per selected option; a select with nothing selected
    /// contributes nothing.
    pub fn select_options<I>(name: &str, selected: I, disabled: bool) -> Vec<Self>
    where
        I: IntoIterator<Item = String>,
    {
        selected
            .into_iter()
            .map(|value| Self {
                disabled,
                ..Self::new(ControlKind::Select, name, value)
            })
            .collect()
    }

    fn encoded_value(&self) -> String {
        if self.kind == ControlKind::TextArea {
            normalize_newlines(&self.value)
        } else {
            self.value.clone()
        }
    }
}

/// Encodes the successful controls in document order.
pub fn serialize(controls: &[FormControl]) -> FormBody {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for control in controls.iter().filter(|control| control.is_successful()) {
        serializer.append_pair(&control.name, &control.encoded_value());
    }
    FormBody::new(serializer.finish())
}

// Bare `\n` and `\r` both become `\r\n`, as browsers submit textarea values.
fn normalize_newlines(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
