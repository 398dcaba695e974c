use std::collections::BTreeMap;

/// A file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Decoded request form, independent of the content type it arrived with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    texts: BTreeMap<String, String>,
    files: BTreeMap<String, Upload>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.texts.insert(name.into(), value.into());
        self
    }

    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.files.insert(name.into(), upload);
        self
    }

    pub fn insert_text(&mut self, name: String, value: String) {
        self.texts.insert(name, value);
    }

    pub fn insert_file(&mut self, name: String, upload: Upload) {
        self.files.insert(name, upload);
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name)
    }

    /// Missing and empty fields are treated alike.
    pub fn take_non_empty(&mut self, name: &str) -> Option<String> {
        self.take_text(name).filter(|v| !v.is_empty())
    }

    pub fn text_or(&mut self, name: &str, default: &str) -> String {
        self.take_text(name).unwrap_or_else(|| default.to_owned())
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &Upload)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_parts(self) -> (BTreeMap<String, String>, BTreeMap<String, Upload>) {
        (self.texts, self.files)
    }
}
