use std::fmt;

/// Location inside a document, rendered as `a.b[0].c` (or `root`).
#[derive(Debug, Clone, Default)]
pub(crate) struct Path {
    segments: Vec<String>,
}

impl Path {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    pub(crate) fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    pub(crate) fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => last.push_str(&format!("[{}]", index)),
            None => segments.push(format!("[{}]", index)),
        }
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
