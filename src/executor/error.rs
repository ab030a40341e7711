use crate::source::Span;

/// A single entry in the response's top-level `errors` array.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionError {
    pub message: String,
    pub path: Vec<PathSegment>,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl ExecutionError {
    pub fn new(message: impl Into<String>, path: Vec<PathSegment>, span: Option<Span>) -> Self {
        Self { message: message.into(), path, span }
    }
}

impl serde::Serialize for ExecutionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExecutionError", 2)?;
        state.serialize_field("message", &self.message)?;
        let path: Vec<serde_json_like::PathEntry> = self
            .path
            .iter()
            .map(|p| match p {
                PathSegment::Field(name) => serde_json_like::PathEntry::Field(name.clone()),
                PathSegment::Index(i) => serde_json_like::PathEntry::Index(*i),
            })
            .collect();
        state.serialize_field("path", &path)?;
        state.end()
    }
}

/// A minimal helper enum so a path can serialize as a JSON array mixing
/// strings and numbers, without pulling in a JSON-specific dependency.
mod serde_json_like {
    #[derive(serde::Serialize)]
    #[serde(untagged)]
    pub enum PathEntry {
        Field(String),
        Index(usize),
    }
}
