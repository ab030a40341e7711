use crate::source::Span;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<SpannedValue>),
    Object(IndexMap<String, SpannedValue>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpannedValue {
    pub value: Value,
    pub span: Span,
}
