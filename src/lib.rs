//! A GraphQL execution engine: a lexer and recursive-descent parser
//! producing a query-language AST, a host-assembled closed type system and
//! schema, and an execution engine that collects fields, coerces arguments
//! and variables, dispatches resolvers (siblings in parallel for queries,
//! in source order for mutations), and completes values with the spec's
//! null-propagation algorithm.
//!
//! A schema is never parsed from SDL: a host builds [`types::Type`] values
//! directly and hands the roots to [`Schema::builder`]. A request is parsed
//! and validated once via [`Request::new`], then run as many times as the
//! host likes via [`Request::run`].

pub mod ast;
pub mod coercion;
pub mod diagnostic;
pub mod errors;
mod executor;
pub mod lexer;
pub mod loc;
pub mod parser;
mod printer;
mod request;
pub mod schema;
pub mod source;
pub mod types;
pub mod value;
pub mod validator;

pub use errors::Errors;
pub use executor::ExecutionError;
pub use executor::ExecutionResult;
pub use executor::PathSegment;
pub use parser::ParseError;
pub use printer::print_document;
pub use printer::print_value;
pub use request::ExecutionOptions;
pub use request::Request;
pub use request::RequestError;
pub use schema::Schema;
pub use schema::SchemaBuilder;
pub use schema::SchemaError;
pub use validator::ValidationError;
pub use value::Value;
