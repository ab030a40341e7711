//! The closed GraphQL type system: a tagged union of the six named type
//! kinds plus the nullable/list wrapping around them, with capability
//! predicates (`is_input_type`, `is_leaf_type`, ...) standing in for the
//! marker-interface inheritance a class-based implementation would reach for.

mod argument;
mod deprecation;
mod directive;
mod enum_type;
mod field;
mod input_object;
mod interface;
mod object;
mod scalar;
mod union_type;

pub use argument::Argument;
pub use deprecation::DeprecationState;
pub use directive::Directive;
pub use directive::DirectiveLocation;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field::Field;
pub use field::ResolveContext;
pub use field::ResolveFn;
pub use field::ResolveResult;
pub use input_object::InputField;
pub use input_object::InputObjectType;
pub use interface::InterfaceType;
pub use object::ObjectType;
pub use scalar::ScalarType;
pub use union_type::UnionType;

use std::sync::Arc;
use std::sync::OnceLock;

/// One of the six named type kinds a schema can define, plus the five
/// scalars built into every schema.
#[derive(Clone)]
pub enum Type {
    Boolean,
    Float,
    Id,
    Int,
    String,
    Scalar(Arc<ScalarType>),
    Object(Arc<ObjectType>),
    Interface(Arc<InterfaceType>),
    Union(Arc<UnionType>),
    Enum(Arc<EnumType>),
    InputObject(Arc<InputObjectType>),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Boolean => "Boolean",
            Type::Float => "Float",
            Type::Id => "ID",
            Type::Int => "Int",
            Type::String => "String",
            Type::Scalar(t) => &t.name,
            Type::Object(t) => &t.name,
            Type::Interface(t) => &t.name,
            Type::Union(t) => &t.name,
            Type::Enum(t) => &t.name,
            Type::InputObject(t) => &t.name,
        }
    }

    pub fn is_builtin_scalar(&self) -> bool {
        matches!(self, Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String)
    }

    /// `InputType`: usable as the type of an argument, input field, or
    /// variable.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String
                | Type::Scalar(_) | Type::Enum(_) | Type::InputObject(_),
        )
    }

    /// `OutputType`: usable as the type of a field.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, Type::InputObject(_))
    }

    /// `LeafType`: has no selection set; coerces directly to/from a scalar
    /// representation.
    pub fn is_leaf_type(&self) -> bool {
        matches!(
            self,
            Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String
                | Type::Scalar(_) | Type::Enum(_),
        )
    }

    /// `CompositeType`: has fields and requires a selection set.
    pub fn is_composite_type(&self) -> bool {
        matches!(self, Type::Object(_) | Type::Interface(_) | Type::Union(_))
    }

    /// `AbstractType`: resolves to one of several possible concrete object
    /// types at runtime.
    pub fn is_abstract_type(&self) -> bool {
        matches!(self, Type::Interface(_) | Type::Union(_))
    }

    pub fn as_object(&self) -> Option<&Arc<ObjectType>> {
        match self {
            Type::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Arc<InterfaceType>> {
        match self {
            Type::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&Arc<UnionType>> {
        match self {
            Type::Union(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self {
            Type::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&Arc<InputObjectType>> {
        match self {
            Type::InputObject(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Arc<ScalarType>> {
        match self {
            Type::Scalar(t) => Some(t),
            _ => None,
        }
    }

    /// The fields of an Object or Interface type (composite output types
    /// that carry a field set), `None` for anything else.
    pub fn fields(&self) -> Option<&indexmap::IndexMap<String, Field>> {
        match self {
            Type::Object(t) => Some(&t.fields),
            Type::Interface(t) => Some(&t.fields),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.name())
    }
}

/// A type reference as it appears in field/argument/variable position:
/// a named type, wrapped in zero or more `List`/`NonNull` layers.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    Named(Type),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(type_: Type) -> Self {
        TypeRef::Named(type_)
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeRef::NonNull(_))
    }

    /// Strips any `NonNull` wrapper, returning the nullable type underneath.
    pub fn nullable_type(&self) -> TypeRef {
        match self {
            TypeRef::NonNull(inner) => (**inner).clone(),
            other => other.clone(),
        }
    }

    /// The named type at the bottom of the wrapping.
    pub fn named_type(&self) -> &Type {
        match self {
            TypeRef::Named(t) => t,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn is_input_type(&self) -> bool {
        self.named_type().is_input_type()
    }

    pub fn is_output_type(&self) -> bool {
        self.named_type().is_output_type()
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(t) => write!(f, "{}", t.name()),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Exactly one of {an already-known [`TypeRef`], a nullary producer of one}
/// -- the mechanism that lets schema construction describe
/// mutually-referential types (e.g. `Person.bestFriend: Person`) without
/// requiring the referenced type to already exist.
#[derive(Clone)]
pub enum TypeRefInit {
    Eager(TypeRef),
    Lazy(Arc<dyn Fn() -> TypeRef + Send + Sync>),
}

impl TypeRefInit {
    pub fn eager(type_ref: TypeRef) -> Self {
        TypeRefInit::Eager(type_ref)
    }

    pub fn lazy(f: impl Fn() -> TypeRef + Send + Sync + 'static) -> Self {
        TypeRefInit::Lazy(Arc::new(f))
    }
}

impl std::fmt::Debug for TypeRefInit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRefInit::Eager(t) => write!(f, "TypeRefInit::Eager({t})"),
            TypeRefInit::Lazy(_) => write!(f, "TypeRefInit::Lazy(..)"),
        }
    }
}

/// A [`TypeRefInit`] plus a cache for the [`TypeRef`] it resolves to,
/// computed (and memoized) on first access.
pub struct LazyTypeRef {
    init: TypeRefInit,
    cache: OnceLock<TypeRef>,
}

impl LazyTypeRef {
    pub fn new(init: TypeRefInit) -> Self {
        Self { init, cache: OnceLock::new() }
    }

    pub fn get(&self) -> &TypeRef {
        self.cache.get_or_init(|| match &self.init {
            TypeRefInit::Eager(t) => t.clone(),
            TypeRefInit::Lazy(f) => f(),
        })
    }
}

impl Clone for LazyTypeRef {
    fn clone(&self) -> Self {
        Self { init: self.init.clone(), cache: self.cache.get().cloned().map(OnceLock::from).unwrap_or_default() }
    }
}

impl std::fmt::Debug for LazyTypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LazyTypeRef({:?})", self.init)
    }
}

impl PartialEq for LazyTypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
