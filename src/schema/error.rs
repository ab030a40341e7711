#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Type name `{0}` is used by two different type definitions")]
    DuplicateTypeName(String),

    #[error("Type `{0}` begins with `__`, which is reserved for introspection")]
    ReservedTypeName(String),

    #[error("Field `{0}` on type `{1}` begins with `__`, which is reserved for introspection")]
    ReservedFieldName(String, String),

    #[error("Type name `{0}` is not a valid GraphQL name (must match `/^[_A-Za-z][_0-9A-Za-z]*$/`)")]
    InvalidTypeName(String),

    #[error("Field `{0}` on `{1}` is not a valid GraphQL name (must match `/^[_A-Za-z][_0-9A-Za-z]*$/`)")]
    InvalidFieldName(String, String),

    #[error("Argument `{0}` on `{1}` is not a valid GraphQL name (must match `/^[_A-Za-z][_0-9A-Za-z]*$/`)")]
    InvalidArgumentName(String, String),

    #[error("Enum `{0}` value `{1}` is not a valid GraphQL name (must match `/^[_A-Za-z][_0-9A-Za-z]*$/`)")]
    InvalidEnumValueName(String, String),

    #[error("Object `{object}` implements `{interface}` but is missing field `{field}`")]
    InterfaceFieldMissing { interface: String, object: String, field: String },

    #[error(
        "Object `{object}` field `{field}` has type `{found}`, but interface \
        `{interface}` declares it as `{expected}`"
    )]
    InterfaceFieldTypeMismatch {
        interface: String,
        object: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error(
        "Object `{object}` field `{field}` is missing argument `{argument}` \
        required by interface `{interface}`"
    )]
    InterfaceArgumentMissing { interface: String, object: String, field: String, argument: String },

    #[error(
        "Object `{object}` field `{field}` argument `{argument}` has type `{found}`, \
        but interface `{interface}` declares it as `{expected}`"
    )]
    InterfaceArgumentTypeMismatch {
        interface: String,
        object: String,
        field: String,
        argument: String,
        expected: String,
        found: String,
    },

    #[error(
        "Object `{object}` field `{field}` adds required argument `{argument}`, \
        which is not present on interface `{interface}`'s declaration of this field"
    )]
    InterfaceAdditionalRequiredArgument { interface: String, object: String, field: String, argument: String },

    #[error("Union `{0}` has no possible types")]
    EmptyUnion(String),

    #[error("Enum `{0}` has no values")]
    EmptyEnum(String),

    #[error("Input object `{0}` has no fields")]
    EmptyInputObject(String),

    #[error("Object `{0}` has no fields")]
    EmptyObject(String),

    #[error("Argument/input field `{0}` on `{1}` has a non-input type `{2}`")]
    NonInputType(String, String, String),

    #[error("Field `{0}` on `{1}` has a non-output type `{2}`")]
    NonOutputType(String, String, String),
}
