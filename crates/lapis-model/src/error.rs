use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or addressing a code model.
///
/// Resolution itself never produces these: an unresolvable expression
/// degrades to an empty candidate set. They surface only when a caller
/// constructs a model with stale handles or conflicting declarations.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A scope handle that does not belong to this model.
    #[error("unknown scope handle sc{index}")]
    #[diagnostic(code(lapis_model::unknown_scope))]
    UnknownScope { index: u32 },

    /// A symbol handle that does not belong to this model.
    #[error("unknown symbol handle s{index}")]
    #[diagnostic(code(lapis_model::unknown_symbol))]
    UnknownSymbol { index: u32 },

    /// A non-overloadable name declared twice in one scope.
    #[error("duplicate definition: `{name}` is already declared in this scope")]
    #[diagnostic(
        code(lapis_model::duplicate_definition),
        help("functions may be overloaded; variables and typedefs may not")
    )]
    DuplicateDefinition { name: String },

    /// A template type parameter attached to something other than a class
    /// scope.
    #[error("template parameters may only be declared in a class scope")]
    #[diagnostic(code(lapis_model::not_a_class_scope))]
    NotAClassScope,
}
