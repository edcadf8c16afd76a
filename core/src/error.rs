//! Compile-time error taxonomy.

/// Failure while translating an [`crate::ast::Prog`] into an [`crate::ir::RProg`].
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("in {scope}\nvariable {name} is not declared")]
    UndeclaredVariable { name: String, scope: String },

    #[error("branch list has an else arm that is not last")]
    ElseNotLast,
}
