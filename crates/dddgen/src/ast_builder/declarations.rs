//! Top-level declaration factory functions

use crate::{
    go_ast::{
        Comment, Declaration, ErrorVar, ErrorVarGroup, Field, Function, InterfaceAssertion, Param,
        Stmt, StructType, TypeExpr,
    },
    types::QualifiedReference,
};

/// Creates a `// text` comment between declarations
pub fn comment(text: &str) -> Declaration {
    Declaration::Comment(Comment {
        text: text.to_owned(),
        block: false,
    })
}

/// Creates a `/* text */` comment between declarations
pub fn block_comment(text: &str) -> Declaration {
    Declaration::Comment(Comment {
        text: text.to_owned(),
        block: true,
    })
}

/// Creates one entry of a sentinel group: `name = constructor("name")`
pub fn error_var(name: &str, constructor: &QualifiedReference, doc: String) -> ErrorVar {
    ErrorVar {
        doc,
        name: name.to_owned(),
        constructor: constructor.clone(),
    }
}

pub fn error_var_group(vars: Vec<ErrorVar>) -> Declaration {
    Declaration::ErrorVarGroup(ErrorVarGroup { vars })
}

pub fn field(name: &str, ty: TypeExpr) -> Field {
    Field {
        name: name.to_owned(),
        ty,
    }
}

pub fn struct_type(
    doc: Option<String>,
    name: &str,
    fields: Vec<Field>,
    trailing_comment: Option<&str>,
) -> Declaration {
    Declaration::StructType(StructType {
        doc,
        name: name.to_owned(),
        fields,
        trailing_comment: trailing_comment.map(str::to_owned),
    })
}

/// Creates a package-level function
pub fn function(
    doc: Option<String>,
    name: &str,
    params: Vec<Param>,
    results: Vec<Param>,
    body: Vec<Stmt>,
) -> Declaration {
    Declaration::Function(Function {
        doc,
        receiver: None,
        name: name.to_owned(),
        params,
        results,
        body,
    })
}

/// Creates a method on `receiver`
pub fn method(
    doc: Option<String>,
    receiver: Param,
    name: &str,
    params: Vec<Param>,
    results: Vec<Param>,
    body: Vec<Stmt>,
) -> Declaration {
    Declaration::Function(Function {
        doc,
        receiver: Some(receiver),
        name: name.to_owned(),
        params,
        results,
        body,
    })
}

/// Creates a compile-time interface assertion: `var _ I = (*T)(nil)`
pub fn interface_assertion(
    doc: Option<String>,
    interface: &QualifiedReference,
    implementor: &str,
) -> Declaration {
    Declaration::InterfaceAssertion(InterfaceAssertion {
        doc,
        interface: interface.clone(),
        implementor: implementor.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast_builder::{named_type, param};

    #[test]
    fn test_method_sets_receiver() {
        let declaration = method(
            None,
            param("h", named_type("XHandler")),
            "Handle",
            vec![],
            vec![],
            vec![],
        );
        let function = declaration.as_function().expect("method is a function");
        assert_eq!(function.name, "Handle");
        assert_eq!(
            function.receiver.as_ref().and_then(|r| r.name.as_deref()),
            Some("h")
        );
    }

    #[test]
    fn test_comment_styles() {
        assert_eq!(comment("x").kind(), "comment");
        match block_comment("=== Topic ===") {
            Declaration::Comment(c) => assert!(c.block),
            other => panic!("Expected comment, got {other:?}"),
        }
    }
}
