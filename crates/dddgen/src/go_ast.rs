//! Declaration tree for generated Go units
//!
//! The node set is deliberately small: it covers exactly the constructs the
//! command handler generator emits. Nodes carry no source positions; the
//! unparser decides layout.

use crate::types::QualifiedReference;

/// A type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Builtin or package-local type: `error`, `bool`, `IncreaseBalance`
    Named(String),
    /// Type declared in another package: `account.Account`
    Qual(QualifiedReference),
    /// `*T`
    Pointer(Box<TypeExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!x`
    Not,
    /// `&x`
    AddressOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
}

/// A function parameter or result; results may be unnamed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

/// An expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Ident(String),
    /// Value declared in another package: `errwrap.Wrap`, `json.Marshal`
    Qual(QualifiedReference),
    StringLit(String),
    /// `value.field`
    Selector {
        value: Box<Expr>,
        field: String,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// `func(params) (results) { body }`
    FuncLit {
        params: Vec<Param>,
        results: Vec<Param>,
        body: Vec<Stmt>,
    },
    /// `Type{key: value, ...}`
    CompositeLit {
        ty: TypeExpr,
        fields: Vec<(String, Expr)>,
    },
    /// `new(T)`
    New(TypeExpr),
}

/// A statement inside a function body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Expr(Expr),
    /// `a, b := value`
    Define {
        targets: Vec<String>,
        value: Expr,
    },
    /// `a = value`
    Assign {
        targets: Vec<String>,
        value: Expr,
    },
    /// `var name T`
    Var {
        name: String,
        ty: TypeExpr,
    },
    /// `if init; cond { body }`
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Vec<Stmt>,
    },
    Return(Vec<Expr>),
    Comment(String),
    /// A statement followed by a `// comment` on the same line
    Annotated {
        stmt: Box<Stmt>,
        comment: String,
    },
}

/// A free-standing comment between declarations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: String,
    /// Render as `/* ... */` instead of `// ...` lines
    pub block: bool,
}

/// One sentinel of an error variable group: `Name = constructor("Name")`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorVar {
    pub doc: String,
    pub name: String,
    pub constructor: QualifiedReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorVarGroup {
    pub vars: Vec<ErrorVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    pub doc: Option<String>,
    pub name: String,
    pub fields: Vec<Field>,
    /// Comment placed after the fields, separated by a blank line
    pub trailing_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub doc: Option<String>,
    pub receiver: Option<Param>,
    pub name: String,
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// `var _ Interface = (*Implementor)(nil)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceAssertion {
    pub doc: Option<String>,
    pub interface: QualifiedReference,
    pub implementor: String,
}

/// A top-level declaration of a generated unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Comment(Comment),
    ErrorVarGroup(ErrorVarGroup),
    StructType(StructType),
    Function(Function),
    InterfaceAssertion(InterfaceAssertion),
}

impl Declaration {
    /// Short kind label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
            Self::ErrorVarGroup(_) => "error-var-group",
            Self::StructType(_) => "struct",
            Self::Function(_) => "func",
            Self::InterfaceAssertion(_) => "interface-assertion",
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// One Go source file worth of declarations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedUnit {
    pub package: String,
    /// Provenance header placed above the package clause
    pub provenance: Option<String>,
    /// Package doc comment attached to the package clause
    pub package_doc: Option<String>,
    pub declarations: Vec<Declaration>,
}

impl GeneratedUnit {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            provenance: None,
            package_doc: None,
            declarations: Vec::new(),
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.declarations.iter().filter_map(Declaration::as_function)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions().find(|function| function.name == name)
    }

    pub fn error_vars(&self) -> impl Iterator<Item = &ErrorVar> {
        self.declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::ErrorVarGroup(group) => Some(group),
                _ => None,
            })
            .flat_map(|group| group.vars.iter())
    }

    pub fn struct_type(&self, name: &str) -> Option<&StructType> {
        self.declarations.iter().find_map(|declaration| match declaration {
            Declaration::StructType(st) if st.name == name => Some(st),
            _ => None,
        })
    }

    pub fn interface_assertions(&self) -> impl Iterator<Item = &InterfaceAssertion> {
        self.declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::InterfaceAssertion(assertion) => Some(assertion),
                _ => None,
            })
    }
}
