//! `Handle` method synthesis
//!
//! Two protocols share one skeleton: guard identity, call the repository with
//! a callback, classify the repository's error.
//!
//! - Mutate (`Remove`, `Update`): the repository loads the aggregate and hands
//!   it to the callback, which checks policy *before* running the domain
//!   logic. `Handle` returns `error`.
//! - Create: the repository asks a factory for a new aggregate. The factory
//!   runs the domain logic *first* and only then checks policy, since there is
//!   nothing to authorize against before construction. `Handle` returns the
//!   repository-assigned identifier unless the command is identifiable.
//!
//! Errors raised in the callback cross the repository boundary either inside
//! the repository's error chain ([`ErrorClassification::Chain`]) or through a
//! captured `innerErr` ([`ErrorClassification::Outcome`]).

use anyhow::Result;

use super::{
    context::{CTX, GenerationContext, RECEIVER},
    shape::SentinelKind,
};
use crate::{
    ast_builder::{
        declarations, error_type, named_type, param, pointer_to, qual_type, result,
        expressions::{
            address_of, call, field, func_lit, ident, is_not_nil, method_call, new_of, nil, not,
            qual, string_lit,
        },
        statements::{annotated, assign, define, if_stmt, if_with_init, panic_with, return_stmt, var},
    },
    config::{ConfigRole, ErrorClassification},
    directive::{POLICER_FIELD, REPOSITORY_FIELD},
    go_ast::{Declaration, Expr, Param, Stmt, TypeExpr},
    types::QualifiedReference,
};

const ERRWRAP: &str = "github.com/hashicorp/errwrap";

const INNER_ERR: &str = "innerErr";
const REPO_ERR: &str = "repoErr";
const IDENTIFIER: &str = "identifier";

fn context_type() -> QualifiedReference {
    QualifiedReference::new("context", "Context")
}

fn json_marshal() -> QualifiedReference {
    QualifiedReference::new("encoding/json", "Marshal")
}

fn errwrap(name: &str) -> QualifiedReference {
    QualifiedReference::new(ERRWRAP, name)
}

/// `errwrap.Wrap(outer, inner)`
fn wrap(outer: Expr, inner: Expr) -> Expr {
    call(qual(&errwrap("Wrap")), vec![outer, inner])
}

/// Which callback protocol a body is built for
#[derive(Debug, Clone, Copy)]
struct Callback {
    create: bool,
    style: ErrorClassification,
}

impl Callback {
    /// Statements that abort the callback with `failure`
    fn fail(self, failure: Expr) -> Vec<Stmt> {
        let mut values = Vec::with_capacity(2);
        if self.create {
            values.push(nil());
        }
        match self.style {
            ErrorClassification::Chain => {
                values.push(failure);
                vec![return_stmt(values)]
            }
            ErrorClassification::Outcome => {
                values.push(ident("false"));
                vec![assign(&[INNER_ERR], failure), return_stmt(values)]
            }
        }
    }

    /// The callback's successful return
    fn succeed(self, entity_binding: &str) -> Stmt {
        let mut values = Vec::with_capacity(2);
        if self.create {
            values.push(ident(entity_binding));
        }
        values.push(match self.style {
            ErrorClassification::Chain => nil(),
            ErrorClassification::Outcome => ident("true"),
        });
        return_stmt(values)
    }

    /// Second (or only) result of the callback signature
    fn status_type(self) -> Param {
        match self.style {
            ErrorClassification::Chain => result(error_type()),
            ErrorClassification::Outcome => result(named_type("bool")),
        }
    }
}

fn entity_pointer(ctx: &GenerationContext<'_>) -> TypeExpr {
    pointer_to(qual_type(ctx.entity))
}

/// `if !c.IsIdentifiable() { return ErrXNotIdentifiable }`
fn identifiable_guard(ctx: &GenerationContext<'_>) -> Stmt {
    if_stmt(
        not(method_call(ident(&ctx.command_binding), "IsIdentifiable", vec![])),
        vec![return_stmt(vec![
            ctx.sentinel(SentinelKind::Identification),
        ])],
    )
}

/// Serialize the aggregate and ask the policer
fn policy_check(ctx: &GenerationContext<'_>, callback: Callback) -> Vec<Stmt> {
    vec![
        define(
            &["data", "err"],
            call(qual(&json_marshal()), vec![ident(&ctx.entity_binding)]),
        ),
        if_stmt(
            is_not_nil("err"),
            vec![annotated(
                panic_with(ident("err")),
                "invariant violation: the domain shall always be consistent!",
            )],
        ),
        if_with_init(
            define(
                &["ok"],
                method_call(
                    field(RECEIVER, POLICER_FIELD),
                    "Can",
                    vec![
                        ident(CTX),
                        ident(&ctx.command_binding),
                        string_lit(ctx.name()),
                        ident("data"),
                    ],
                ),
            ),
            not(ident("ok")),
            callback.fail(ctx.sentinel(SentinelKind::Authorization)),
        ),
    ]
}

/// Run the command's domain logic against the aggregate
fn domain_call(ctx: &GenerationContext<'_>, callback: Callback) -> Stmt {
    let mut args = vec![ident(CTX), ident(&ctx.entity_binding)];
    args.extend(
        ctx.directive
            .extra_adapters
            .iter()
            .map(|adapter| address_of(field(RECEIVER, &adapter.field_name))),
    );
    if_with_init(
        define(
            &["err"],
            method_call(ident(&ctx.command_binding), "handle", args),
        ),
        is_not_nil("err"),
        callback.fail(wrap(ctx.sentinel(SentinelKind::Domain), ident("err"))),
    )
}

/// Body of the repository callback
///
/// Mutate: policy, then domain. Create: allocate, domain, then policy.
fn callback_body(ctx: &GenerationContext<'_>, callback: Callback) -> Vec<Stmt> {
    let mut body = Vec::new();
    if callback.create {
        body.push(define(
            &[ctx.entity_binding.as_str()],
            new_of(qual_type(ctx.entity)),
        ));
        body.push(domain_call(ctx, callback));
        if ctx.shape.has_policy() {
            body.extend(policy_check(ctx, callback));
        }
    } else {
        if ctx.shape.has_policy() {
            body.extend(policy_check(ctx, callback));
        }
        body.push(domain_call(ctx, callback));
    }
    body.push(callback.succeed(&ctx.entity_binding));
    body
}

fn callback_literal(ctx: &GenerationContext<'_>, callback: Callback) -> Expr {
    let body = callback_body(ctx, callback);
    if callback.create {
        func_lit(
            vec![],
            vec![result(entity_pointer(ctx)), callback.status_type()],
            body,
        )
    } else {
        func_lit(
            vec![param(&ctx.entity_binding, entity_pointer(ctx))],
            vec![callback.status_type()],
            body,
        )
    }
}

/// Return values for the outer `Handle`, prefixed with the identifier when
/// the signature carries one
fn outer_return(ctx: &GenerationContext<'_>, err: Expr) -> Stmt {
    if ctx.shape.returns_identifier() {
        return_stmt(vec![ident(IDENTIFIER), err])
    } else {
        return_stmt(vec![err])
    }
}

/// Tell policy and domain failures apart from storage failures
fn classification(ctx: &GenerationContext<'_>, style: ErrorClassification) -> Vec<Stmt> {
    let repository = ctx.sentinel(SentinelKind::Repository);
    match style {
        ErrorClassification::Chain => {
            let mut arms: Vec<Stmt> = ctx
                .shape
                .passthrough_sentinels()
                .into_iter()
                .map(|kind| {
                    if_stmt(
                        call(
                            qual(&errwrap("Contains")),
                            vec![ident("err"), method_call(ctx.sentinel(kind), "Error", vec![])],
                        ),
                        vec![outer_return(ctx, ident("err"))],
                    )
                })
                .collect();
            arms.push(outer_return(ctx, wrap(repository, ident("err"))));
            vec![
                if_stmt(is_not_nil("err"), arms),
                outer_return(ctx, nil()),
            ]
        }
        ErrorClassification::Outcome => vec![
            if_stmt(
                is_not_nil(INNER_ERR),
                vec![outer_return(ctx, ident(INNER_ERR))],
            ),
            if_stmt(
                is_not_nil(REPO_ERR),
                vec![outer_return(ctx, wrap(repository, ident(REPO_ERR)))],
            ),
            outer_return(ctx, nil()),
        ],
    }
}

/// The repository call and everything after it
fn repository_call(ctx: &GenerationContext<'_>) -> Vec<Stmt> {
    let style = ctx.config.error_classification;
    let callback = Callback {
        create: ctx.shape.is_create(),
        style,
    };
    let err_name = match style {
        ErrorClassification::Chain => "err",
        ErrorClassification::Outcome => REPO_ERR,
    };

    let mut args = vec![ident(CTX)];
    if !callback.create {
        args.push(ident(&ctx.command_binding));
    }
    args.push(callback_literal(ctx, callback));
    let call_expr = method_call(
        field(RECEIVER, REPOSITORY_FIELD),
        ctx.directive.kind.repository_method(),
        args,
    );

    let targets: Vec<&str> = match (callback.create, ctx.shape.returns_identifier()) {
        (true, true) => vec![IDENTIFIER, err_name],
        (true, false) => vec!["_", err_name],
        (false, _) => vec![err_name],
    };

    let mut body = Vec::new();
    if style == ErrorClassification::Outcome {
        body.push(var(INNER_ERR, error_type()));
    }
    body.push(define(&targets, call_expr));
    body.extend(classification(ctx, style));
    body
}

/// `func (h {Name}Handler) Handle(ctx context.Context, c {Name}) ...`
pub fn build_handle_method(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    let mut results = Vec::with_capacity(2);
    if ctx.shape.returns_identifier() {
        results.push(result(qual_type(ctx.reference(ConfigRole::Identifier)?)));
    }
    results.push(result(error_type()));

    let mut body = Vec::new();
    if ctx.shape.checks_identity() {
        body.push(identifiable_guard(ctx));
    }
    body.extend(repository_call(ctx));

    Ok(declarations::method(
        Some(format!("Handle generically performs {}", ctx.name())),
        param(RECEIVER, named_type(&ctx.handler_name())),
        "Handle",
        vec![
            param(CTX, qual_type(&context_type())),
            param(&ctx.command_binding, named_type(ctx.name())),
        ],
        results,
        body,
    ))
}

/// `func (c {Name}) IsIdentifiable() bool`, backed by the stub's `Identifier()`
pub fn build_is_identifiable(ctx: &GenerationContext<'_>) -> Declaration {
    let identifier = method_call(ident(&ctx.command_binding), "Identifier", vec![]);
    declarations::method(
        Some(format!(
            "IsIdentifiable answers whether {}'s command object carries an identifier",
            ctx.name()
        )),
        param(&ctx.command_binding, named_type(ctx.name())),
        "IsIdentifiable",
        vec![],
        vec![result(named_type("bool"))],
        vec![return_stmt(vec![not(method_call(
            call(
                qual(&QualifiedReference::new("reflect", "ValueOf")),
                vec![identifier],
            ),
            "IsZero",
            vec![],
        ))])],
    )
}
