use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use super::*;
use crate::{
    ast_builder::{
        declarations, named_type, param, qual_type, result,
        expressions::{ident, string_lit},
        statements::return_stmt,
    },
    code_generator::{gen_command, gen_doc, stub_command},
    directive::GenerationKind,
    test_utils::{directive, full_config},
    types::QualifiedReference,
};

#[test]
fn test_archive_account_generated_unit() {
    let config = full_config();
    let directive = directive("ArchiveAccount", GenerationKind::Update, true, false, vec![]);
    let unit = gen_command(&directive, &config).unwrap();
    assert_snapshot!(unparse(&unit), @r#"
// Code generated by 'ddd-gen app command': DO NOT EDIT.

package command

import (
	"context"
	"encoding/json"
	errwrap "github.com/hashicorp/errwrap"
	error1 "github.com/xoe-labs/ddd-gen/internal/test-svc/app/error"
	policy "github.com/xoe-labs/ddd-gen/internal/test-svc/app/policy"
	repository "github.com/xoe-labs/ddd-gen/internal/test-svc/app/repository"
	account "github.com/xoe-labs/ddd-gen/internal/test-svc/domain/account"
	"reflect"
)

// Topic: Account

var (
	// ErrNotAuthorizedToArchiveAccount signals that the caller is not authorized to perform ArchiveAccount
	ErrNotAuthorizedToArchiveAccount = error1.NewAuthorizationError("ErrNotAuthorizedToArchiveAccount")
	// ErrArchiveAccountNotIdentifiable signals that ArchiveAccount's command object was not identifiable
	ErrArchiveAccountNotIdentifiable = error1.NewIdentificationError("ErrArchiveAccountNotIdentifiable")
	// ErrArchiveAccountFailedInRepository signals that ArchiveAccount failed in the repository layer
	ErrArchiveAccountFailedInRepository = error1.NewRepositoryError("ErrArchiveAccountFailedInRepository")
	// ErrArchiveAccountFailedInDomain signals that ArchiveAccount failed in the domain layer
	ErrArchiveAccountFailedInDomain = error1.NewDomainError("ErrArchiveAccountFailedInDomain")
)

// ArchiveAccountHandler knows how to perform ArchiveAccount
type ArchiveAccountHandler struct {
	pol policy.Policer
	agg repository.Repository
}

// NewArchiveAccountHandler returns ArchiveAccountHandler
func NewArchiveAccountHandler(pol policy.Policer, agg repository.Repository) *ArchiveAccountHandler {
	if reflect.ValueOf(pol).IsZero() {
		panic("no 'pol' provided!")
	}
	if reflect.ValueOf(agg).IsZero() {
		panic("no 'agg' provided!")
	}
	return &ArchiveAccountHandler{
		pol: pol,
		agg: agg,
	}
}

// Handle generically performs ArchiveAccount
func (h ArchiveAccountHandler) Handle(ctx context.Context, aa ArchiveAccount) error {
	if !aa.IsIdentifiable() {
		return ErrArchiveAccountNotIdentifiable
	}
	err := h.agg.Update(ctx, aa, func(a *account.Account) error {
		data, err := json.Marshal(a)
		if err != nil {
			panic(err) // invariant violation: the domain shall always be consistent!
		}
		if ok := h.pol.Can(ctx, aa, "ArchiveAccount", data); !ok {
			return ErrNotAuthorizedToArchiveAccount
		}
		if err := aa.handle(ctx, a); err != nil {
			return errwrap.Wrap(ErrArchiveAccountFailedInDomain, err)
		}
		return nil
	})
	if err != nil {
		if errwrap.Contains(err, ErrNotAuthorizedToArchiveAccount.Error()) {
			return err
		}
		if errwrap.Contains(err, ErrArchiveAccountFailedInDomain.Error()) {
			return err
		}
		return errwrap.Wrap(ErrArchiveAccountFailedInRepository, err)
	}
	return nil
}

// IsIdentifiable answers whether ArchiveAccount's command object carries an identifier
func (aa ArchiveAccount) IsIdentifiable() bool {
	return !reflect.ValueOf(aa.Identifier()).IsZero()
}
"#);
}

#[test]
fn test_make_new_account_stub_unit() {
    let config = full_config();
    let directive = directive("MakeNewAccount", GenerationKind::Create, false, false, vec![]);
    let unit = stub_command(&directive, &config).unwrap();
    assert_snapshot!(unparse(&unit), @r#"
// Code generated by 'ddd-gen app command': THESE ARE STUBS, PLEASE EDIT.

package command

import (
	"context"
	domain "github.com/xoe-labs/ddd-gen/internal/test-svc/domain"
	account "github.com/xoe-labs/ddd-gen/internal/test-svc/domain/account"
)

/*
	=== Topic: Account ===
*/

// MakeNewAccount represents a MakeNewAccount command
type MakeNewAccount struct {
	uuid           domain.Identifier
	userId         domain.User
	elevationToken domain.ElevationToken

	// TODO: design command event/message fields (evtl. use protobuf + protoc-gen-go)
}

// handle specifically performs MakeNewAccount
func (mna *MakeNewAccount) handle(ctx context.Context, a *account.Account) error {
	// TODO: implement app logic
	return nil
}
"#);
}

#[test]
fn test_doc_unit() {
    assert_eq!(
        unparse(&gen_doc("command")),
        "// Package command implements application layer commands\npackage command\n"
    );
}

#[test]
fn test_single_import_has_no_block() {
    let mut unit = GeneratedUnit::new("command");
    unit.declarations.push(declarations::function(
        None,
        "Now",
        vec![],
        vec![result(qual_type(&QualifiedReference::new("time", "Time")))],
        vec![return_stmt(vec![ident("t")])],
    ));
    let rendered = unparse(&unit);
    assert!(rendered.contains("\nimport \"time\"\n"), "{rendered}");
    assert!(rendered.contains("func Now() time.Time {\n\treturn t\n}\n"));
}

#[test]
fn test_alias_avoids_declared_names() {
    let account = QualifiedReference::new("github.com/acme/account", "Account");
    let mut unit = GeneratedUnit::new("command");
    unit.declarations.push(declarations::function(
        None,
        "f",
        vec![param("account", qual_type(&account))],
        vec![],
        vec![],
    ));
    let rendered = unparse(&unit);
    assert!(rendered.contains("account1 \"github.com/acme/account\""), "{rendered}");
    assert!(rendered.contains("func f(account account1.Account) {"));
}

#[test]
fn test_string_literal_escaping() {
    let mut unit = GeneratedUnit::new("command");
    unit.declarations.push(declarations::function(
        None,
        "f",
        vec![],
        vec![result(named_type("string"))],
        vec![return_stmt(vec![string_lit("say \"hi\"\n")])],
    ));
    assert!(unparse(&unit).contains(r#"return "say \"hi\"\n""#));
}
