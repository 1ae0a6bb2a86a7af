//! Go source rendering for [`GeneratedUnit`]s
//!
//! Output follows gofmt layout: tab indentation, one blank line between
//! top-level declarations, aligned struct fields and keyed composite
//! literals, and a single import block sorted by path.

mod imports;

pub use imports::{ImportTable, is_stdlib_path};

use crate::go_ast::{
    BinaryOp, Comment, Declaration, ErrorVarGroup, Expr, Function, GeneratedUnit,
    InterfaceAssertion, Param, Stmt, StructType, TypeExpr, UnaryOp,
};

/// Render `unit` as Go source text
pub fn unparse(unit: &GeneratedUnit) -> String {
    let imports = ImportTable::for_unit(unit);
    Unparser { imports: &imports }.unit(unit)
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

/// `// text` lines at `depth`
fn line_comment(text: &str, depth: usize) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                format!("{}//\n", tabs(depth))
            } else {
                format!("{}// {line}\n", tabs(depth))
            }
        })
        .collect()
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

struct Unparser<'a> {
    imports: &'a ImportTable,
}

impl Unparser<'_> {
    fn unit(&self, unit: &GeneratedUnit) -> String {
        let mut out = String::new();
        if let Some(provenance) = &unit.provenance {
            out.push_str(&line_comment(provenance, 0));
            out.push('\n');
        }
        if let Some(doc) = &unit.package_doc {
            out.push_str(&line_comment(doc, 0));
        }
        out.push_str(&format!("package {}\n", unit.package));

        let specs = self.imports.specs();
        if let [single] = specs.as_slice() {
            out.push_str(&format!("\nimport {single}\n"));
        } else if !specs.is_empty() {
            out.push_str("\nimport (\n");
            for spec in &specs {
                out.push_str(&format!("\t{spec}\n"));
            }
            out.push_str(")\n");
        }

        for declaration in &unit.declarations {
            out.push('\n');
            out.push_str(&self.declaration(declaration));
        }
        out
    }

    fn declaration(&self, declaration: &Declaration) -> String {
        match declaration {
            Declaration::Comment(comment) => Self::comment(comment),
            Declaration::ErrorVarGroup(group) => self.error_var_group(group),
            Declaration::StructType(struct_type) => self.struct_type(struct_type),
            Declaration::Function(function) => self.function(function),
            Declaration::InterfaceAssertion(assertion) => self.interface_assertion(assertion),
        }
    }

    fn comment(comment: &Comment) -> String {
        if comment.block {
            let body: String = comment
                .text
                .lines()
                .map(|line| format!("\t{line}\n"))
                .collect();
            format!("/*\n{body}*/\n")
        } else {
            line_comment(&comment.text, 0)
        }
    }

    fn error_var_group(&self, group: &ErrorVarGroup) -> String {
        let mut out = String::from("var (\n");
        for var in &group.vars {
            out.push_str(&line_comment(&var.doc, 1));
            out.push_str(&format!(
                "\t{} = {}({})\n",
                var.name,
                self.imports.qualify(&var.constructor),
                string_literal(&var.name)
            ));
        }
        out.push_str(")\n");
        out
    }

    fn struct_type(&self, struct_type: &StructType) -> String {
        let mut out = struct_type
            .doc
            .as_deref()
            .map(|doc| line_comment(doc, 0))
            .unwrap_or_default();
        if struct_type.fields.is_empty() && struct_type.trailing_comment.is_none() {
            out.push_str(&format!("type {} struct{{}}\n", struct_type.name));
            return out;
        }

        out.push_str(&format!("type {} struct {{\n", struct_type.name));
        let width = struct_type
            .fields
            .iter()
            .map(|field| field.name.len())
            .max()
            .unwrap_or(0);
        for field in &struct_type.fields {
            out.push_str(&format!(
                "\t{:<width$} {}\n",
                field.name,
                self.type_expr(&field.ty)
            ));
        }
        if let Some(trailing) = &struct_type.trailing_comment {
            if !struct_type.fields.is_empty() {
                out.push('\n');
            }
            out.push_str(&line_comment(trailing, 1));
        }
        out.push_str("}\n");
        out
    }

    fn function(&self, function: &Function) -> String {
        let mut out = function
            .doc
            .as_deref()
            .map(|doc| line_comment(doc, 0))
            .unwrap_or_default();
        out.push_str("func ");
        if let Some(receiver) = &function.receiver {
            out.push_str(&format!("({}) ", self.param(receiver)));
        }
        out.push_str(&function.name);
        out.push_str(&self.signature(&function.params, &function.results));
        out.push_str(" {\n");
        out.push_str(&self.body(&function.body, 1));
        out.push_str("}\n");
        out
    }

    fn interface_assertion(&self, assertion: &InterfaceAssertion) -> String {
        let mut out = assertion
            .doc
            .as_deref()
            .map(|doc| line_comment(doc, 0))
            .unwrap_or_default();
        out.push_str(&format!(
            "var _ {} = (*{})(nil)\n",
            self.imports.qualify(&assertion.interface),
            assertion.implementor
        ));
        out
    }

    fn type_expr(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Qual(reference) => self.imports.qualify(reference),
            TypeExpr::Pointer(inner) => format!("*{}", self.type_expr(inner)),
        }
    }

    fn param(&self, param: &Param) -> String {
        match &param.name {
            Some(name) => format!("{name} {}", self.type_expr(&param.ty)),
            None => self.type_expr(&param.ty),
        }
    }

    /// `(params) results`, with results parenthesized unless a single
    /// unnamed type
    fn signature(&self, params: &[Param], results: &[Param]) -> String {
        let params: Vec<String> = params.iter().map(|p| self.param(p)).collect();
        let mut out = format!("({})", params.join(", "));
        match results {
            [] => {}
            [single] if single.name.is_none() => {
                out.push(' ');
                out.push_str(&self.type_expr(&single.ty));
            }
            _ => {
                let results: Vec<String> = results.iter().map(|r| self.param(r)).collect();
                out.push_str(&format!(" ({})", results.join(", ")));
            }
        }
        out
    }

    fn body(&self, body: &[Stmt], depth: usize) -> String {
        body.iter().map(|stmt| self.stmt(stmt, depth)).collect()
    }

    /// A statement as complete lines at `depth`
    fn stmt(&self, stmt: &Stmt, depth: usize) -> String {
        match stmt {
            Stmt::Comment(text) => line_comment(text, depth),
            Stmt::Annotated { stmt, comment } => {
                let rendered = self.stmt(stmt, depth);
                format!("{} // {comment}\n", rendered.trim_end_matches('\n'))
            }
            Stmt::If { init, cond, body } => {
                let mut header = String::from("if ");
                if let Some(init) = init {
                    header.push_str(&self.simple_stmt(init, depth));
                    header.push_str("; ");
                }
                header.push_str(&self.expr(cond, depth));
                format!(
                    "{indent}{header} {{\n{}{indent}}}\n",
                    self.body(body, depth + 1),
                    indent = tabs(depth)
                )
            }
            _ => format!("{}{}\n", tabs(depth), self.simple_stmt(stmt, depth)),
        }
    }

    /// A statement without indentation or newline, as used in `if` headers
    fn simple_stmt(&self, stmt: &Stmt, depth: usize) -> String {
        match stmt {
            Stmt::Expr(expr) => self.expr(expr, depth),
            Stmt::Define { targets, value } => {
                format!("{} := {}", targets.join(", "), self.expr(value, depth))
            }
            Stmt::Assign { targets, value } => {
                format!("{} = {}", targets.join(", "), self.expr(value, depth))
            }
            Stmt::Var { name, ty } => format!("var {name} {}", self.type_expr(ty)),
            Stmt::Return(values) if values.is_empty() => "return".to_owned(),
            Stmt::Return(values) => format!("return {}", self.expr_list(values, depth)),
            Stmt::Comment(_) | Stmt::Annotated { .. } | Stmt::If { .. } => {
                self.stmt(stmt, depth).trim().to_owned()
            }
        }
    }

    fn expr_list(&self, exprs: &[Expr], depth: usize) -> String {
        exprs
            .iter()
            .map(|expr| self.expr(expr, depth))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// An expression; multi-line forms close at `depth`
    fn expr(&self, expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Qual(reference) => self.imports.qualify(reference),
            Expr::StringLit(value) => string_literal(value),
            Expr::Selector { value, field } => format!("{}.{field}", self.expr(value, depth)),
            Expr::Call { func, args } => {
                format!("{}({})", self.expr(func, depth), self.expr_list(args, depth))
            }
            Expr::Unary { op, operand } => {
                let op = match op {
                    UnaryOp::Not => "!",
                    UnaryOp::AddressOf => "&",
                };
                format!("{op}{}", self.expr(operand, depth))
            }
            Expr::Binary { left, op, right } => {
                let op = match op {
                    BinaryOp::Eq => "==",
                    BinaryOp::NotEq => "!=",
                };
                format!(
                    "{} {op} {}",
                    self.expr(left, depth),
                    self.expr(right, depth)
                )
            }
            Expr::FuncLit {
                params,
                results,
                body,
            } => format!(
                "func{} {{\n{}{}}}",
                self.signature(params, results),
                self.body(body, depth + 1),
                tabs(depth)
            ),
            Expr::CompositeLit { ty, fields } => self.composite_lit(ty, fields, depth),
            Expr::New(ty) => format!("new({})", self.type_expr(ty)),
        }
    }

    /// Keyed literal, one aligned `key: value,` per line
    fn composite_lit(&self, ty: &TypeExpr, fields: &[(String, Expr)], depth: usize) -> String {
        let ty = self.type_expr(ty);
        if fields.is_empty() {
            return format!("{ty}{{}}");
        }
        let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
        let lines: String = fields
            .iter()
            .map(|(key, value)| {
                let key = format!("{key}:");
                format!(
                    "{}{key:<width$} {},\n",
                    tabs(depth + 1),
                    self.expr(value, depth + 1)
                )
            })
            .collect();
        format!("{ty}{{\n{lines}{}}}", tabs(depth))
    }
}

#[cfg(test)]
mod tests;
