//! Parameter substitution into macro bodies

use crate::frontend::parser::ast::*;
use crate::util::pair::Pair;
use std::collections::HashMap;

/// Macro parameter name to the argument expression bound at the call site
pub type Bindings<'a> = HashMap<&'a str, &'a Expr>;

/// Replace every variable leaf named in `bindings` with its bound argument.
///
/// Bound arguments are copied in as they are, without being walked or
/// expanded. Unlike expansion, substitution visits index expressions too.
/// No renaming happens, so a free variable of the body keeps its name and
/// resolves at the call site.
pub fn substitute(
    expr: &Expr,
    bindings: &Bindings<'_>,
) -> Expr {
    let sub = |e: &Expr| Box::new(substitute(e, bindings));

    match expr {
        Expr::Variable(name, _) => match bindings.get(name.as_str()) {
            Some(arg) => (*arg).clone(),
            None => expr.clone(),
        },
        Expr::Constant(..) => expr.clone(),
        Expr::Binary { op, lhs, rhs, span } => Expr::Binary {
            op: *op,
            lhs: sub(lhs),
            rhs: sub(rhs),
            span: *span,
        },
        Expr::Unary { op, operand, span } => Expr::Unary {
            op: *op,
            operand: sub(operand),
            span: *span,
        },
        Expr::Invoke(invoke) => Expr::Invoke(Invoke {
            name: invoke.name.clone(),
            args: invoke.args.iter().map(|arg| substitute(arg, bindings)).collect(),
            span: invoke.span,
        }),
        Expr::IndexOf { source, index, span } => Expr::IndexOf {
            source: sub(source),
            index: sub(index),
            span: *span,
        },
        Expr::RecordAccess { source, field, span } => Expr::RecordAccess {
            source: sub(source),
            field: field.clone(),
            span: *span,
        },
        Expr::RecordConstructor { fields, span } => Expr::RecordConstructor {
            fields: fields
                .iter()
                .map(|field| Pair::new(field.first().clone(), substitute(field.second(), bindings)))
                .collect(),
            span: *span,
        },
        Expr::ArrayInitialiser { elements, span } => Expr::ArrayInitialiser {
            elements: elements.iter().map(|e| substitute(e, bindings)).collect(),
            span: *span,
        },
        Expr::ArrayGenerator { value, size, span } => Expr::ArrayGenerator {
            value: sub(value),
            size: sub(size),
            span: *span,
        },
    }
}
