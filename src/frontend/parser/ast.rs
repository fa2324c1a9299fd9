//! Abstract Syntax Tree types

use crate::util::pair::Pair;
use crate::util::span::Span;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Literal constant value.
///
/// `Array` and `Record` only arise from reducing a switch case label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    Char(char),
    String(String),
    Array(Vec<Constant>),
    Record(IndexMap<String, Constant>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnOp {
    Neg,
    Not,
    LengthOf,
}

/// Method or macro invocation `name(args)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoke {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Constant(Constant, Span),
    Variable(String, Span),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },
    Invoke(Invoke),
    IndexOf {
        source: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    RecordAccess {
        source: Box<Expr>,
        field: String,
        span: Span,
    },
    RecordConstructor {
        fields: Vec<Pair<String, Expr>>,
        span: Span,
    },
    ArrayInitialiser {
        elements: Vec<Expr>,
        span: Span,
    },
    ArrayGenerator {
        value: Box<Expr>,
        size: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Constant(_, span) | Expr::Variable(_, span) => *span,
            Expr::Invoke(invoke) => invoke.span,
            Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::IndexOf { span, .. }
            | Expr::RecordAccess { span, .. }
            | Expr::RecordConstructor { span, .. }
            | Expr::ArrayInitialiser { span, .. }
            | Expr::ArrayGenerator { span, .. } => *span,
        }
    }

    /// Variables, index-of and record-access may appear left of `=`
    #[inline]
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            Expr::Variable(..) | Expr::IndexOf { .. } | Expr::RecordAccess { .. }
        )
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Variable declaration: `Type name [= expr]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub ty: Type,
    pub name: String,
    pub initialiser: Option<Expr>,
}

/// Switch case; a `None` value is the default case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub value: Option<Constant>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Case {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.value.is_none()
    }
}

/// Statement kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    Assert(Expr),
    Print(Expr),
    Return(Option<Expr>),
    /// `lhs = rhs`; `lhs` is always an lvalue
    Assign {
        lhs: Expr,
        rhs: Expr,
    },
    VariableDeclaration(VarDecl),
    IfElse {
        condition: Expr,
        true_branch: Vec<Stmt>,
        false_branch: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        body: Vec<Stmt>,
        condition: Expr,
    },
    For {
        declaration: VarDecl,
        condition: Expr,
        increment: Box<Stmt>,
        body: Vec<Stmt>,
    },
    Switch {
        expr: Expr,
        cases: Vec<Case>,
    },
    Break,
    Continue,
    Invoke(Invoke),
}

/// Type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Type {
    Int(Span),
    Bool(Span),
    Char(Span),
    String(Span),
    Void(Span),
    Array {
        element: Box<Type>,
        span: Span,
    },
    /// Record of `(field-type, field-name)` pairs, names unique
    Record {
        fields: Vec<Pair<Type, String>>,
        span: Span,
    },
    Named(String, Span),
}

impl Type {
    pub fn span(&self) -> Span {
        match self {
            Type::Int(span)
            | Type::Bool(span)
            | Type::Char(span)
            | Type::String(span)
            | Type::Void(span)
            | Type::Named(_, span) => *span,
            Type::Array { span, .. } | Type::Record { span, .. } => *span,
        }
    }
}

/// Type declaration: `type Name is Type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// Macro declaration: `macro name(a, b) is expr`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expr,
    pub span: Span,
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
    pub span: Span,
}

/// Method declaration: `Type name(params) { body }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub ret: Type,
    pub params: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decl {
    Type(TypeDecl),
    Macro(MacroDecl),
    Method(MethodDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Type(decl) => &decl.name,
            Decl::Macro(decl) => &decl.name,
            Decl::Method(decl) => &decl.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Type(decl) => decl.span,
            Decl::Macro(decl) => decl.span,
            Decl::Method(decl) => decl.span,
        }
    }
}

/// A parsed source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub filename: String,
    pub decls: Vec<Decl>,
}

impl File {
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Method(method) => Some(method),
            _ => None,
        })
    }

    /// Look up a method by name; the last declaration wins
    pub fn method(
        &self,
        name: &str,
    ) -> Option<&MethodDecl> {
        self.methods().filter(|m| m.name == name).last()
    }
}

// Display renders a compact source-like form with every binary operation
// parenthesised, which makes tree shape visible in diagnostics and tests.

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        };
        f.write_str(text)
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Constant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Constant::Null => f.write_str("null"),
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Int(n) => write!(f, "{}", n),
            Constant::Char(c) => write!(f, "{:?}", c),
            Constant::String(s) => write!(f, "{:?}", s),
            Constant::Array(values) => {
                f.write_str("[")?;
                write_list(f, values)?;
                f.write_str("]")
            }
            Constant::Record(fields) => {
                f.write_str("{")?;
                write_list(f, fields.iter().map(|(k, v)| format!("{}: {}", k, v)))?;
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Expr::Constant(c, _) => write!(f, "{}", c),
            Expr::Variable(name, _) => f.write_str(name),
            Expr::Binary { op, lhs, rhs, .. } => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Unary { op, operand, .. } => match op {
                UnOp::Neg => write!(f, "-{}", operand),
                UnOp::Not => write!(f, "!{}", operand),
                UnOp::LengthOf => write!(f, "|{}|", operand),
            },
            Expr::Invoke(invoke) => {
                write!(f, "{}(", invoke.name)?;
                write_list(f, &invoke.args)?;
                f.write_str(")")
            }
            Expr::IndexOf { source, index, .. } => write!(f, "{}[{}]", source, index),
            Expr::RecordAccess { source, field, .. } => write!(f, "{}.{}", source, field),
            Expr::RecordConstructor { fields, .. } => {
                f.write_str("{")?;
                write_list(
                    f,
                    fields
                        .iter()
                        .map(|p| format!("{}: {}", p.first(), p.second())),
                )?;
                f.write_str("}")
            }
            Expr::ArrayInitialiser { elements, .. } => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            Expr::ArrayGenerator { value, size, .. } => write!(f, "[{}; {}]", value, size),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Type::Int(_) => f.write_str("int"),
            Type::Bool(_) => f.write_str("bool"),
            Type::Char(_) => f.write_str("char"),
            Type::String(_) => f.write_str("string"),
            Type::Void(_) => f.write_str("void"),
            Type::Array { element, .. } => write!(f, "{}[]", element),
            Type::Record { fields, .. } => {
                f.write_str("{")?;
                write_list(
                    f,
                    fields
                        .iter()
                        .map(|p| format!("{} {}", p.first(), p.second())),
                )?;
                f.write_str("}")
            }
            Type::Named(name, _) => f.write_str(name),
        }
    }
}
