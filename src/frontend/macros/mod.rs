//! Macro expansion
//!
//! Rewrites every invocation of a declared macro into the macro's body with
//! the call's arguments substituted for its parameters. Expansion runs in
//! two phases:
//!
//! 1. Collection: name maps for macros, types and methods. A later
//!    declaration replaces an earlier one with the same name.
//! 2. Rewrite: every method body is rebuilt bottom-up; each statement gets
//!    fresh expressions with macro invocations resolved away.
//!
//! Expansion is textual. Parameters are bound positionally with no arity
//! check, bodies are not renamed apart from the call site, and a macro that
//! invokes itself recurses until the stack runs out.
//!
//! Two sub-trees are not walked unless [`ExpandOptions::full_traversal`] is
//! set: the index of an index-of expression, and the declaration and
//! increment of a for-loop.

mod substitute;

pub use substitute::{substitute, Bindings};

use crate::frontend::parser::ast::*;
use crate::util::pair::Pair;
use std::cell::Cell;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Expansion switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Also expand index expressions and for-loop headers
    pub full_traversal: bool,
}

/// Expand all macro invocations in `file`
pub fn expand(file: File) -> File {
    expand_with(file, ExpandOptions::default())
}

/// Expand all macro invocations in `file` with explicit options
pub fn expand_with(
    file: File,
    options: ExpandOptions,
) -> File {
    MacroExpander::new(&file, options).expand_file()
}

/// Declarations of one file, keyed by name
#[derive(Debug)]
pub struct MacroExpander<'a> {
    file: &'a File,
    macros: HashMap<&'a str, &'a MacroDecl>,
    types: HashMap<&'a str, &'a TypeDecl>,
    methods: HashMap<&'a str, &'a MethodDecl>,
    options: ExpandOptions,
    expansions: Cell<usize>,
}

impl<'a> MacroExpander<'a> {
    /// Collect the declarations of `file`
    pub fn new(
        file: &'a File,
        options: ExpandOptions,
    ) -> Self {
        let mut macros = HashMap::new();
        let mut types = HashMap::new();
        let mut methods = HashMap::new();

        for decl in &file.decls {
            match decl {
                Decl::Macro(m) => {
                    macros.insert(m.name.as_str(), m);
                }
                Decl::Type(t) => {
                    types.insert(t.name.as_str(), t);
                }
                Decl::Method(m) => {
                    methods.insert(m.name.as_str(), m);
                }
            }
        }

        debug!(
            "Collected {} macros, {} types, {} methods from {}",
            macros.len(),
            types.len(),
            methods.len(),
            file.filename
        );
        Self {
            file,
            macros,
            types,
            methods,
            options,
            expansions: Cell::new(0),
        }
    }

    pub fn macro_decl(
        &self,
        name: &str,
    ) -> Option<&'a MacroDecl> {
        self.macros.get(name).copied()
    }

    pub fn type_decl(
        &self,
        name: &str,
    ) -> Option<&'a TypeDecl> {
        self.types.get(name).copied()
    }

    pub fn method_decl(
        &self,
        name: &str,
    ) -> Option<&'a MethodDecl> {
        self.methods.get(name).copied()
    }

    /// Number of macro invocations expanded so far
    pub fn expansions(&self) -> usize {
        self.expansions.get()
    }

    /// Rebuild the file with every method body expanded.
    ///
    /// Type and macro declarations are carried over unchanged.
    pub fn expand_file(&self) -> File {
        let decls = self
            .file
            .decls
            .iter()
            .map(|decl| match decl {
                Decl::Method(method) => Decl::Method(self.expand_method(method)),
                other => other.clone(),
            })
            .collect();

        debug!("Expanded {} macro invocations in {}", self.expansions(), self.file.filename);
        File {
            filename: self.file.filename.clone(),
            decls,
        }
    }

    fn expand_method(
        &self,
        method: &MethodDecl,
    ) -> MethodDecl {
        MethodDecl {
            name: method.name.clone(),
            ret: method.ret.clone(),
            params: method.params.clone(),
            body: self.expand_block(&method.body),
            span: method.span,
        }
    }

    pub fn expand_block(
        &self,
        stmts: &[Stmt],
    ) -> Vec<Stmt> {
        stmts.iter().map(|stmt| self.expand_stmt(stmt)).collect()
    }

    /// Rebuild one statement with its expressions and nested blocks expanded
    pub fn expand_stmt(
        &self,
        stmt: &Stmt,
    ) -> Stmt {
        let kind = match &stmt.kind {
            StmtKind::Assert(e) => StmtKind::Assert(self.expand_expr(e)),
            StmtKind::Print(e) => StmtKind::Print(self.expand_expr(e)),
            StmtKind::Return(e) => StmtKind::Return(e.as_ref().map(|e| self.expand_expr(e))),
            StmtKind::Assign { lhs, rhs } => StmtKind::Assign {
                lhs: self.expand_expr(lhs),
                rhs: self.expand_expr(rhs),
            },
            StmtKind::VariableDeclaration(decl) => StmtKind::VariableDeclaration(self.expand_var_decl(decl)),
            StmtKind::IfElse {
                condition,
                true_branch,
                false_branch,
            } => StmtKind::IfElse {
                condition: self.expand_expr(condition),
                true_branch: self.expand_block(true_branch),
                false_branch: self.expand_block(false_branch),
            },
            StmtKind::While { condition, body } => StmtKind::While {
                condition: self.expand_expr(condition),
                body: self.expand_block(body),
            },
            StmtKind::DoWhile { body, condition } => StmtKind::DoWhile {
                body: self.expand_block(body),
                condition: self.expand_expr(condition),
            },
            StmtKind::For {
                declaration,
                condition,
                increment,
                body,
            } => {
                let (declaration, increment) = if self.options.full_traversal {
                    (self.expand_var_decl(declaration), self.expand_stmt(increment))
                } else {
                    (declaration.clone(), (**increment).clone())
                };
                StmtKind::For {
                    declaration,
                    condition: self.expand_expr(condition),
                    increment: Box::new(increment),
                    body: self.expand_block(body),
                }
            }
            StmtKind::Switch { expr, cases } => StmtKind::Switch {
                expr: self.expand_expr(expr),
                cases: cases
                    .iter()
                    .map(|case| Case {
                        value: case.value.clone(),
                        body: self.expand_block(&case.body),
                        span: case.span,
                    })
                    .collect(),
            },
            StmtKind::Break => StmtKind::Break,
            StmtKind::Continue => StmtKind::Continue,
            StmtKind::Invoke(invoke) => StmtKind::Invoke(self.expand_invoke_stmt(invoke)),
        };

        Stmt { kind, span: stmt.span }
    }

    /// An invocation statement must stay an invocation. A macro whose
    /// expansion is some other expression leaves the call in place with its
    /// arguments expanded.
    fn expand_invoke_stmt(
        &self,
        invoke: &Invoke,
    ) -> Invoke {
        match self.expand_expr(&Expr::Invoke(invoke.clone())) {
            Expr::Invoke(expanded) => expanded,
            other => {
                trace!("{} expands to non-invocation {}, keeping call", invoke.name, other);
                self.expand_args(invoke)
            }
        }
    }

    fn expand_var_decl(
        &self,
        decl: &VarDecl,
    ) -> VarDecl {
        VarDecl {
            ty: decl.ty.clone(),
            name: decl.name.clone(),
            initialiser: decl.initialiser.as_ref().map(|e| self.expand_expr(e)),
        }
    }

    /// Expand an expression bottom-up
    pub fn expand_expr(
        &self,
        expr: &Expr,
    ) -> Expr {
        let exp = |e: &Expr| Box::new(self.expand_expr(e));

        match expr {
            Expr::Invoke(invoke) => match self.macro_decl(&invoke.name) {
                Some(decl) => self.expand_macro(decl, invoke),
                None => Expr::Invoke(self.expand_args(invoke)),
            },
            Expr::Binary { op, lhs, rhs, span } => Expr::Binary {
                op: *op,
                lhs: exp(lhs),
                rhs: exp(rhs),
                span: *span,
            },
            Expr::Unary { op, operand, span } => Expr::Unary {
                op: *op,
                operand: exp(operand),
                span: *span,
            },
            Expr::IndexOf { source, index, span } => Expr::IndexOf {
                source: exp(source),
                index: if self.options.full_traversal {
                    exp(index)
                } else {
                    index.clone()
                },
                span: *span,
            },
            Expr::RecordAccess { source, field, span } => Expr::RecordAccess {
                source: exp(source),
                field: field.clone(),
                span: *span,
            },
            Expr::RecordConstructor { fields, span } => Expr::RecordConstructor {
                fields: fields
                    .iter()
                    .map(|field| Pair::new(field.first().clone(), self.expand_expr(field.second())))
                    .collect(),
                span: *span,
            },
            Expr::ArrayInitialiser { elements, span } => Expr::ArrayInitialiser {
                elements: elements.iter().map(|e| self.expand_expr(e)).collect(),
                span: *span,
            },
            Expr::ArrayGenerator { value, size, span } => Expr::ArrayGenerator {
                value: exp(value),
                size: exp(size),
                span: *span,
            },
            Expr::Constant(..) | Expr::Variable(..) => expr.clone(),
        }
    }

    fn expand_args(
        &self,
        invoke: &Invoke,
    ) -> Invoke {
        Invoke {
            name: invoke.name.clone(),
            args: invoke.args.iter().map(|arg| self.expand_expr(arg)).collect(),
            span: invoke.span,
        }
    }

    /// Bind arguments by position, substitute, then expand the result
    fn expand_macro(
        &self,
        decl: &MacroDecl,
        invoke: &Invoke,
    ) -> Expr {
        let bindings: Bindings<'_> = decl
            .params
            .iter()
            .zip(&invoke.args)
            .map(|(param, arg)| (param.as_str(), arg))
            .collect();
        if decl.params.len() != invoke.args.len() {
            trace!(
                "{} declares {} parameters, called with {} arguments",
                decl.name,
                decl.params.len(),
                invoke.args.len()
            );
        }

        self.expansions.set(self.expansions.get() + 1);
        trace!("expanding {}", invoke.name);
        self.expand_expr(&substitute(&decl.body, &bindings))
    }
}
