use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError, ResolveWarning};
use crate::expr::{Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

enum FunctionType {
    None,
    Function,
}

/// The state of a binding within a scope. Reading a binding that is only
/// declared is an error; a binding that is never used is a lint.
#[derive(Clone, Copy, PartialEq)]
enum BindingState {
    Declared,
    Defined,
    Used,
}

struct Binding {
    token: Token,
    state: BindingState,
}

/// A static pass over the statements that resolves every local variable use
/// to the number of scopes between the use and the declaration. The depths
/// are handed to the interpreter's side table; the AST itself is never
/// touched. Globals are not tracked and stay dynamically looked up.
pub struct Resolver<'i, 'o> {
    interpreter: &'i mut Interpreter<'o>,
    scopes: Vec<HashMap<String, Binding>>,
    current_function: FunctionType,
}

impl<'i, 'o> Resolver<'i, 'o> {
    pub fn new(interpreter: &'i mut Interpreter<'o>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement)
        }
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        let scope = self.scopes.pop().expect("stack to be not empty");

        for binding in scope.into_values() {
            if binding.state != BindingState::Used {
                ResolveWarning {
                    message: format!("Unused variable '{}'", binding.token.lexeme),
                    token: binding.token,
                }.throw();
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            }.throw();
        }
        scope.insert(name.lexeme.to_owned(), Binding {
            token: name.clone(),
            state: BindingState::Declared,
        });
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        if let Some(binding) = self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .get_mut(&name.lexeme)
        {
            binding.state = BindingState::Defined;
        }
    }

    fn resolve_local(&mut self, name: &Token) {
        for (i, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(binding) = scope.get_mut(&name.lexeme) {
                binding.state = BindingState::Used;
                self.interpreter.resolve(name, i);
                return;
            }
        }
    }
}

impl<'i, 'o> ExprVisitor<()> for Resolver<'i, 'o> {
    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(variable) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if let Some(binding) = scope.get(&variable.name.lexeme) {
                if binding.state == BindingState::Declared {
                    ResolveError {
                        token: variable.name.to_owned(),
                        message: "Can't read local variable in its own initializer.".to_string(),
                    }.throw();
                }
            }
        }

        self.resolve_local(&variable.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(assign) = expr else { unreachable!() };

        self.resolve_expr(&assign.value);
        self.resolve_local(&assign.name);
    }

    fn visit_literal_expr(&mut self, expr: &Expr) {
        let Expr::Literal(_) = expr else { unreachable!() };
    }

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(logical) = expr else { unreachable!() };

        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(unary) = expr else { unreachable!() };

        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(binary) = expr else { unreachable!() };

        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.resolve_expr(&grouping.expr);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(call) = expr else { unreachable!() };

        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_conditional_expr(&mut self, expr: &Expr) {
        let Expr::Conditional(conditional) = expr else { unreachable!() };

        self.resolve_expr(&conditional.condition);
        self.resolve_expr(&conditional.then_branch);
        self.resolve_expr(&conditional.else_branch);
    }

    fn visit_function_expr(&mut self, expr: &Expr) {
        let Expr::Function(function) = expr else { unreachable!() };

        self.resolve_function(&function.params, &function.body, FunctionType::Function);
    }
}

impl<'i, 'o> StmtVisitor<()> for Resolver<'i, 'o> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(block) = stmt else { unreachable!() };

        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(var) = stmt else { unreachable!() };

        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(function) = stmt else { unreachable!() };

        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function(&function.params, &function.body, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(expr) = stmt else { unreachable!() };

        self.resolve_expr(&expr.expr);
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(if_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(print) = stmt else { unreachable!() };

        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(return_stmt) = stmt else { unreachable!() };

        if let FunctionType::None = self.current_function {
            ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Cannot return from top-level code.".to_string(),
            }.throw();
        }

        if let Some(value) = &return_stmt.value {
            self.resolve_expr(value);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(while_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&while_stmt.condition);
        self.resolve_stmt(&while_stmt.body);
    }
}
