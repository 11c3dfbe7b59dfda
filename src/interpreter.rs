use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

type ExecResult = Result<(), Unwind>;
type EvalResult = Result<Object, Unwind>;

/// Walks the statements produced by the parser and evaluates them against
/// the environment chain. Printed values go to the output writer so callers
/// can capture them.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Interprets the statements in order. A runtime error aborts the
    /// remaining statements but leaves already-applied effects in place.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.throw(),
                    Unwind::Return(_) => unreachable!("top-level return is rejected by the resolver"),
                }
                return;
            }
        }
    }

    /// Records the scope distance of a variable use. Called by the resolver.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    /// Executes the statements inside the given environment. The previous
    /// environment is restored on every exit path, including returns and
    /// runtime errors, by capturing the result before swapping back.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    /// Reads a variable through its resolved scope distance, or from the
    /// globals when the resolver left it unannotated.
    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn binary_operation(
        result: Option<Object>,
        operator: &Token,
        types: (&str, &str),
    ) -> EvalResult {
        result.ok_or_else(|| {
            Unwind::Error(RuntimeError {
                token: operator.clone(),
                message: format!(
                    "Binary operation '{}' is not supported between {} type and {} type",
                    operator.lexeme, types.0, types.1
                ),
            })
        })
    }
}

impl<'a> StmtVisitor<ExecResult> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        writeln!(self.output, "{value}").expect("should be able to write to output");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.as_bool() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.as_bool() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        // The closure is the environment in effect at the declaration.
        let function = Function::new(
            Some(data.name.clone()),
            data.params.clone(),
            data.body.clone(),
            Rc::clone(&self.environment),
        );

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }
}

impl<'a> ExprVisitor<EvalResult> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Literal(literal) = expr else { unreachable!() };

        Ok(Object::from(literal.clone()))
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Unary(unary) = expr else { unreachable!() };

        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| {
                Unwind::Error(RuntimeError {
                    token: unary.operator.clone(),
                    message: "Operand must be a number".to_string(),
                })
            }),
            Type::Bang => Ok(!right),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Binary(binary) = expr else { unreachable!() };

        // Operands evaluate left-to-right, observably so for side effects.
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let operator = &binary.operator;
        let types = (left.type_str(), right.type_str());

        match operator.r#type {
            Type::Plus => Self::binary_operation(left + right, operator, types),
            Type::Minus => Self::binary_operation(left - right, operator, types),
            Type::Star => Self::binary_operation(left * right, operator, types),
            Type::Slash => {
                if let Object::Literal(Literal::Number(divisor)) = right {
                    if matches!(left, Object::Literal(Literal::Number(_))) && divisor == 0.0 {
                        return Err(RuntimeError {
                            token: operator.clone(),
                            message: "Cannot divide by zero".to_string(),
                        }.into());
                    }
                }

                Self::binary_operation(left / right, operator, types)
            },
            Type::Greater => Self::binary_operation(
                left.partial_cmp(&right).map(|ordering| Object::from(ordering == Ordering::Greater)),
                operator,
                types,
            ),
            Type::GreaterEqual => Self::binary_operation(
                left.partial_cmp(&right).map(|ordering| Object::from(ordering != Ordering::Less)),
                operator,
                types,
            ),
            Type::Less => Self::binary_operation(
                left.partial_cmp(&right).map(|ordering| Object::from(ordering == Ordering::Less)),
                operator,
                types,
            ),
            Type::LessEqual => Self::binary_operation(
                left.partial_cmp(&right).map(|ordering| Object::from(ordering != Ordering::Greater)),
                operator,
                types,
            ),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.evaluate(&grouping.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Variable(variable) = expr else { unreachable!() };

        Ok(self.look_up_variable(&variable.name)?)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Assign(assign) = expr else { unreachable!() };

        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.name) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Logical(logical) = expr else { unreachable!() };

        let left = self.evaluate(&logical.left)?;

        // Short-circuiting yields the deciding operand itself, not a boolean.
        if logical.operator.r#type == Type::Or {
            if left.as_bool() {
                return Ok(left);
            }
        } else if !left.as_bool() {
            return Ok(left);
        }

        self.evaluate(&logical.right)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Call(call) = expr else { unreachable!() };

        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::new();
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let function: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Expression is not callable.".to_string(),
                }.into());
            },
        };

        if arguments.len() != function.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {} arguments, got {}", function.arity(), arguments.len()),
            }.into());
        }

        function.call(self, arguments)
    }

    fn visit_conditional_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Conditional(conditional) = expr else { unreachable!() };

        if self.evaluate(&conditional.condition)?.as_bool() {
            self.evaluate(&conditional.then_branch)
        } else {
            self.evaluate(&conditional.else_branch)
        }
    }

    fn visit_function_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Function(data) = expr else { unreachable!() };

        let function = Function::new(
            None,
            data.params.clone(),
            data.body.clone(),
            Rc::clone(&self.environment),
        );

        Ok(Object::from(function))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{BinaryData, ConditionalData, GroupingData, LogicalData, UnaryData};
    use crate::token::Location;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(1, 0))
    }

    fn literal(value: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(value)))
    }

    #[test]
    fn evaluate_literal() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Literal(Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_unary_minus_requires_number() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::from("x"))),
        });

        let Err(Unwind::Error(error)) = interpreter.evaluate(&expr) else {
            panic!("expected a runtime error");
        };
        assert_eq!(error.message, "Operand must be a number");
    }

    #[test]
    fn evaluate_bang_uses_truthiness() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Bang, "!"),
            expr: Box::new(Expr::Literal(Literal::Nil)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Bang, "!"),
            expr: literal(0.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_binary() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Binary(BinaryData {
            left: literal(12.0),
            operator: token(Type::Minus, "-"),
            right: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(0.0));
    }

    #[test]
    fn evaluate_grouping() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Grouping(GroupingData {
            expr: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_string_concatenation() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("Hello"))),
            operator: token(Type::Plus, "+"),
            right: Box::new(Expr::Literal(Literal::from("World"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_string_and_number() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("Hello"))),
            operator: token(Type::Plus, "+"),
            right: literal(12.0),
        });

        let Err(Unwind::Error(error)) = interpreter.evaluate(&expr) else {
            panic!("expected a runtime error");
        };
        assert_eq!(
            error.message,
            "Binary operation '+' is not supported between string type and number type"
        );
    }

    #[test]
    fn evaluate_division_by_zero() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Binary(BinaryData {
            left: literal(1.0),
            operator: token(Type::Slash, "/"),
            right: literal(0.0),
        });

        let Err(Unwind::Error(error)) = interpreter.evaluate(&expr) else {
            panic!("expected a runtime error");
        };
        assert_eq!(error.message, "Cannot divide by zero");
    }

    #[test]
    fn evaluate_comparison() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Binary(BinaryData {
            left: literal(12.0),
            operator: token(Type::GreaterEqual, ">="),
            right: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = Expr::Binary(BinaryData {
            left: literal(12.0),
            operator: token(Type::Less, "<"),
            right: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_comparison_requires_numbers() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("a"))),
            operator: token(Type::Greater, ">"),
            right: Box::new(Expr::Literal(Literal::from("b"))),
        });

        assert!(interpreter.evaluate(&expr).is_err());
    }

    #[test]
    fn evaluate_equality() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Binary(BinaryData {
            left: literal(12.0),
            operator: token(Type::EqualEqual, "=="),
            right: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = Expr::Binary(BinaryData {
            left: literal(12.0),
            operator: token(Type::BangEqual, "!="),
            right: literal(12.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_equality_across_types() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        // Values of different types are never equal, booleans included.
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::Bool(true))),
            operator: token(Type::EqualEqual, "=="),
            right: literal(1.0),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));

        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::EqualEqual, "=="),
            right: Box::new(Expr::Literal(Literal::Nil)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_conditional_uses_truthiness() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        // Any truthy condition picks the then branch, not just `true`.
        let expr = Expr::Conditional(ConditionalData {
            condition: literal(0.0),
            then_branch: Box::new(Expr::Literal(Literal::from("then"))),
            else_branch: Box::new(Expr::Literal(Literal::from("else"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("then"));

        let expr = Expr::Conditional(ConditionalData {
            condition: Box::new(Expr::Literal(Literal::Nil)),
            then_branch: Box::new(Expr::Literal(Literal::from("then"))),
            else_branch: Box::new(Expr::Literal(Literal::from("else"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("else"));
    }

    #[test]
    fn evaluate_logical_yields_operand() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::Or, "or"),
            right: Box::new(Expr::Literal(Literal::from("fallback"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("fallback"));

        let expr = Expr::Logical(LogicalData {
            left: literal(1.0),
            operator: token(Type::Or, "or"),
            right: Box::new(Expr::Literal(Literal::from("unused"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(1.0));
    }
}
