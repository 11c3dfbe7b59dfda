use crate::expr::{Expr, ExprVisitor};
use crate::literal::Literal;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Renders the AST in a fully parenthesized prefix form, mostly useful for
/// debugging the parser.
pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the expression using visitor pattern.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn params(params: &[Token]) -> String {
        let mut string = String::new();
        string += "(";
        for param in params {
            string += &param.lexeme;
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ")";
        string
    }

    fn body(&mut self, body: &[Stmt]) -> String {
        body.iter().map(|stmt| stmt.accept(self)).collect::<Vec<String>>().join(" ")
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> String {
        let Expr::Literal(literal) = expr else { unreachable!() };
        match literal {
            Literal::String(string) => format!("\"{string}\""),
            _ => literal.to_string(), // Uses fmt::Display impl for Literal
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> String {
        let Expr::Logical(logical) = expr else { unreachable!() };
        parenthesize!(self, &logical.operator.lexeme, &logical.left, &logical.right)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Unary(unary) = expr else { unreachable!() };
        parenthesize!(self, &unary.operator.lexeme, &unary.expr)
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Binary(binary) = expr else { unreachable!() };
        parenthesize!(self, &binary.operator.lexeme, &binary.left, &binary.right)
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> String {
        let Expr::Grouping(grouping) = expr else { unreachable!() };
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> String {
        let Expr::Variable(variable) = expr else { unreachable!() };
        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> String {
        let Expr::Assign(assign) = expr else { unreachable!() };
        parenthesize!(self, format!("= {}", &assign.name.lexeme).as_str(), assign.value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> String {
        let Expr::Call(call) = expr else { unreachable!() };

        let mut string = String::new();
        string += &call.callee.accept(self);
        string += "(";
        for arg in &call.arguments {
            string += &arg.accept(self);
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ")";
        string
    }

    fn visit_conditional_expr(&mut self, expr: &Expr) -> String {
        let Expr::Conditional(conditional) = expr else { unreachable!() };
        parenthesize!(
            self,
            "?:",
            conditional.condition,
            conditional.then_branch,
            conditional.else_branch
        )
    }

    fn visit_function_expr(&mut self, expr: &Expr) -> String {
        let Expr::Function(function) = expr else { unreachable!() };

        let mut string = String::new();
        string += "(fun ";
        string += &Self::params(&function.params);
        string += " { ";
        string += &self.body(&function.body);
        string += " })";
        string
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        parenthesize!(self, "expr", data.expr)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(fun ";
        string += &data.name.lexeme;
        string += &Self::params(&data.params);
        string += " { ";
        string += &self.body(&data.body);
        string += " })";
        string
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::If(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(if ";
        string += &data.condition.accept(self);
        string += " ";
        string += &data.then_branch.accept(self);
        if let Some(else_branch) = &data.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";
        string
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Print(data) = stmt else { unreachable!() };
        parenthesize!(self, "print", data.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(var ";
        string += &data.name.lexeme;
        if let Some(initializer) = &data.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";
        string
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::While(data) = stmt else { unreachable!() };
        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "{";
        for stmt in &data.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";
        string
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Return(data) = stmt else { unreachable!() };

        match &data.value {
            Some(value) => parenthesize!(self, "return", value),
            None => String::from("(return)"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{BinaryData, GroupingData, UnaryData};
    use crate::token::{Location, Type};

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(1, 0))
    }

    #[test]
    fn print_nested_expression() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Unary(UnaryData {
                operator: token(Type::Minus, "-"),
                expr: Box::new(Expr::Literal(Literal::Number(123.0))),
            })),
            operator: token(Type::Star, "*"),
            right: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Literal(Literal::Number(45.67))),
            })),
        });

        assert_eq!(ASTPrinter.print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn print_groupings() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Binary(BinaryData {
                    left: Box::new(Expr::Literal(Literal::Number(2.0))),
                    operator: token(Type::Plus, "+"),
                    right: Box::new(Expr::Literal(Literal::Number(1.0))),
                })),
            })),
            operator: token(Type::Star, "*"),
            right: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Binary(BinaryData {
                    left: Box::new(Expr::Literal(Literal::Number(3.0))),
                    operator: token(Type::Minus, "-"),
                    right: Box::new(Expr::Literal(Literal::Number(4.0))),
                })),
            })),
        });

        assert_eq!(ASTPrinter.print(&expr), "(* (group (+ 2 1)) (group (- 3 4)))");
    }
}
