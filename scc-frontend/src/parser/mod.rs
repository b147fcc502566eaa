//! SubC Recursive Descent Parser
//!
//! Parses SubC tokens into an Abstract Syntax Tree. One `parse_*`
//! method per grammar production:
//!
//! ```text
//! Prog   => Fun+
//! Fun    => "int" Nam "(" Pars ")" Body
//! Body   => "{" Var* Stm* "}"
//! Stm    => Asg | If | While | Ret
//! Asg    => Nam "=" (Exp | Call) ";"
//! Exp    => NamNum | NamNum Bop NamNum
//! Call   => Nam "(" Args ")"
//! ```

use crate::ast::*;
use crate::lexer::{Token, TokenKind};
use scc_common::{CompilerError, SourceLocation};
use std::collections::VecDeque;

/// SubC Parser
pub struct Parser {
    tokens: VecDeque<Token>,
}

impl Parser {
    /// Create a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Peek at current token without consuming
    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Peek ahead n tokens
    fn peek_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(offset)
    }

    /// Get current token and advance
    fn advance(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Check if current token matches expected kind
    fn check(&self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(token) => {
                std::mem::discriminant(&token.kind) == std::mem::discriminant(kind)
            }
            None => matches!(kind, TokenKind::EndOfFile),
        }
    }

    /// Consume token if it matches expected kind
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token kind
    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, CompilerError> {
        match self.advance() {
            Some(token)
                if std::mem::discriminant(&token.kind) == std::mem::discriminant(&kind) =>
            {
                Ok(token)
            }
            Some(token) => Err(CompilerError::parse_error(
                format!("expected {} in {}, found {}", kind, context, token.kind),
                token.location,
            )),
            None => Err(CompilerError::parse_error(
                format!("expected {} in {}, found end of file", kind, context),
                SourceLocation::dummy(),
            )),
        }
    }

    /// Expect and consume an identifier, returning its text
    fn expect_identifier(&mut self, context: &str) -> Result<String, CompilerError> {
        match self.advance() {
            Some(token) => match token.kind {
                TokenKind::Identifier(name) => Ok(name),
                other => Err(CompilerError::parse_error(
                    format!("expected identifier in {}, found {}", context, other),
                    token.location,
                )),
            },
            None => Err(CompilerError::parse_error(
                format!("expected identifier in {}, found end of file", context),
                SourceLocation::dummy(),
            )),
        }
    }

    /// Get current location for error reporting
    fn current_location(&self) -> SourceLocation {
        self.peek()
            .map(|t| t.location)
            .unwrap_or_else(SourceLocation::dummy)
    }

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program, CompilerError> {
        let mut functions = Vec::new();

        while !self.check(&TokenKind::EndOfFile) {
            functions.push(self.parse_function()?);
        }

        Ok(Program { functions })
    }

    /// Fun => "int" Nam "(" Pars ")" Body
    fn parse_function(&mut self) -> Result<Function, CompilerError> {
        self.expect(TokenKind::Int, "function definition")?;
        let name = self.expect_identifier("function definition")?;
        self.expect(TokenKind::LeftParen, "parameter list")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                self.expect(TokenKind::Int, "parameter declaration")?;
                params.push(self.expect_identifier("parameter declaration")?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "parameter list")?;

        // Body => "{" Var* Stm* "}"
        self.expect(TokenKind::LeftBrace, "function body")?;

        let mut locals = Vec::new();
        while self.check(&TokenKind::Int) {
            self.advance();
            locals.push(self.expect_identifier("variable declaration")?);
            self.expect(TokenKind::Semicolon, "variable declaration")?;
        }

        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace, "function body")?;

        Ok(Function {
            name,
            params,
            locals,
            body,
        })
    }

    /// Block => "{" Stm* "}"
    fn parse_block(&mut self) -> Result<Block, CompilerError> {
        self.expect(TokenKind::LeftBrace, "block")?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace, "block")?;

        Ok(stmts)
    }

    /// Stm => Asg | If | While | Ret
    fn parse_statement(&mut self) -> Result<Stmt, CompilerError> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::Return) => self.parse_return(),
            Some(TokenKind::Identifier(_)) => self.parse_assign(),
            _ => Err(CompilerError::parse_error(
                format!(
                    "expected statement, found {}",
                    self.peek()
                        .map(|t| t.kind.to_string())
                        .unwrap_or_else(|| "end of file".to_string())
                ),
                self.current_location(),
            )),
        }
    }

    /// Asg => Nam "=" (Exp | Call) ";"
    fn parse_assign(&mut self) -> Result<Stmt, CompilerError> {
        let target = self.expect_identifier("assignment")?;
        self.expect(TokenKind::Equal, "assignment")?;

        // A name followed by '(' starts a call; anything else is an
        // expression.
        let rhs = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Identifier(_)))
            && matches!(
                self.peek_ahead(1).map(|t| &t.kind),
                Some(TokenKind::LeftParen)
            ) {
            AssignRhs::Call(self.parse_call()?)
        } else {
            AssignRhs::Expr(self.parse_expr()?)
        };

        self.expect(TokenKind::Semicolon, "assignment")?;
        Ok(Stmt::Assign { target, rhs })
    }

    /// Ret => "return" Exp? ";"
    fn parse_return(&mut self) -> Result<Stmt, CompilerError> {
        self.advance(); // "return"
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "return statement")?;
        Ok(Stmt::Return(expr))
    }

    /// If => "if" "(" Exp ")" Block
    fn parse_if(&mut self) -> Result<Stmt, CompilerError> {
        self.advance(); // "if"
        self.expect(TokenKind::LeftParen, "if condition")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "if condition")?;
        let body = self.parse_block()?;
        Ok(Stmt::If { cond, body })
    }

    /// While => "while" "(" Exp ")" Block
    fn parse_while(&mut self) -> Result<Stmt, CompilerError> {
        self.advance(); // "while"
        self.expect(TokenKind::LeftParen, "while condition")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "while condition")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    /// Exp => ε | NamNum | NamNum Bop NamNum
    fn parse_expr(&mut self) -> Result<Expr, CompilerError> {
        let lhs = match self.try_parse_operand() {
            Some(operand) => operand,
            None => return Ok(Expr::empty()),
        };

        let op = match self.peek_operator() {
            Some(op) => {
                self.advance();
                op
            }
            None => return Ok(Expr::value(lhs)),
        };

        let location = self.current_location();
        let rhs = self.try_parse_operand().ok_or_else(|| {
            CompilerError::parse_error(
                format!("expected operand after '{}'", op),
                location,
            )
        })?;

        Ok(Expr::binary(lhs, op, rhs))
    }

    /// Consume a Nam or Num operand if one is next
    fn try_parse_operand(&mut self) -> Option<Operand> {
        let operand = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Identifier(name)) => Operand::Name(name.clone()),
            Some(TokenKind::IntLiteral(value)) => Operand::Number(*value),
            _ => return None,
        };
        self.advance();
        Some(operand)
    }

    /// Map the current token to a binary operator without consuming it
    fn peek_operator(&self) -> Option<Bop> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Plus) => Some(Bop::Add),
            Some(TokenKind::Minus) => Some(Bop::Sub),
            Some(TokenKind::Star) => Some(Bop::Mul),
            Some(TokenKind::Less) => Some(Bop::Lt),
            Some(TokenKind::LessEqual) => Some(Bop::Le),
            Some(TokenKind::EqualEqual) => Some(Bop::Eq),
            Some(TokenKind::BangEqual) => Some(Bop::Ne),
            Some(TokenKind::GreaterEqual) => Some(Bop::Ge),
            Some(TokenKind::Greater) => Some(Bop::Gt),
            _ => None,
        }
    }

    /// Call => Nam "(" Args ")"
    fn parse_call(&mut self) -> Result<Call, CompilerError> {
        let callee = self.expect_identifier("call")?;
        self.expect(TokenKind::LeftParen, "argument list")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_arg()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "argument list")?;

        Ok(Call { callee, args })
    }

    /// Arg => Nam | Num | Str
    fn parse_arg(&mut self) -> Result<Arg, CompilerError> {
        let location = self.current_location();
        match self.advance().map(|t| t.kind) {
            Some(TokenKind::Identifier(name)) => Ok(Arg::Name(name)),
            Some(TokenKind::IntLiteral(value)) => Ok(Arg::Number(value)),
            Some(TokenKind::StringLiteral(text)) => Ok(Arg::Text(text)),
            Some(other) => Err(CompilerError::parse_error(
                format!("expected argument, found {}", other),
                location,
            )),
            None => Err(CompilerError::parse_error(
                "expected argument, found end of file".to_string(),
                location,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse_program().unwrap()
    }

    #[test]
    fn test_function_with_params_and_locals() {
        let program = parse("int add2(int a, int b) { int s; s = a + b; return s; }");
        assert_eq!(program.functions.len(), 1);

        let fun = &program.functions[0];
        assert_eq!(fun.name, "add2");
        assert_eq!(fun.params, vec!["a", "b"]);
        assert_eq!(fun.locals, vec!["s"]);
        assert_eq!(fun.body.len(), 2);
    }

    #[test]
    fn test_assignment_from_call() {
        let program = parse("int main() { int ms; ms = add2(3, 4); return ms; }");
        let fun = &program.functions[0];

        match &fun.body[0] {
            Stmt::Assign { target, rhs } => {
                assert_eq!(target, "ms");
                match rhs {
                    AssignRhs::Call(call) => {
                        assert_eq!(call.callee, "add2");
                        assert_eq!(call.args, vec![Arg::Number(3), Arg::Number(4)]);
                    }
                    AssignRhs::Expr(_) => panic!("expected call rhs"),
                }
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_string_argument() {
        let program = parse("int main() { int x; x = says(\"hello\"); return x; }");
        let fun = &program.functions[0];

        match &fun.body[0] {
            Stmt::Assign {
                rhs: AssignRhs::Call(call),
                ..
            } => {
                assert_eq!(call.args, vec![Arg::Text("hello".to_string())]);
            }
            other => panic!("expected call assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_while_statement() {
        let program = parse("int main() { int i; while (i < 10) { i = i + 1; } return i; }");
        let fun = &program.functions[0];

        match &fun.body[0] {
            Stmt::While { cond, body } => {
                assert_eq!(
                    *cond,
                    Expr::binary(Operand::Name("i".to_string()), Bop::Lt, Operand::Number(10))
                );
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_if_statement() {
        let program = parse("int main() { int i; if (i == 0) { i = 1; } return i; }");
        let fun = &program.functions[0];
        assert!(matches!(&fun.body[0], Stmt::If { .. }));
    }

    #[test]
    fn test_empty_return() {
        let program = parse("int main() { int i; i = 0; return; }");
        let fun = &program.functions[0];
        assert_eq!(fun.body[1], Stmt::Return(Expr::empty()));
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        let tokens = Lexer::new("int main() { int i; i = 1 return i; }")
            .tokenize()
            .unwrap();
        let result = Parser::new(tokens).parse_program();
        assert!(matches!(result, Err(CompilerError::ParseError { .. })));
    }
}
