pub(crate) mod interpreter;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod predicate_evaluator;
