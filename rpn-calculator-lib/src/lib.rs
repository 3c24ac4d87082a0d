//! Conversion between infix and postfix (Reverse-Polish) arithmetic expressions,
//! evaluation of postfix expressions and regeneration of infix text from them.

pub mod interpreter;
