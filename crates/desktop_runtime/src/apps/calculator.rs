//! Four-function calculator engine backing the calculator pseudo-app.

use serde::{Deserialize, Serialize};

pub const DIVIDE_BY_ZERO_DISPLAY: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }
}

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorKey {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    Backspace,
}

impl CalculatorKey {
    /// Maps a keypad label (`"7"`, `"."`, `"+"`, `"="`, `"clear"`, `"backspace"`).
    pub fn parse(label: &str) -> Option<Self> {
        let key = match label {
            "." => Self::Decimal,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Subtract),
            "*" => Self::Operator(Operator::Multiply),
            "/" => Self::Operator(Operator::Divide),
            "%" => Self::Operator(Operator::Remainder),
            "=" => Self::Equals,
            "clear" => Self::Clear,
            "backspace" => Self::Backspace,
            digit => {
                let mut chars = digit.chars();
                let value = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Digit(value as u8)
            }
        };
        Some(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub display: String,
    pub previous: Option<String>,
    pub pending: Option<Operator>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            pending: None,
        }
    }
}

impl CalculatorState {
    pub fn press(&mut self, key: CalculatorKey) {
        match key {
            CalculatorKey::Clear => *self = Self::default(),
            CalculatorKey::Backspace => {
                if self.display.chars().count() > 1 {
                    self.display.pop();
                } else {
                    self.display = "0".to_string();
                }
            }
            CalculatorKey::Operator(op) => {
                if let Some(previous) = self.previous.take() {
                    self.display = evaluate(&previous, &self.display, self.pending);
                }
                self.previous = Some(std::mem::replace(&mut self.display, "0".to_string()));
                self.pending = Some(op);
            }
            CalculatorKey::Equals => {
                if let (Some(previous), Some(op)) = (self.previous.as_deref(), self.pending) {
                    self.display = evaluate(previous, &self.display, Some(op));
                    self.previous = None;
                    self.pending = None;
                }
            }
            CalculatorKey::Decimal => {
                if !self.display.contains('.') {
                    self.display.push('.');
                }
            }
            CalculatorKey::Digit(digit) => {
                let digit = char::from(b'0' + digit.min(9));
                if self.display == "0" {
                    self.display = digit.to_string();
                } else {
                    self.display.push(digit);
                }
            }
        }
    }
}

/// Applies `op` to two display strings. Unparseable operands evaluate as NaN.
pub fn evaluate(lhs: &str, rhs: &str, op: Option<Operator>) -> String {
    let a = lhs.parse::<f64>().unwrap_or(f64::NAN);
    let b = rhs.parse::<f64>().unwrap_or(f64::NAN);
    let result = match op {
        Some(Operator::Add) => a + b,
        Some(Operator::Subtract) => a - b,
        Some(Operator::Multiply) => a * b,
        Some(Operator::Divide) if b == 0.0 => return DIVIDE_BY_ZERO_DISPLAY.to_string(),
        Some(Operator::Divide) => a / b,
        Some(Operator::Remainder) => a % b,
        None => return rhs.to_string(),
    };
    format_number(result)
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    value.to_string()
}
