use crate::curve::Curve;
use crate::error::{CurveError, Result};
use crate::point::Point;
use crate::utils::{parse_decimal, parse_number};
use num::bigint::BigInt;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Multiply => write!(f, "*"),
        }
    }
}

// 右操作数: 点或者整数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Point(Point),
    Scalar(BigInt),
}

// 一条指令: (x1, y1) + (x2, y2) 或 (x1, y1) * k
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub left: Point,
    pub operator: Operator,
    pub right: Operand,
}

impl Instruction {
    // 坐标可以带 0b / 0o / 0x 前缀，标量只能是十进制
    pub fn parse(raw: &str, curve: &Arc<Curve>) -> Result<Self> {
        let malformed = || CurveError::MalformedInstruction(raw.to_owned());

        if raw.contains('\n') {
            return Err(malformed());
        }

        // 左操作数到第一个右括号为止
        let close = raw.find(')').ok_or_else(malformed)?;
        let (x1, y1) = split_point(&raw[..=close]).ok_or_else(malformed)?;

        let rest = raw[close + 1..].trim_start();
        let mut chars = rest.chars();
        let operator = match chars.next() {
            Some('+') => Operator::Add,
            Some('*') => Operator::Multiply,
            _ => return Err(malformed()),
        };

        // 运算符两边必须有空白
        let tail = chars.as_str();
        if rest.len() == raw.len() - close - 1 || !tail.starts_with(char::is_whitespace) {
            return Err(malformed());
        }

        let right = tail.trim();
        if right.is_empty() {
            return Err(malformed());
        }

        let right_point = if right.starts_with('(') {
            Some(split_point(right).ok_or_else(malformed)?)
        } else if right.contains(char::is_whitespace) {
            return Err(malformed());
        } else {
            None
        };

        let left = point(x1, y1, curve)?;
        let right = match right_point {
            Some((x2, y2)) => Operand::Point(point(x2, y2, curve)?),
            None => Operand::Scalar(parse_decimal(right)?),
        };

        Ok(Instruction {
            left,
            operator,
            right,
        })
    }
}

fn point(x: &str, y: &str, curve: &Arc<Curve>) -> Result<Point> {
    Point::new(parse_number(x)?, parse_number(y)?, curve.clone())
}

// "(x, y)" => ("x", "y")
fn split_point(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    if inner.contains(['(', ')']) {
        return None;
    }

    let (x, y) = inner.split_once(',')?;
    let (x, y) = (x.trim(), y.trim());
    if x.is_empty() || y.is_empty() || y.contains(',') {
        return None;
    }

    Some((x, y))
}
