use crate::error::{CurveError, Result};
use num::{bigint::BigInt, Num};
use std::str::FromStr;

// 支持的进制前缀
const RADIXES: [(&str, u32); 3] = [("0b", 2), ("0o", 8), ("0x", 16)];

pub fn new_bigint(i: i64) -> BigInt {
    BigInt::from(i)
}

// 按前缀选择进制解析整数，没有前缀时按十进制解析
// 允许一个可选的正负号，例如 -0x1f, +0b101, 42
pub fn parse_number(token: &str) -> Result<BigInt> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let (radix, digits) = RADIXES
        .iter()
        .find_map(|&(prefix, radix)| unsigned.strip_prefix(prefix).map(|rest| (radix, rest)))
        .unwrap_or((10, unsigned));

    // from_str_radix 自己也接受符号，这里只允许一个
    if digits.starts_with(['+', '-']) {
        return Err(CurveError::Parse(token.to_owned()));
    }

    let magnitude = BigInt::from_str_radix(digits, radix)
        .map_err(|_| CurveError::Parse(token.to_owned()))?;

    Ok(if negative { -magnitude } else { magnitude })
}

// 一行中以空白分隔的若干个整数
pub fn parse_numbers(line: &str) -> Result<Vec<BigInt>> {
    line.split_whitespace().map(parse_number).collect()
}

// 标量只接受十进制
pub fn parse_decimal(token: &str) -> Result<BigInt> {
    BigInt::from_str(token).map_err(|_| CurveError::Parse(token.to_owned()))
}
