use crate::computer::Computer;
use crate::curve::{Coefficients, Curve, CurveType, Payload};
use crate::error::{CurveError, Result};
use crate::utils::parse_numbers;
use std::str::FromStr;

// 输入文件格式:
// 第1行  曲线类型 p / n / s
// 第2行  素数域的模数，或者二进制域约化多项式的指数
// 第3行  曲线系数
// 之后每行一条指令，空行忽略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub curve_type: CurveType,
    pub payload: Payload,
    pub coefficients: Coefficients,
    pub instructions: Vec<String>,
}

impl Input {
    pub fn curve(&self) -> Result<Curve> {
        Curve::new(
            self.curve_type,
            self.payload.clone(),
            self.coefficients.clone(),
        )
    }
}

impl FromStr for Input {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().map(str::trim).collect();
        if lines.len() < 3 {
            return Err(CurveError::Input(format!(
                "至少需要3行，实际只有{}行",
                lines.len()
            )));
        }

        let curve_type: CurveType = lines[0].parse()?;
        let payload = Payload::from_numbers(curve_type, &parse_numbers(lines[1])?)?;
        let coefficients = Coefficients::from_slice(&parse_numbers(lines[2])?)?;
        let instructions = lines[3..]
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();

        Ok(Input {
            curve_type,
            payload,
            coefficients,
            instructions,
        })
    }
}

// 每条缓存一行 "<指令> = <结果>"，用 \r\n 分隔，末尾不换行
pub fn format_output(computer: &Computer) -> String {
    computer
        .cache()
        .map(|(raw, point)| format!("{} = {}", raw, point))
        .collect::<Vec<_>>()
        .join("\r\n")
}
