use crate::binary_field::BinaryField;
use crate::error::{CurveError, Result};
use crate::prime_field::PrimeField;
use num::{bigint::BigInt, ToPrimitive};
use std::fmt;
use std::str::FromStr;

// 曲线类型选择符: p / n / s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveType {
    Prime,
    BinaryNonSupersingular,
    BinarySupersingular,
}

impl CurveType {
    pub fn selector(&self) -> char {
        match self {
            CurveType::Prime => 'p',
            CurveType::BinaryNonSupersingular => 'n',
            CurveType::BinarySupersingular => 's',
        }
    }
}

impl FromStr for CurveType {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "p" => Ok(CurveType::Prime),
            "n" => Ok(CurveType::BinaryNonSupersingular),
            "s" => Ok(CurveType::BinarySupersingular),
            _ => Err(CurveError::Parse(s.to_owned())),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurveType::Prime => write!(f, "素数域"),
            CurveType::BinaryNonSupersingular => write!(f, "二进制域非超奇异"),
            CurveType::BinarySupersingular => write!(f, "二进制域超奇异"),
        }
    }
}

// 定义有限域的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Modulus(BigInt),
    Exponents(Vec<u32>),
    Polynomial(BigInt),
}

impl Payload {
    // 输入文件第二行: 素数域取第一个数作为模数，二进制域的每个数都是约化多项式的指数
    pub fn from_numbers(curve_type: CurveType, numbers: &[BigInt]) -> Result<Self> {
        match curve_type {
            CurveType::Prime => numbers
                .first()
                .cloned()
                .map(Payload::Modulus)
                .ok_or_else(|| CurveError::Input("素数域曲线缺少模数".to_owned())),
            CurveType::BinaryNonSupersingular | CurveType::BinarySupersingular => numbers
                .iter()
                .map(|n| n.to_u32().ok_or_else(|| CurveError::Parse(n.to_string())))
                .collect::<Result<Vec<_>>>()
                .map(Payload::Exponents),
        }
    }
}

// 曲线方程系数 a, b, c，都可能缺省
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coefficients {
    pub a: Option<BigInt>,
    pub b: Option<BigInt>,
    pub c: Option<BigInt>,
}

impl Coefficients {
    pub fn new(a: Option<BigInt>, b: Option<BigInt>, c: Option<BigInt>) -> Self {
        Coefficients { a, b, c }
    }

    pub fn from_slice(values: &[BigInt]) -> Result<Self> {
        if values.len() > 3 {
            return Err(CurveError::Input(format!(
                "系数最多3个，实际有{}个",
                values.len()
            )));
        }

        let mut values = values.iter().cloned();
        Ok(Coefficients {
            a: values.next(),
            b: values.next(),
            c: values.next(),
        })
    }

    pub fn a(&self) -> Result<&BigInt> {
        required(&self.a, "a")
    }

    pub fn b(&self) -> Result<&BigInt> {
        required(&self.b, "b")
    }

    pub fn c(&self) -> Result<&BigInt> {
        required(&self.c, "c")
    }

    fn iter(&self) -> impl Iterator<Item = &BigInt> {
        [&self.a, &self.b, &self.c].into_iter().flatten()
    }
}

fn required<'a>(value: &'a Option<BigInt>, name: &str) -> Result<&'a BigInt> {
    value
        .as_ref()
        .ok_or_else(|| CurveError::Arithmetic(format!("没有设置系数 `{}`", name)))
}

// 三种曲线
// 素数域:            y^2 = x^3 + ax + b (mod p)
// 二进制域非超奇异:  y^2 + xy = x^3 + ax^2 + b
// 二进制域超奇异:    y^2 + ay = x^3 + bx + c
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curve {
    Prime {
        field: PrimeField,
        coefficients: Coefficients,
    },
    BinaryNonSupersingular {
        field: BinaryField,
        coefficients: Coefficients,
    },
    BinarySupersingular {
        field: BinaryField,
        coefficients: Coefficients,
    },
}

impl Curve {
    pub fn new(curve_type: CurveType, payload: Payload, coefficients: Coefficients) -> Result<Self> {
        if curve_type == CurveType::Prime {
            let field = match payload {
                Payload::Modulus(prime) => PrimeField::new(prime)?,
                other => {
                    return Err(CurveError::Input(format!(
                        "{:?} 不能定义素数域",
                        other
                    )))
                }
            };
            return Ok(Curve::Prime {
                field,
                coefficients,
            });
        }

        let field = match payload {
            Payload::Exponents(exponents) => BinaryField::from_exponents(&exponents)?,
            Payload::Polynomial(polynomial) => BinaryField::new(polynomial)?,
            other @ Payload::Modulus(_) => {
                return Err(CurveError::Input(format!(
                    "{:?} 不能定义二进制域",
                    other
                )))
            }
        };
        for value in coefficients.iter() {
            field.check(value)?;
        }

        Ok(match curve_type {
            CurveType::BinaryNonSupersingular => Curve::BinaryNonSupersingular {
                field,
                coefficients,
            },
            _ => Curve::BinarySupersingular {
                field,
                coefficients,
            },
        })
    }

    pub fn curve_type(&self) -> CurveType {
        match self {
            Curve::Prime { .. } => CurveType::Prime,
            Curve::BinaryNonSupersingular { .. } => CurveType::BinaryNonSupersingular,
            Curve::BinarySupersingular { .. } => CurveType::BinarySupersingular,
        }
    }

    pub fn coefficients(&self) -> &Coefficients {
        match self {
            Curve::Prime { coefficients, .. }
            | Curve::BinaryNonSupersingular { coefficients, .. }
            | Curve::BinarySupersingular { coefficients, .. } => coefficients,
        }
    }

    // 二进制域曲线的坐标必须是非负整数
    pub fn check_element(&self, n: &BigInt) -> Result<()> {
        match self {
            Curve::Prime { .. } => Ok(()),
            Curve::BinaryNonSupersingular { field, .. } | Curve::BinarySupersingular { field, .. } => {
                field.check(n)
            }
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let curve_type = self.curve_type();
        write!(f, "{}曲线({}) ", curve_type, curve_type.selector())?;
        match self {
            Curve::Prime { field, .. } => write!(f, "{}", field),
            Curve::BinaryNonSupersingular { field, .. } | Curve::BinarySupersingular { field, .. } => {
                write!(f, "{}", field)
            }
        }
    }
}
