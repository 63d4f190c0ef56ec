use crate::binary_field::BinaryField;
use crate::curve::{Coefficients, Curve, CurveType, Payload};
use crate::error::{CurveError, Result};
use crate::prime_field::PrimeField;
use num::{
    bigint::BigInt,
    traits::{Signed, Zero},
};
use std::fmt;
use std::ops;
use std::sync::Arc;

// 构造点所需的全部参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointParams {
    pub x: Option<BigInt>,
    pub y: Option<BigInt>,
    pub curve_type: CurveType,
    pub payload: Payload,
    pub coefficients: Coefficients,
}

// 椭圆曲线上的点
// 运算不修改操作数，总是返回新的点，曲线参数原样传递给结果
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Point {
    // x, y 为 None 表示无穷远点
    x: Option<BigInt>,
    y: Option<BigInt>,
    curve: Arc<Curve>,
}

// 一次加法的结果坐标，None 表示无穷远点
type Sum = Option<(BigInt, BigInt)>;

impl Point {
    pub fn from(x: Option<BigInt>, y: Option<BigInt>, curve: Arc<Curve>) -> Result<Self> {
        match (&x, &y) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                curve.check_element(x)?;
                curve.check_element(y)?;
            }
            _ => {
                return Err(CurveError::Input(
                    "点的两个坐标必须同时给出或同时缺省".to_owned(),
                ))
            }
        }

        Ok(Point { x, y, curve })
    }

    pub fn new(x: BigInt, y: BigInt, curve: Arc<Curve>) -> Result<Self> {
        Point::from(Some(x), Some(y), curve)
    }

    pub fn from_params(params: PointParams) -> Result<Self> {
        let curve = Curve::new(params.curve_type, params.payload, params.coefficients)?;
        Point::from(params.x, params.y, Arc::new(curve))
    }

    pub fn infinity(curve: Arc<Curve>) -> Self {
        Point {
            x: None,
            y: None,
            curve,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.x.is_none()
    }

    pub fn x(&self) -> Option<&BigInt> {
        self.x.as_ref()
    }

    pub fn y(&self) -> Option<&BigInt> {
        self.y.as_ref()
    }

    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve.curve_type()
    }

    fn coordinates(&self) -> Option<(&BigInt, &BigInt)> {
        self.x.as_ref().zip(self.y.as_ref())
    }

    fn with_sum(&self, sum: Sum) -> Point {
        let (x, y) = sum.unzip();
        Point {
            x,
            y,
            curve: self.curve.clone(),
        }
    }

    fn same_curve(&self, other: &Point) -> Result<()> {
        if Arc::ptr_eq(&self.curve, &other.curve) || self.curve == other.curve {
            return Ok(());
        }

        if self.curve_type() != other.curve_type() {
            return Err(CurveError::TypeMismatch(format!(
                "{}曲线上的点不能和{}曲线上的点相加",
                other.curve_type(),
                self.curve_type()
            )));
        }
        Err(CurveError::TypeMismatch(format!(
            "两个点不在同一条曲线上: {} 和 {}",
            self.curve, other.curve
        )))
    }

    pub fn add(&self, other: &Point) -> Result<Point> {
        self.same_curve(other)?;

        // case 1: 任何点加上无穷远点都等于自身
        let (p1, p2) = match (self.coordinates(), other.coordinates()) {
            (None, _) => return Ok(other.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(p1), Some(p2)) => (p1, p2),
        };

        let sum = match self.curve.as_ref() {
            Curve::Prime {
                field,
                coefficients,
            } => add_prime(field, coefficients, p1, p2)?,
            Curve::BinaryNonSupersingular {
                field,
                coefficients,
            } => add_non_supersingular(field, coefficients, p1, p2)?,
            Curve::BinarySupersingular {
                field,
                coefficients,
            } => add_supersingular(field, coefficients, p1, p2)?,
        };

        Ok(self.with_sum(sum))
    }

    // 逆元: P + (-P) = 无穷远点
    pub fn negate(&self) -> Result<Point> {
        let (x, y) = match self.coordinates() {
            Some(p) => p,
            None => return Ok(self.clone()),
        };

        let y = match self.curve.as_ref() {
            // y -> p - y
            Curve::Prime { field, .. } => field.neg(y),
            // y -> ax + y
            Curve::BinaryNonSupersingular {
                field,
                coefficients,
            } => field.multiply(x, coefficients.a()?) ^ y,
            // y -> y + a
            Curve::BinarySupersingular { coefficients, .. } => y ^ coefficients.a()?,
        };

        Ok(self.with_sum(Some((x.clone(), y))))
    }

    // 倍加算法: 从次高位开始，每一位先倍点，该位为1时再加上自身
    pub fn multiply(&self, factor: &BigInt) -> Result<Point> {
        if factor.is_negative() {
            return self.negate()?.multiply(&-factor);
        }

        if factor.is_zero() {
            return Ok(Point::infinity(self.curve.clone()));
        }

        let mut result = self.clone();
        for i in (0..factor.bits() - 1).rev() {
            result = result.add(&result)?;
            if factor.bit(i) {
                result = result.add(self)?;
            }
        }

        Ok(result)
    }
}

// y^2 = x^3 + ax + b (mod p)
fn add_prime(
    field: &PrimeField,
    coefficients: &Coefficients,
    (x1, y1): (&BigInt, &BigInt),
    (x2, y2): (&BigInt, &BigInt),
) -> Result<Sum> {
    let slope = if x1 == x2 {
        // case 2: 关于x轴对称的两个点相加，或者切线垂直(y = 0)，都等于无穷远点
        if y1.is_zero() || y1 != y2 {
            return Ok(None);
        }

        // case 3: 同一个点，做切线
        // s = (3x1^2 + a) / 2y1
        let numerator = BigInt::from(3) * x1 * x1 + coefficients.a()?;
        field.div(&numerator, &(BigInt::from(2) * y1))?
    } else {
        // case 4: x坐标不同
        // s = (y2 - y1) / (x2 - x1)
        field.div(&(y2 - y1), &(x2 - x1))?
    };

    // x3 = s^2 - x1 - x2
    // y3 = s(x1 - x3) - y1
    let x3 = field.reduce(&(&slope * &slope - x1 - x2));
    let y3 = field.reduce(&(&slope * (x1 - &x3) - y1));

    Ok(Some((x3, y3)))
}

// y^2 + xy = x^3 + ax^2 + b，加减都是异或
fn add_non_supersingular(
    field: &BinaryField,
    coefficients: &Coefficients,
    (x1, y1): (&BigInt, &BigInt),
    (x2, y2): (&BigInt, &BigInt),
) -> Result<Sum> {
    if x1 == x2 && (x1.is_zero() || y1 != y2) {
        return Ok(None);
    }

    let a = coefficients.a()?;
    let b = coefficients.b()?;
    let (slope, x3) = if x1 == x2 {
        // s = (x1^2 + a*y1) / (a*x1)
        // x3 = s^2 + b + a*s
        let numerator = field.multiply(x1, x1) ^ field.multiply(a, y1);
        let slope = field.div(&numerator, &field.multiply(x1, a))?;
        let x3 = field.multiply(&slope, &slope) ^ b ^ field.multiply(&slope, a);
        (slope, x3)
    } else {
        // s = (y1 + y2) / (x1 + x2)
        // x3 = s^2 + (x1 + x2) + a*s + b
        let x_sum = field.add(x1, x2);
        let slope = field.div(&field.add(y1, y2), &x_sum)?;
        let x3 = field.multiply(&slope, &slope) ^ &x_sum ^ field.multiply(a, &slope) ^ b;
        (slope, x3)
    };

    // y3 = y1 + s(x1 + x3) + a*x3
    let y3 = y1 ^ field.multiply(&slope, &field.add(x1, &x3)) ^ field.multiply(a, &x3);

    Ok(Some((x3, y3)))
}

// y^2 + ay = x^3 + bx + c
fn add_supersingular(
    field: &BinaryField,
    coefficients: &Coefficients,
    (x1, y1): (&BigInt, &BigInt),
    (x2, y2): (&BigInt, &BigInt),
) -> Result<Sum> {
    if x1 == x2 && (x1.is_zero() || y1 != y2) {
        return Ok(None);
    }

    let a = coefficients.a()?;
    let (slope, x3) = if x1 == x2 {
        // s = (x1*x2 + b) / a
        // x3 = s^2
        let numerator = field.multiply(x1, x2) ^ coefficients.b()?;
        let slope = field.div(&numerator, a)?;
        let x3 = field.multiply(&slope, &slope);
        (slope, x3)
    } else {
        // s = (y1 + y2) / (x1 + x2)
        // x3 = s^2 + x1 + x2
        let slope = field.div(&field.add(y1, y2), &field.add(x1, x2))?;
        let x3 = field.multiply(&slope, &slope) ^ x1 ^ x2;
        (slope, x3)
    };

    // y3 = s(x1 + x3) + y1 + a
    let y3 = field.multiply(&field.add(x1, &x3), &slope) ^ y1 ^ a;

    Ok(Some((x3, y3)))
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (x, y) = match self.coordinates() {
            Some(p) => p,
            None => return write!(f, "e"),
        };

        match self.curve.as_ref() {
            Curve::Prime { .. } => write!(f, "({}, {})", x, y),
            Curve::BinaryNonSupersingular { field, .. } | Curve::BinarySupersingular { field, .. } => {
                write!(f, "({}, {})", field.render(x), field.render(y))
            }
        }
    }
}

// 操作符重载：+
impl ops::Add<&Point> for &Point {
    type Output = Result<Point>;

    fn add(self, other: &Point) -> Self::Output {
        Point::add(self, other)
    }
}

// 操作符重载：-
impl ops::Neg for &Point {
    type Output = Result<Point>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// 操作符重载：*
impl ops::Mul<&BigInt> for &Point {
    type Output = Result<Point>;

    fn mul(self, factor: &BigInt) -> Self::Output {
        self.multiply(factor)
    }
}

impl ops::Mul<&Point> for &BigInt {
    type Output = Result<Point>;

    fn mul(self, point: &Point) -> Self::Output {
        point.multiply(self)
    }
}

impl ops::Mul<&Point> for i64 {
    type Output = Result<Point>;

    fn mul(self, point: &Point) -> Self::Output {
        point.multiply(&BigInt::from(self))
    }
}
