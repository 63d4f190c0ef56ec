use crate::error::{CurveError, Result};
use num::{
    bigint::BigInt,
    traits::{One, Signed, Zero},
};
use std::cmp::Ordering;
use std::fmt;
use std::mem;

// 特征为2的有限域 GF(2^m)
// 元素是 GF(2) 上的多项式，用整数的二进制位表示：第 i 位为1表示含有 x^i 项
// 加法就是异或，乘法是无进位乘法再对约化多项式取模
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BinaryField {
    polynomial: BigInt, // 约化多项式
}

impl BinaryField {
    pub fn new(polynomial: BigInt) -> Result<Self> {
        if !polynomial.is_positive() {
            return Err(CurveError::Arithmetic(format!(
                "约化多项式 {} 必须是正数",
                polynomial
            )));
        }

        Ok(BinaryField { polynomial })
    }

    // [4, 1, 0] => x^4 + x + 1 => 0b10011
    // 重复的指数会互相抵消
    pub fn from_exponents(exponents: &[u32]) -> Result<Self> {
        let polynomial = exponents
            .iter()
            .fold(BigInt::zero(), |acc, &e| acc ^ (BigInt::one() << e as usize));

        BinaryField::new(polynomial)
    }

    pub fn polynomial(&self) -> &BigInt {
        &self.polynomial
    }

    // 域的扩张次数 m，也是元素二进制表示的位数
    pub fn degree(&self) -> u64 {
        self.polynomial.bits() - 1
    }

    pub fn check(&self, n: &BigInt) -> Result<()> {
        if n.is_negative() {
            return Err(CurveError::Arithmetic(format!(
                "{} 不是二进制多项式",
                n
            )));
        }
        Ok(())
    }

    pub fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a ^ b
    }

    // 多项式长除法，只保留余数
    pub fn modulus(&self, n: &BigInt) -> BigInt {
        let width = self.polynomial.bits();
        let mut n = n.clone();

        while n.bits() >= width {
            let shift = (n.bits() - width) as usize;
            n ^= &self.polynomial << shift;
        }

        n
    }

    // 无进位乘法：从次高位开始，每一位左移一次，该位为1时异或上 u
    pub fn multiply(&self, u: &BigInt, v: &BigInt) -> BigInt {
        if u.is_zero() || v.is_zero() {
            return BigInt::zero();
        }

        let mut result = u.clone();
        for i in (0..v.bits() - 1).rev() {
            result <<= 1usize;
            if v.bit(i) {
                result ^= u;
            }
        }

        self.modulus(&result)
    }

    // 二进制多项式上的扩展欧几里得算法
    // 始终保持 value = coef * n (mod f)，余数为1时 coef 即为逆元
    pub fn inverse(&self, n: &BigInt) -> Result<BigInt> {
        let not_invertible = || {
            CurveError::Arithmetic(format!(
                "{:b} 模 {:b} 没有逆元",
                n, self.polynomial
            ))
        };

        let n = self.modulus(n);
        if n.is_zero() {
            return Err(not_invertible());
        }

        let (mut prev, mut last) = (n, self.polynomial.clone());
        let (mut prev_coef, mut last_coef) = (BigInt::one(), BigInt::zero());

        // 每一步都保持 gcd(prev, last) 不变
        while !last.is_one() {
            if prev.is_one() {
                return Ok(self.modulus(&prev_coef));
            }
            // gcd 不是1，n 和 f 有公因式
            if last.is_zero() {
                return Err(not_invertible());
            }

            let (last_len, prev_len) = (last.bits(), prev.bits());
            match last_len.cmp(&prev_len) {
                Ordering::Equal => {
                    let next = &last ^ &prev;
                    let next_coef = &last_coef ^ &prev_coef;
                    prev = mem::replace(&mut last, next);
                    prev_coef = mem::replace(&mut last_coef, next_coef);
                }
                Ordering::Less => {
                    let shift = (prev_len - last_len) as usize;
                    let next = (&last << shift) ^ &prev;
                    let next_coef = (&last_coef << shift) ^ &prev_coef;
                    prev = mem::replace(&mut last, next);
                    prev_coef = mem::replace(&mut last_coef, next_coef);
                }
                // 用 prev 消去 last 的最高位，prev 保留
                Ordering::Greater => {
                    let shift = (last_len - prev_len) as usize;
                    last ^= &prev << shift;
                    last_coef ^= &prev_coef << shift;
                }
            }
        }

        Ok(self.modulus(&last_coef))
    }

    // a / b = a * b^-1
    pub fn div(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        Ok(self.multiply(a, &self.inverse(b)?))
    }

    // 补零到 m 位的二进制串
    pub fn render(&self, n: &BigInt) -> String {
        format!("{:0width$b}", n, width = self.degree() as usize)
    }
}

impl fmt::Display for BinaryField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GF(2^{})/{:b}", self.degree(), self.polynomial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_bigint;
    use num::bigint::Sign;
    use rand::Rng;

    // x^4 + x + 1
    fn gf16() -> BinaryField {
        BinaryField::from_exponents(&[4, 1, 0]).unwrap()
    }

    #[test]
    fn create_binary_field() {
        let f = gf16();
        assert_eq!(f.polynomial(), &new_bigint(0b10011));
        assert_eq!(f.degree(), 4);
        assert_eq!(f.to_string(), "GF(2^4)/10011");

        assert_eq!(
            BinaryField::from_exponents(&[4, 1, 1, 0]).unwrap().polynomial(),
            &new_bigint(0b10001)
        );
        assert!(BinaryField::from_exponents(&[]).is_err());
        assert!(BinaryField::new(new_bigint(0)).is_err());
        assert!(BinaryField::new(new_bigint(-19)).is_err());

        let f = BinaryField::from_exponents(&[163, 7, 6, 3, 0]).unwrap();
        assert_eq!(f.degree(), 163);
    }

    #[test]
    fn modulus_binary_polynomial() {
        let f = gf16();
        // x^4 = x + 1
        assert_eq!(f.modulus(&new_bigint(0b10000)), new_bigint(0b0011));
        // x^8 + x^6 = x^3 + 1
        assert_eq!(f.modulus(&new_bigint(0b101000000)), new_bigint(0b1001));
        assert_eq!(f.modulus(&new_bigint(0b10011)), new_bigint(0));
        assert_eq!(f.modulus(&new_bigint(0b0110)), new_bigint(0b0110));
        assert_eq!(f.modulus(&new_bigint(0)), new_bigint(0));
    }

    #[test]
    fn multiply_binary_polynomial() {
        let f = gf16();
        assert_eq!(f.multiply(&new_bigint(0b0010), &new_bigint(0b1000)), new_bigint(0b0011));
        assert_eq!(f.multiply(&new_bigint(0b1000), &new_bigint(0b0010)), new_bigint(0b0011));
        // (x + 1)^2 = x^2 + 1
        assert_eq!(f.multiply(&new_bigint(0b0011), &new_bigint(0b0011)), new_bigint(0b0101));
        assert_eq!(f.multiply(&new_bigint(0b0111), &new_bigint(1)), new_bigint(0b0111));
        assert_eq!(f.multiply(&new_bigint(0), &new_bigint(0b0111)), new_bigint(0));
        assert_eq!(f.multiply(&new_bigint(0b0111), &new_bigint(0)), new_bigint(0));
    }

    #[test]
    fn inverse_binary_polynomial() {
        let f = gf16();
        // x * (x^3 + 1) = x^4 + x = 1
        assert_eq!(f.inverse(&new_bigint(0b0010)).unwrap(), new_bigint(0b1001));
        assert_eq!(f.inverse(&new_bigint(1)).unwrap(), new_bigint(1));

        for n in 1..16 {
            let n = new_bigint(n);
            let inv = f.inverse(&n).unwrap();
            assert!(inv.bits() <= 4);
            assert_eq!(f.multiply(&n, &inv), new_bigint(1));
        }
    }

    #[test]
    fn inverse_of_zero() {
        let f = gf16();
        assert!(matches!(
            f.inverse(&new_bigint(0)),
            Err(CurveError::Arithmetic(_))
        ));
        assert!(f.inverse(&new_bigint(0b10011)).is_err());

        // x^4 + 1 = (x + 1)^4 可约，x + 1 没有逆元
        let g = BinaryField::from_exponents(&[4, 0]).unwrap();
        assert!(g.inverse(&new_bigint(0b0011)).is_err());
        assert_eq!(g.inverse(&new_bigint(0b0010)).unwrap(), new_bigint(0b1000));

        // x^4 可约，但奇数元素与它互素
        let h = BinaryField::from_exponents(&[4]).unwrap();
        assert_eq!(h.inverse(&new_bigint(1)).unwrap(), new_bigint(1));
        assert!(h.inverse(&new_bigint(0b0010)).is_err());
    }

    #[test]
    fn inverse_in_gf256() {
        // x^8 + x^4 + x^3 + x + 1
        let f = BinaryField::from_exponents(&[8, 4, 3, 1, 0]).unwrap();
        for n in 1..256 {
            let n = new_bigint(n);
            let inv = f.inverse(&n).unwrap();
            assert!(inv.bits() <= 8);
            assert_eq!(f.multiply(&n, &inv), new_bigint(1), "{}", n);
        }
    }

    #[test]
    fn inverse_in_gf2_163() {
        let f = BinaryField::from_exponents(&[163, 7, 6, 3, 0]).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let bytes: [u8; 21] = rng.gen();
            let n = f.modulus(&BigInt::from_bytes_be(Sign::Plus, &bytes));
            if n.is_zero() {
                continue;
            }
            let inv = f.inverse(&n).unwrap();
            assert_eq!(f.multiply(&n, &inv), BigInt::one());
        }
    }

    #[test]
    fn div_binary_polynomial() {
        let f = gf16();
        let a = new_bigint(0b1101);
        let b = new_bigint(0b0110);
        let q = f.div(&a, &b).unwrap();
        assert_eq!(f.multiply(&q, &b), a);
        assert!(f.div(&a, &new_bigint(0)).is_err());
    }

    #[test]
    fn render_padded() {
        let f = gf16();
        assert_eq!(f.render(&new_bigint(0b0011)), "0011");
        assert_eq!(f.render(&new_bigint(0)), "0000");
        assert_eq!(f.render(&new_bigint(0b1010)), "1010");
        assert_eq!(f.add(&new_bigint(0b1010), &new_bigint(0b0110)), new_bigint(0b1100));
        assert!(f.check(&new_bigint(-1)).is_err());
        assert!(f.check(&new_bigint(5)).is_ok());
    }
}
