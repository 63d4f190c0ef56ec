use crate::error::{CurveError, Result};
use num::{
    bigint::BigInt,
    traits::{Euclid, One, Zero},
};
use std::fmt;
use std::mem;

// 素数域 Z_p，元素不预先约减，每次运算后约减到 [0, p)
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PrimeField {
    prime: BigInt, // 有限域的阶
}

impl PrimeField {
    pub fn new(prime: BigInt) -> Result<Self> {
        if prime < BigInt::from(2) {
            return Err(CurveError::Arithmetic(format!(
                "模数 {} 不能小于2",
                prime
            )));
        }

        Ok(PrimeField { prime })
    }

    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    // 数学意义上的取模，负数也落在 [0, p)
    pub fn reduce(&self, n: &BigInt) -> BigInt {
        n.rem_euclid(&self.prime)
    }

    pub fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a + b))
    }

    pub fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a - b))
    }

    pub fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a * b))
    }

    pub fn neg(&self, n: &BigInt) -> BigInt {
        self.reduce(&(&self.prime - n))
    }

    // 扩展欧几里得算法: 求 n mod p 的乘法逆元
    // 维护 prev_res = prev_num * n (mod p), cur_res = cur_num * n (mod p)
    pub fn inverse(&self, n: &BigInt) -> Result<BigInt> {
        let mut prev_res = self.prime.clone();
        let mut cur_res = self.reduce(n);
        let mut prev_num = BigInt::zero();
        let mut cur_num = BigInt::one();

        while !cur_res.is_one() {
            if cur_res.is_zero() {
                return Err(CurveError::Arithmetic(format!(
                    "{} 模 {} 没有逆元",
                    n, self.prime
                )));
            }

            let factor = &prev_res / &cur_res;
            let next_res = &prev_res % &cur_res;
            prev_res = mem::replace(&mut cur_res, next_res);

            let next_num = &prev_num - &factor * &cur_num;
            prev_num = mem::replace(&mut cur_num, next_num);
        }

        Ok(self.reduce(&cur_num))
    }

    // a / b = a * b^-1
    pub fn div(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        Ok(self.mul(a, &self.inverse(b)?))
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Z_{}", self.prime)
    }
}
