use crate::curve::{Coefficients, Curve, CurveType, Payload};
use crate::error::{CurveError, Result};
use crate::instruction::{Instruction, Operand, Operator};
use crate::point::Point;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

// 按指令原文缓存计算结果，同一条指令最多计算一次
// 缓存按插入顺序保存，不会淘汰
#[derive(Debug)]
pub struct Computer {
    curve: Arc<Curve>,
    index: HashMap<String, usize>,
    entries: Vec<(String, Point)>,
    computations: usize,
}

impl Computer {
    pub fn new(curve: Curve) -> Self {
        Computer {
            curve: Arc::new(curve),
            index: HashMap::new(),
            entries: Vec::new(),
            computations: 0,
        }
    }

    pub fn from_parts(
        curve_type: CurveType,
        payload: Payload,
        coefficients: Coefficients,
    ) -> Result<Self> {
        Ok(Computer::new(Curve::new(curve_type, payload, coefficients)?))
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn calc(&mut self, raw_instruction: &str) -> Result<Point> {
        if let Some(&i) = self.index.get(raw_instruction) {
            debug!("cache hit: {}", raw_instruction);
            return Ok(self.entries[i].1.clone());
        }

        let instruction = Instruction::parse(raw_instruction, &self.curve)?;
        self.computations += 1;
        let result = evaluate(raw_instruction, &instruction)?;
        debug!("{} = {}", raw_instruction, result);

        self.index
            .insert(raw_instruction.to_owned(), self.entries.len());
        self.entries
            .push((raw_instruction.to_owned(), result.clone()));

        Ok(result)
    }

    // 按插入顺序遍历缓存
    pub fn cache(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.entries.iter().map(|(raw, point)| (raw.as_str(), point))
    }

    pub fn get(&self, raw_instruction: &str) -> Option<&Point> {
        self.index
            .get(raw_instruction)
            .map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // 实际计算过的指令数，命中缓存的不计
    pub fn computations(&self) -> usize {
        self.computations
    }
}

// + 只能加点，* 只能乘整数
fn evaluate(raw_instruction: &str, instruction: &Instruction) -> Result<Point> {
    match (instruction.operator, &instruction.right) {
        (Operator::Add, Operand::Point(right)) => instruction.left.add(right),
        (Operator::Multiply, Operand::Scalar(factor)) => instruction.left.multiply(factor),
        _ => Err(CurveError::MalformedInstruction(raw_instruction.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_bigint;

    fn computer() -> Computer {
        Computer::from_parts(
            CurveType::Prime,
            Payload::Modulus(new_bigint(13)),
            Coefficients::new(Some(new_bigint(1)), Some(new_bigint(1)), None),
        )
        .unwrap()
    }

    #[test]
    fn calc_instruction() {
        let mut computer = computer();
        assert_eq!(computer.calc("(4, 2) + (10, 6)").unwrap().to_string(), "(11, 2)");
        assert_eq!(computer.calc("(7, 0) + (7, 0)").unwrap().to_string(), "e");
        assert_eq!(computer.calc("(4, 2) * 1").unwrap().to_string(), "(4, 2)");
        assert_eq!(computer.len(), 3);
        assert_eq!(computer.curve().curve_type(), CurveType::Prime);
    }

    #[test]
    fn calc_is_memoized() {
        let mut computer = computer();
        let first = computer.calc("(4, 2) + (10, 6)").unwrap();
        assert_eq!(computer.computations(), 1);

        let second = computer.calc("(4, 2) + (10, 6)").unwrap();
        assert_eq!(computer.computations(), 1);
        assert_eq!(first, second);
        assert_eq!(computer.len(), 1);
    }

    #[test]
    fn cache_keys_are_raw_text() {
        let mut computer = computer();
        let a = computer.calc("(4, 2) + (10, 6)").unwrap();
        let b = computer.calc("(10, 6) + (4, 2)").unwrap();
        let c = computer.calc("(4,2) + (10,6)").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(computer.computations(), 3);
        assert_eq!(computer.len(), 3);
    }

    #[test]
    fn cache_keeps_insertion_order() {
        let mut computer = computer();
        let instructions = vec!["(8, 1) + (8, 1)", "(0, 1) + (0, 1)", "(1, 4) + (1, 4)"];
        for instruction in &instructions {
            computer.calc(instruction).unwrap();
        }
        computer.calc("(0, 1) + (0, 1)").unwrap();

        let keys: Vec<&str> = computer.cache().map(|(raw, _)| raw).collect();
        assert_eq!(keys, instructions);
        assert_eq!(computer.get("(0, 1) + (0, 1)").unwrap().to_string(), "(10, 7)");
        assert!(computer.get("(0, 1) + (1, 1)").is_none());
    }

    #[test]
    fn failed_instruction_is_not_cached() {
        let mut computer = computer();
        assert_eq!(
            computer.calc("(4, 2) + "),
            Err(CurveError::MalformedInstruction("(4, 2) + ".to_owned()))
        );
        assert!(matches!(
            computer.calc("(4, 2) + (17, 6)"),
            Err(CurveError::Arithmetic(_))
        ));
        assert!(matches!(
            computer.calc("(4, 2) + 3"),
            Err(CurveError::MalformedInstruction(_))
        ));
        assert!(matches!(
            computer.calc("(4, 2) * (10, 6)"),
            Err(CurveError::MalformedInstruction(_))
        ));
        assert!(computer.is_empty());
        assert_eq!(computer.computations(), 3);
    }
}
