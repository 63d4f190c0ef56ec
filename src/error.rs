use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("无效的数字: `{0}`")]
    Parse(String),
    #[error("无效的指令: `{0}`")]
    MalformedInstruction(String),
    #[error("运算错误: {0}")]
    Arithmetic(String),
    #[error("类型不匹配: {0}")]
    TypeMismatch(String),
    #[error("输入数据不正确: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, CurveError>;
