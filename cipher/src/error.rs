use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// 解码的base64字符串不合法
    InvalidBase64(String),

    /// 密钥字节序列被截断
    TokenTruncated { need: usize, have: usize },

    /// 密钥字节序列解码后有剩余字节
    TokenTrailingBytes(usize),

    /// 解密结果不是合法的UTF-8
    NotUtf8(String),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::InvalidBase64(e) => {
                f.write_fmt(format_args!("Invalid base64 in the key token, {e}"))
            }
            CipherError::TokenTruncated { need, have } => f.write_fmt(format_args!(
                "Truncated key token, need `{need}` bytes but only `{have}` left"
            )),
            CipherError::TokenTrailingBytes(n) => f.write_fmt(format_args!(
                "Malformed key token, `{n}` trailing bytes after the modulus"
            )),
            CipherError::NotUtf8(e) => {
                f.write_fmt(format_args!("Decrypted bytes are not valid UTF-8, {e}"))
            }
        }
    }
}

impl Error for CipherError {}
