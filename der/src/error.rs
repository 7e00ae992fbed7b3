use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("constructed values nested deeper than {0}")]
    NestingTooDeep(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
