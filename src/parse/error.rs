use derive_more::{Constructor, Display, From};

#[derive(Debug, thiserror::Error, From)]
pub enum ParseError {
    #[error("Could not read input: {0}")]
    Io(std::io::Error),
    #[error("{0}")]
    MalformedNumber(MalformedNumber),
    #[error("{0}")]
    RaggedRow(RaggedRow),
    #[error("{0}")]
    UnexpectedColumns(UnexpectedColumns),
}

#[derive(From, Display, Debug, Constructor)]
#[display(fmt = "line {line}: could not parse `{token}` as a number")]
pub struct MalformedNumber {
    line: usize,
    token: String,
}

#[derive(From, Display, Debug, Constructor)]
#[display(fmt = "line {line}: expected {expected} columns, found {actual}")]
pub struct RaggedRow {
    line: usize,
    expected: usize,
    actual: usize,
}

#[derive(From, Display, Debug, Constructor)]
#[display(
    fmt = "block files have 10 columns (id, 4 corners, value) or 12 (with the block center), found {actual}"
)]
pub struct UnexpectedColumns {
    actual: usize,
}
