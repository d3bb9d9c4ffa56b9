#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{field} must be a finite, non-negative number")]
    InvalidAmount { field: &'static str },

    #[error("starting_amount must be non-negative")]
    NegativeStartingAmount,

    #[error("invalid index: {0}")]
    IndexOutOfRange(usize),
}
