use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrillError {
    #[error("Invalid input. Please enter a valid number.")]
    InvalidInput { input: String },
    #[error("No question is being asked; start a round first")]
    NoActiveQuestion,
}
