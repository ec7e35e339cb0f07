pub mod logistic;

pub use logistic::{LogisticParams, LogisticRegression, ModelError};
