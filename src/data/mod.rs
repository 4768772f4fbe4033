//! Labeled data structures produced by the generators.

mod count_matrix;
mod metadata;
mod table;

pub use count_matrix::CountMatrix;
pub use metadata::{Metadata, Variable, VariableType};
pub use table::{labels, LabeledTable};
