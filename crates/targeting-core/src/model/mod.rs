//! Filter data model
//!
//! - [`FieldType`]: record attributes a condition may test
//! - [`Operator`] / [`LogicalOperator`]: comparison and join vocabularies
//! - [`Condition`], [`Group`], [`Filter`]: the targeting expression itself

pub mod field;
pub mod filter;
pub mod operator;

pub use field::FieldType;
pub use filter::{Condition, Filter, Group};
pub use operator::{LogicalOperator, Operator};
