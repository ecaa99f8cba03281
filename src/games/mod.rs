//! Sample games for exercising the search.

pub mod subtraction;
