//! Input/output processors built on the core translator

pub mod lines;
pub mod markup;
