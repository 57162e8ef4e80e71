pub mod report;
mod snippet;
pub mod source;
mod style;
mod util;

pub use report::Report;
pub use source::Source;
