mod collection;
mod report;

pub use collection::ReportCollection;
pub use report::{ReportKind, UrlReport};
