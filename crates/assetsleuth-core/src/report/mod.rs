/// Build-report extraction from the editor log.
pub mod parser;
pub mod source;

pub use parser::BuildReportParser;
pub use source::read_editor_log;
