mod report_vm;
mod session_vm;
mod time_fmt;

pub use report_vm::{ReportVm, ReviewVm, map_report};
pub use session_vm::{SessionIntent, SessionVm, start_test};
