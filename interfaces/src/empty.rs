use crate::defs::JobRecord;
use crate::defs::ReportBodies;
use crate::defs::ReportRenderer;

/// Renders nothing. Handy when only delivery is under test.
pub struct EmptyReportRenderer;

impl ReportRenderer for EmptyReportRenderer {
    fn render(_all_jobs: &[JobRecord], _top_jobs: &[JobRecord]) -> ReportBodies {
        ReportBodies {
            html: "".to_owned(),
            text: "".to_owned(),
        }
    }
}
