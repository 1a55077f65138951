//! Progress reporting for the upload pass

use super::types::ImageMigrationResult;

/// Receives lifecycle events while a batch of documents is uploaded
pub trait ProgressReporter {
    /// Called once with the number of documents about to be processed
    fn report_started(&self, total: usize);

    fn report_document_started(&self, name: &str);

    fn report_document_finished(&self, name: &str, result: &ImageMigrationResult);

    fn report_completed(&self);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _total: usize) {}

    #[inline(always)]
    fn report_document_started(&self, _name: &str) {}

    #[inline(always)]
    fn report_document_finished(&self, _name: &str, _result: &ImageMigrationResult) {}

    #[inline(always)]
    fn report_completed(&self) {}
}
