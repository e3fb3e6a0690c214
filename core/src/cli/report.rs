use crate::composite::CompositeReport;
use crate::export::ExportReport;
use std::fmt;

/// Text report for an export run
pub struct ExportTextReport<'a> {
    report: &'a ExportReport,
}

impl<'a> ExportTextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ExportReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for ExportTextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exported Views")?;
        writeln!(f, "==============")?;
        writeln!(f)?;

        for exported in &self.report.views {
            writeln!(f, "{}: {}", exported.view, exported.png.display())?;
            writeln!(f, "  Source: {}", exported.source.display())?;
        }
        writeln!(f)?;
        writeln!(f, "Exam list: {}", self.report.manifest_path.display())?;

        Ok(())
    }
}

/// Text report for a composite run
pub struct CompositeTextReport<'a> {
    report: &'a CompositeReport,
}

impl<'a> CompositeTextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a CompositeReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for CompositeTextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heatmap Overlays")?;
        writeln!(f, "================")?;
        writeln!(f)?;

        for output in &self.report.outputs {
            writeln!(
                f,
                "Exam {} {} [{}]: {}",
                output.exam_index,
                output.view,
                output.file_id,
                output.output.display()
            )?;
            writeln!(f, "  Source: {}", output.source.display())?;
        }
        writeln!(f)?;
        writeln!(f, "Written: {}", self.report.outputs.len())?;

        Ok(())
    }
}
