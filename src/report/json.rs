//! JSON report: the analysis result with a summary and timestamp

use crate::model::AnalysisResult;
use crate::report::Summary;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: Summary,
    result: &'a AnalysisResult,
}

pub fn write<W: Write>(writer: &mut W, result: &AnalysisResult) -> io::Result<()> {
    let report = JsonReport {
        generated: chrono::Local::now().to_rfc3339(),
        summary: Summary::from_result(result),
        result,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
