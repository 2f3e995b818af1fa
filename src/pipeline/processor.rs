//! Gait study processing orchestrator.
//!
//! Single entry point for one upload: two report documents reduced to
//! patient records, two datasets reduced to the pre/post comparison.
//! Runs synchronously with no state shared between calls.
//!
//! Uses trait-based DI for the PDF engine so the orchestrator stays
//! testable with fake extractors.

use std::sync::Arc;

use serde::Serialize;

use crate::models::{GaitComparison, KinematicRow, PatientRecord, TemporalRow};
use crate::pipeline::extraction::{extract_patient, ExtractionError, PdfExtractor};
use crate::pipeline::metrics::{compare_datasets, MetricsError};
use crate::pipeline::tabular::load_dataset;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failures that abort the whole request.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Report extraction failed ({report}): {source}")]
    Extraction {
        report: &'static str,
        #[source]
        source: ExtractionError,
    },

    #[error("Metrics computation failed: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Processing worker failed: {0}")]
    Worker(String),
}

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// The four uploads of one pre/post comparison.
#[derive(Debug, Clone, Default)]
pub struct StudyUpload {
    pub pre_report: Vec<u8>,
    pub post_report: Vec<u8>,
    pub pre_csv: Vec<u8>,
    pub post_csv: Vec<u8>,
}

/// Combined result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub status: &'static str,
    pub pre_patient: PatientRecord,
    pub post_patient: PatientRecord,
    pub temporal: Vec<TemporalRow>,
    pub kinematic: Vec<KinematicRow>,
}

impl ComparisonReport {
    pub fn success(
        pre_patient: PatientRecord,
        post_patient: PatientRecord,
        comparison: GaitComparison,
    ) -> Self {
        Self {
            status: "success",
            pre_patient,
            post_patient,
            temporal: comparison.temporal,
            kinematic: comparison.kinematic,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Orchestrates one study: extract → extract → load → compare.
#[derive(Clone)]
pub struct StudyProcessor {
    extractor: Arc<dyn PdfExtractor>,
}

impl StudyProcessor {
    pub fn new(extractor: Arc<dyn PdfExtractor>) -> Self {
        Self { extractor }
    }

    pub fn process(&self, upload: &StudyUpload) -> Result<ComparisonReport, ProcessingError> {
        let pre_patient = self.patient_from_report("pre_report", &upload.pre_report)?;
        let post_patient = self.patient_from_report("post_report", &upload.post_report)?;

        let pre = load_dataset(&upload.pre_csv);
        let post = load_dataset(&upload.post_csv);
        let comparison = compare_datasets(&pre, &post)?;

        Ok(ComparisonReport::success(pre_patient, post_patient, comparison))
    }

    fn patient_from_report(
        &self,
        report: &'static str,
        bytes: &[u8],
    ) -> Result<PatientRecord, ProcessingError> {
        let pages = self
            .extractor
            .extract_pages(bytes)
            .map_err(|source| ProcessingError::Extraction { report, source })?;
        Ok(extract_patient(&pages))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use crate::pipeline::extraction::PageText;

    /// Treats the upload bytes as the text of a single page.
    pub(crate) struct FakePdf;

    impl PdfExtractor for FakePdf {
        fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
            let text = std::str::from_utf8(pdf_bytes)
                .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
            Ok(vec![PageText::new(1, text)])
        }
    }

    pub(crate) const FULL_CSV: &[u8] = b"Left_Stride_Length,Right_Stride_Length,Cadence,Speed,\
LHipAngles_Sag_Z,LKneeAngles_Sag_Z,LAnkleAngles_Sag_X\n\
1.10,1.20,100,1.05,-5.5,2.0,-10.25\n\
1.30,1.40,104,1.15,38.2,61.75,14.0\n";

    fn processor() -> StudyProcessor {
        StudyProcessor::new(Arc::new(FakePdf))
    }

    fn upload(pre_report: &str, post_report: &str) -> StudyUpload {
        StudyUpload {
            pre_report: pre_report.as_bytes().to_vec(),
            post_report: post_report.as_bytes().to_vec(),
            pre_csv: FULL_CSV.to_vec(),
            post_csv: FULL_CSV.to_vec(),
        }
    }

    #[test]
    fn end_to_end_success() {
        let report = processor()
            .process(&upload(
                "Patient Name: Jane Roe\nPatient ID: A17 x",
                "Patient Name: Jane Roe\nStudy Date 01-02-2025",
            ))
            .unwrap();

        assert_eq!(report.status, "success");
        assert_eq!(report.pre_patient.name, "Jane Roe");
        assert_eq!(report.pre_patient.patient_id, "A17");
        assert_eq!(report.post_patient.study_date, "01-02-2025");
        assert_eq!(report.temporal.len(), 4);
        assert_eq!(report.kinematic.len(), 3);
        assert_eq!(report.temporal[0].pre, Some(1.2));
        assert_eq!(report.temporal[3].post, Some(1.1));
    }

    #[test]
    fn report_without_text_gives_default_patient() {
        let report = processor().process(&upload("", "")).unwrap();
        assert_eq!(report.pre_patient, PatientRecord::default());
        assert_eq!(report.post_patient.name, NOT_AVAILABLE);
    }

    #[test]
    fn unreadable_datasets_still_succeed() {
        let mut up = upload("Patient Name: A", "Patient Name: B");
        up.pre_csv = Vec::new();
        up.post_csv = b"\xFF\xFE".to_vec();
        let report = processor().process(&up).unwrap();
        assert_eq!(report.temporal.len(), 4);
        assert!(report.kinematic.is_empty());
    }

    #[test]
    fn unparseable_report_fails_request() {
        let mut up = upload("", "");
        up.post_report = vec![0xFF, 0xFE];
        let err = processor().process(&up).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Extraction { report: "post_report", .. }
        ));
    }

    #[test]
    fn non_numeric_kinematic_channel_fails_request() {
        let mut up = upload("", "");
        up.post_csv = b"LHipAngles_Sag_Z\nnot-a-number\n".to_vec();
        let err = processor().process(&up).unwrap_err();
        assert!(matches!(err, ProcessingError::Metrics(_)));
    }

    #[test]
    fn real_pdf_engine_reads_patient_name() {
        use crate::pipeline::extraction::pdf::tests::make_test_pdf;
        use crate::pipeline::extraction::PdfTextExtractor;

        let report = make_test_pdf(&["Patient Name: Jane Roe", "Study Type: Gait Analysis"]);
        let up = StudyUpload {
            pre_report: report.clone(),
            post_report: report,
            pre_csv: FULL_CSV.to_vec(),
            post_csv: FULL_CSV.to_vec(),
        };
        let result = StudyProcessor::new(Arc::new(PdfTextExtractor))
            .process(&up)
            .unwrap();
        assert!(result.pre_patient.name.contains("Jane"));
    }

    #[test]
    fn report_serializes_with_wire_keys() {
        let report = processor().process(&upload("", "")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["pre_patient"]["Patient ID"], NOT_AVAILABLE);
        assert_eq!(json["temporal"][2][0], "Cadence");
        assert_eq!(json["temporal"][2][3], 102.0);
        assert_eq!(json["kinematic"][0][0], "LHipAngles_Sag_Z");
        assert_eq!(json["kinematic"][0][1], -5.5);
    }
}
