use std::path::PathBuf;

use fieldmap_cli::script::ClickStep;
use fieldmap_model::{ExportDocument, FieldComparison, Mapping, SchemaSide};

pub struct InspectReport {
    pub path: PathBuf,
    pub schema: SchemaSide,
    pub rows: usize,
}

pub struct CompareReport {
    pub existing: SchemaSide,
    pub new: SchemaSide,
    pub comparison: FieldComparison,
}

pub struct MapReport {
    pub steps: Vec<ClickStep>,
    pub export_path: PathBuf,
    pub document: ExportDocument,
}

pub struct MergeReport {
    pub steps: Vec<ClickStep>,
    pub mappings: Vec<Mapping>,
    pub matching_fields: Vec<String>,
    pub records: usize,
    pub message: String,
}
