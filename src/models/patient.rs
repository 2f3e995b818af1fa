use serde::{Deserialize, Serialize};

/// Sentinel stored in every field the report did not yield.
pub const NOT_AVAILABLE: &str = "N/A";

/// Closed set of patient/study fields recovered from a gait report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientField {
    Name,
    PatientId,
    Gender,
    Age,
    Height,
    Weight,
    Dob,
    Diagnosis,
    Department,
    StudyType,
    StudyDate,
    StudyTime,
    ConsultingDoctor,
}

impl PatientField {
    pub const ALL: [PatientField; 13] = [
        PatientField::Name,
        PatientField::PatientId,
        PatientField::Gender,
        PatientField::Age,
        PatientField::Height,
        PatientField::Weight,
        PatientField::Dob,
        PatientField::Diagnosis,
        PatientField::Department,
        PatientField::StudyType,
        PatientField::StudyDate,
        PatientField::StudyTime,
        PatientField::ConsultingDoctor,
    ];

    /// Label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PatientField::Name => "Name",
            PatientField::PatientId => "Patient ID",
            PatientField::Gender => "Gender",
            PatientField::Age => "Age",
            PatientField::Height => "Height",
            PatientField::Weight => "Weight",
            PatientField::Dob => "DOB",
            PatientField::Diagnosis => "Diagnosis",
            PatientField::Department => "Department",
            PatientField::StudyType => "Study Type",
            PatientField::StudyDate => "Study Date",
            PatientField::StudyTime => "Study Time",
            PatientField::ConsultingDoctor => "Consulting Doctor",
        }
    }
}

/// Patient and study metadata of one gait report.
///
/// Total over its field set: a field the report does not yield holds
/// [`NOT_AVAILABLE`]. `Default` is the all-sentinel template every
/// extraction starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Patient ID")]
    pub patient_id: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Height")]
    pub height: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Study Type")]
    pub study_type: String,
    #[serde(rename = "Study Date")]
    pub study_date: String,
    #[serde(rename = "Study Time")]
    pub study_time: String,
    #[serde(rename = "Consulting Doctor")]
    pub consulting_doctor: String,
}

impl Default for PatientRecord {
    fn default() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            name: na(),
            patient_id: na(),
            gender: na(),
            age: na(),
            height: na(),
            weight: na(),
            dob: na(),
            diagnosis: na(),
            department: na(),
            study_type: na(),
            study_date: na(),
            study_time: na(),
            consulting_doctor: na(),
        }
    }
}

impl PatientRecord {
    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::Name => &self.name,
            PatientField::PatientId => &self.patient_id,
            PatientField::Gender => &self.gender,
            PatientField::Age => &self.age,
            PatientField::Height => &self.height,
            PatientField::Weight => &self.weight,
            PatientField::Dob => &self.dob,
            PatientField::Diagnosis => &self.diagnosis,
            PatientField::Department => &self.department,
            PatientField::StudyType => &self.study_type,
            PatientField::StudyDate => &self.study_date,
            PatientField::StudyTime => &self.study_time,
            PatientField::ConsultingDoctor => &self.consulting_doctor,
        }
    }

    /// Overwrite a field. Later writes replace earlier ones.
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        let slot = match field {
            PatientField::Name => &mut self.name,
            PatientField::PatientId => &mut self.patient_id,
            PatientField::Gender => &mut self.gender,
            PatientField::Age => &mut self.age,
            PatientField::Height => &mut self.height,
            PatientField::Weight => &mut self.weight,
            PatientField::Dob => &mut self.dob,
            PatientField::Diagnosis => &mut self.diagnosis,
            PatientField::Department => &mut self.department,
            PatientField::StudyType => &mut self.study_type,
            PatientField::StudyDate => &mut self.study_date,
            PatientField::StudyTime => &mut self.study_time,
            PatientField::ConsultingDoctor => &mut self.consulting_doctor,
        };
        *slot = value.into();
    }

    /// Number of fields holding something other than the sentinel.
    pub fn populated_count(&self) -> usize {
        PatientField::ALL
            .iter()
            .filter(|f| self.get(**f) != NOT_AVAILABLE)
            .count()
    }
}
