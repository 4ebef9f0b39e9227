//! Employee aggregate with its embedded family and education records.
//!
//! JSON field names and enum labels follow the records client
//! (`nama`, `nik`, `keluarga`, `Laki-laki`, ...), so stored and exported
//! records stay wire-compatible with it.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::constants::{
    CHILD_ID_PREFIX, DEFAULT_POSITION, DEFAULT_RELIGION, EDUCATION_ID_PREFIX, EMPLOYEE_ID_PREFIX,
    RELIGION_OPTIONS,
};
use crate::error::{DomainError, DomainResult};

/// Employee identifier (`pegawai-...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(format!("{}-{}", EMPLOYEE_ID_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmployeeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Sex as recorded on the national ID card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Sex {
    #[default]
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
}

impl Sex {
    /// Option set offered by the personal data form
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Laki-laki",
            Sex::Female => "Perempuan",
        }
    }
}

/// Marital status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum MaritalStatus {
    #[default]
    #[serde(rename = "Belum Kawin")]
    Unmarried,
    #[serde(rename = "Kawin")]
    Married,
    #[serde(rename = "Cerai Hidup")]
    Divorced,
    #[serde(rename = "Cerai Mati")]
    Widowed,
}

impl MaritalStatus {
    /// Option set offered by the personal data form
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Unmarried,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaritalStatus::Unmarried => "Belum Kawin",
            MaritalStatus::Married => "Kawin",
            MaritalStatus::Divorced => "Cerai Hidup",
            MaritalStatus::Widowed => "Cerai Mati",
        }
    }
}

/// Education level, ordered from primary to tertiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EducationLevel {
    #[serde(rename = "SD")]
    Primary,
    #[serde(rename = "SMP")]
    JuniorHigh,
    #[serde(rename = "SMA")]
    SeniorHigh,
    #[serde(rename = "Universitas")]
    University,
}

impl EducationLevel {
    /// Option set offered by the education form, in ascending order
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::Primary,
        EducationLevel::JuniorHigh,
        EducationLevel::SeniorHigh,
        EducationLevel::University,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::Primary => "SD",
            EducationLevel::JuniorHigh => "SMP",
            EducationLevel::SeniorHigh => "SMA",
            EducationLevel::University => "Universitas",
        }
    }
}

/// Spouse sub-record. An empty name means "no spouse".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Spouse {
    #[serde(rename = "nama", default)]
    pub name: String,
}

impl Spouse {
    pub fn is_present(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One child entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Child {
    pub id: String,
    #[serde(rename = "nama")]
    pub name: String,
}

impl Child {
    /// Create a child entry with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", CHILD_ID_PREFIX, Uuid::new_v4().simple()),
            name: name.into(),
        }
    }
}

/// Family record embedded in an employee. Children keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Family {
    #[serde(rename = "pasangan", default)]
    pub spouse: Spouse,
    #[serde(rename = "anak", default)]
    pub children: Vec<Child>,
}

/// One entry of an employee's education history.
///
/// Entries are not unique by level; two university degrees are two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Education {
    pub id: String,
    #[serde(rename = "tingkat")]
    pub level: EducationLevel,
    #[serde(rename = "namaSekolah", default)]
    pub school_name: String,
    #[serde(rename = "tahunMasuk", default)]
    pub admission_year: String,
    #[serde(rename = "tahunLulus", default)]
    pub graduation_year: String,
    #[serde(rename = "noIjazah", default)]
    pub certificate_number: String,
    #[serde(
        rename = "fotoIjazahUrl",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_photo: Option<String>,
}

impl Education {
    /// Create an education entry with a generated id and no certificate photo.
    pub fn new(
        level: EducationLevel,
        school_name: impl Into<String>,
        admission_year: impl Into<String>,
        graduation_year: impl Into<String>,
        certificate_number: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}-{}", EDUCATION_ID_PREFIX, Uuid::new_v4().simple()),
            level,
            school_name: school_name.into(),
            admission_year: admission_year.into(),
            graduation_year: graduation_year.into(),
            certificate_number: certificate_number.into(),
            certificate_photo: None,
        }
    }
}

/// Employee record, the root aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nik", default)]
    pub national_id: String,
    #[serde(rename = "tempatLahir", default)]
    pub birthplace: String,
    #[serde(rename = "tanggalLahir", default)]
    pub birth_date: String,
    #[serde(rename = "jenisKelamin", default)]
    pub sex: Sex,
    #[serde(rename = "agama", default)]
    pub religion: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "nomorTelepon", default)]
    pub phone: String,
    #[serde(rename = "statusPerkawinan", default)]
    pub marital_status: MaritalStatus,
    #[serde(rename = "alamat", default)]
    pub address: String,
    #[serde(
        rename = "fotoKtpUrl",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_card_photo: Option<String>,
    #[serde(rename = "nip", default)]
    pub employee_number: String,
    #[serde(rename = "jabatan", default)]
    pub position: String,
    #[serde(rename = "golongan", default)]
    pub grade: String,
    #[serde(rename = "pangkat", default)]
    pub rank: String,
    #[serde(rename = "keluarga", default)]
    pub family: Family,
    #[serde(rename = "pendidikan", default)]
    pub education: Vec<Education>,
}

impl Employee {
    /// Build a full record from form data, with empty family and education.
    pub fn from_new(id: EmployeeId, data: NewEmployee) -> Self {
        Self {
            id,
            name: data.name,
            national_id: data.national_id,
            birthplace: data.birthplace,
            birth_date: data.birth_date,
            sex: data.sex,
            religion: data.religion,
            email: data.email,
            phone: data.phone,
            marital_status: data.marital_status,
            address: data.address,
            id_card_photo: None,
            employee_number: data.employee_number,
            position: data.position,
            grade: data.grade,
            rank: data.rank,
            family: Family::default(),
            education: Vec::new(),
        }
    }

    /// Minimal stub created by self-registration.
    pub fn blank(id: EmployeeId, name: impl Into<String>) -> Self {
        let data = NewEmployee {
            name: name.into(),
            position: DEFAULT_POSITION.to_string(),
            ..NewEmployee::default()
        };
        Self::from_new(id, data)
    }

    /// Names of the top-level fields that differ between `self` and `other`.
    pub fn changed_fields(&self, other: &Employee) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let mut check = |name: &'static str, differs: bool| {
            if differs {
                changed.push(name);
            }
        };

        check("name", self.name != other.name);
        check("national_id", self.national_id != other.national_id);
        check("birthplace", self.birthplace != other.birthplace);
        check("birth_date", self.birth_date != other.birth_date);
        check("sex", self.sex != other.sex);
        check("religion", self.religion != other.religion);
        check("email", self.email != other.email);
        check("phone", self.phone != other.phone);
        check("marital_status", self.marital_status != other.marital_status);
        check("address", self.address != other.address);
        check("id_card_photo", self.id_card_photo != other.id_card_photo);
        check("employee_number", self.employee_number != other.employee_number);
        check("position", self.position != other.position);
        check("grade", self.grade != other.grade);
        check("rank", self.rank != other.rank);
        check("family", self.family != other.family);
        check("education", self.education != other.education);

        changed
    }
}

/// Employee form data: everything except id, family, education and photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewEmployee {
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "nik", default)]
    pub national_id: String,
    #[serde(rename = "tempatLahir", default)]
    pub birthplace: String,
    #[serde(rename = "tanggalLahir", default)]
    pub birth_date: String,
    #[serde(rename = "jenisKelamin", default)]
    pub sex: Sex,
    #[serde(rename = "agama", default = "default_religion")]
    pub religion: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "nomorTelepon", default)]
    pub phone: String,
    #[serde(rename = "statusPerkawinan", default)]
    pub marital_status: MaritalStatus,
    #[serde(rename = "alamat", default)]
    pub address: String,
    #[serde(rename = "nip", default)]
    pub employee_number: String,
    #[serde(rename = "jabatan", default)]
    pub position: String,
    #[serde(rename = "golongan", default)]
    pub grade: String,
    #[serde(rename = "pangkat", default)]
    pub rank: String,
}

impl Default for NewEmployee {
    fn default() -> Self {
        Self {
            name: String::new(),
            national_id: String::new(),
            birthplace: String::new(),
            birth_date: String::new(),
            sex: Sex::default(),
            religion: default_religion(),
            email: String::new(),
            phone: String::new(),
            marital_status: MaritalStatus::default(),
            address: String::new(),
            employee_number: String::new(),
            position: String::new(),
            grade: String::new(),
            rank: String::new(),
        }
    }
}

impl NewEmployee {
    /// Name and national-ID number are required on create.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if self.national_id.trim().is_empty() {
            return Err(DomainError::validation("National ID number is required"));
        }
        Ok(())
    }
}

/// Option sets offered by the employee forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FormOptions {
    #[serde(rename = "jenisKelamin")]
    pub sexes: Vec<Sex>,
    #[serde(rename = "statusPerkawinan")]
    pub marital_statuses: Vec<MaritalStatus>,
    #[serde(rename = "agama")]
    pub religions: Vec<String>,
    #[serde(rename = "tingkatPendidikan")]
    pub education_levels: Vec<EducationLevel>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            sexes: Sex::ALL.to_vec(),
            marital_statuses: MaritalStatus::ALL.to_vec(),
            religions: RELIGION_OPTIONS.iter().map(|r| r.to_string()).collect(),
            education_levels: EducationLevel::ALL.to_vec(),
        }
    }
}

fn default_religion() -> String {
    DEFAULT_RELIGION.to_string()
}

/// The client sends `""` for "no photo".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_employee_defaults() {
        let employee = Employee::blank(EmployeeId::new("pegawai-9"), "New Person");

        assert_eq!(employee.name, "New Person");
        assert_eq!(employee.position, DEFAULT_POSITION);
        assert_eq!(employee.sex, Sex::Male);
        assert_eq!(employee.religion, "Islam");
        assert_eq!(employee.marital_status, MaritalStatus::Unmarried);
        assert!(employee.id_card_photo.is_none());
        assert!(!employee.family.spouse.is_present());
        assert!(employee.family.children.is_empty());
        assert!(employee.education.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EmployeeId::generate();
        let b = EmployeeId::generate();

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("pegawai-"));
        assert_ne!(Child::new("Adi").id, Child::new("Adi").id);
    }

    #[test]
    fn test_education_levels_are_ordered() {
        assert!(EducationLevel::Primary < EducationLevel::JuniorHigh);
        assert!(EducationLevel::SeniorHigh < EducationLevel::University);
        let mut levels = EducationLevel::ALL.to_vec();
        levels.reverse();
        levels.sort();
        assert_eq!(levels, EducationLevel::ALL.to_vec());
    }

    #[test]
    fn test_form_options_cover_defaults_and_seed_values() {
        let options = FormOptions::default();

        assert_eq!(options.religions[0], DEFAULT_RELIGION);
        assert!(options.religions.iter().any(|r| r == "Kristen Protestan"));
        assert_eq!(options.religions.len(), 6);
        assert!(options.sexes.contains(&Sex::default()));
        assert!(options.marital_statuses.contains(&MaritalStatus::default()));

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["jenisKelamin"], json!(["Laki-laki", "Perempuan"]));
        assert_eq!(value["tingkatPendidikan"][3], "Universitas");
        assert_eq!(value["agama"][5], "Konghucu");
    }

    #[test]
    fn test_new_employee_validation() {
        let mut data = NewEmployee::default();
        assert!(matches!(data.validate(), Err(DomainError::Validation(_))));

        data.name = "Dedi".to_string();
        assert!(data.validate().is_err());

        data.national_id = "123".to_string();
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_changed_fields() {
        let before = Employee::blank(EmployeeId::new("pegawai-1"), "Budi");
        let mut after = before.clone();
        after.phone = "0812".to_string();
        after.family.children.push(Child::new("Adi"));

        assert_eq!(before.changed_fields(&after), vec!["phone", "family"]);
        assert!(before.changed_fields(&before).is_empty());
    }

    #[test]
    fn test_deserializes_client_payload() {
        let payload = json!({
            "id": "pegawai-1",
            "nama": "Budi Santoso",
            "nik": "3201234567890001",
            "jenisKelamin": "Laki-laki",
            "agama": "Islam",
            "statusPerkawinan": "Kawin",
            "fotoKtpUrl": "",
            "keluarga": { "pasangan": { "nama": "Siti Aminah" }, "anak": [{ "id": "anak-1", "nama": "Adi" }] },
            "pendidikan": [{
                "id": "pend-1", "tingkat": "Universitas", "namaSekolah": "UI",
                "tahunMasuk": "2008", "tahunLulus": "2012", "noIjazah": "UI-12345"
            }]
        });

        let employee: Employee = serde_json::from_value(payload).unwrap();

        assert_eq!(employee.id.as_str(), "pegawai-1");
        assert_eq!(employee.marital_status, MaritalStatus::Married);
        assert!(employee.id_card_photo.is_none());
        assert_eq!(employee.family.spouse.name, "Siti Aminah");
        assert_eq!(employee.education[0].level, EducationLevel::University);
    }

    #[test]
    fn test_serializes_wire_names() {
        let employee = Employee::blank(EmployeeId::new("pegawai-2"), "Rina");
        let value = serde_json::to_value(&employee).unwrap();

        assert_eq!(value["nama"], "Rina");
        assert_eq!(value["jabatan"], DEFAULT_POSITION);
        assert_eq!(value["statusPerkawinan"], "Belum Kawin");
        assert!(value.get("fotoKtpUrl").is_none());
        assert_eq!(value["keluarga"]["anak"], json!([]));
    }
}
