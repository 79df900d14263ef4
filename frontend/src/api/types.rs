use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub const VALIDATION_ERROR: &'static str = "VALIDATION_ERROR";
    pub const CONFLICT: &'static str = "CONFLICT";
    pub const UNAUTHORIZED: &'static str = "UNAUTHORIZED";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const HTTP_ERROR: &'static str = "HTTP_ERROR";
    pub const REQUEST_FAILED: &'static str = "REQUEST_FAILED";
    pub const UNKNOWN: &'static str = "UNKNOWN";

    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::VALIDATION_ERROR)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::CONFLICT)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::UNAUTHORIZED)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::UNKNOWN)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::REQUEST_FAILED)
    }

    /// Code used for a non-success status when the body carries none.
    pub fn code_for_status(status: u16) -> &'static str {
        match status {
            400 | 422 => Self::VALIDATION_ERROR,
            401 => Self::UNAUTHORIZED,
            404 => Self::NOT_FOUND,
            409 => Self::CONFLICT,
            _ => Self::HTTP_ERROR,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.code == Self::CONFLICT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// References between records
// ---------------------------------------------------------------------------

/// Anything with a backend id and a human-readable name.
pub trait Record {
    fn record_id(&self) -> &str;
    fn display_name(&self) -> &str;
}

/// A foreign key that the backend sends either bare or populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(T),
}

impl<T: Record> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(record) => record.record_id(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(record) => Some(record.display_name()),
        }
    }

    pub fn label(&self) -> String {
        self.name().unwrap_or_else(|| self.id()).to_string()
    }
}

macro_rules! impl_record {
    ($ty:ty) => {
        impl Record for $ty {
            fn record_id(&self) -> &str {
                &self.id
            }

            fn display_name(&self) -> &str {
                &self.name
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DutyCategory {
    Examination,
    Administrative,
    Academic,
    CoCurricular,
    Other,
}

impl DutyCategory {
    pub const ALL: [DutyCategory; 5] = [
        DutyCategory::Examination,
        DutyCategory::Administrative,
        DutyCategory::Academic,
        DutyCategory::CoCurricular,
        DutyCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyCategory::Examination => "Examination",
            DutyCategory::Administrative => "Administrative",
            DutyCategory::Academic => "Academic",
            DutyCategory::CoCurricular => "Co-curricular",
            DutyCategory::Other => "Other",
        }
    }
}

impl Default for DutyCategory {
    fn default() -> Self {
        DutyCategory::Other
    }
}

impl From<String> for DutyCategory {
    fn from(value: String) -> Self {
        DutyCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(DutyCategory::Other)
    }
}

impl From<DutyCategory> for String {
    fn from(value: DutyCategory) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibilityType {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: DutyCategory,
}

impl_record!(Branch);
impl_record!(SchoolClass);
impl_record!(Subject);
impl_record!(ResponsibilityType);

/// Discriminator of the generic master-data endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterDataKind {
    Branch,
    Class,
    Subject,
    Responsibility,
}

impl MasterDataKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            MasterDataKind::Branch => "branch",
            MasterDataKind::Class => "class",
            MasterDataKind::Subject => "subject",
            MasterDataKind::Responsibility => "responsibility",
        }
    }
}

/// Loose shape shared by every master-data record; type-specific fields are
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DutyCategory>,
}

impl_record!(MasterDataRecord);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DutyCategory>,
}

// ---------------------------------------------------------------------------
// Teachers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub campus: Option<Ref<Branch>>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl_record!(Teacher);

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayload {
    pub teacher_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub inserted: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignmentStatus {
    Assigned,
    Other(String),
}

impl AssignmentStatus {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentStatus::Assigned)
    }

    pub fn as_str(&self) -> &str {
        match self {
            AssignmentStatus::Assigned => "Assigned",
            AssignmentStatus::Other(value) => value,
        }
    }
}

impl Default for AssignmentStatus {
    fn default() -> Self {
        AssignmentStatus::Assigned
    }
}

impl From<String> for AssignmentStatus {
    fn from(value: String) -> Self {
        if value == "Assigned" {
            AssignmentStatus::Assigned
        } else {
            AssignmentStatus::Other(value)
        }
    }
}

impl From<AssignmentStatus> for String {
    fn from(value: AssignmentStatus) -> Self {
        match value {
            AssignmentStatus::Assigned => "Assigned".to_string(),
            AssignmentStatus::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub teacher: Option<Ref<Teacher>>,
    /// `None` once the responsibility type has been deleted server-side.
    #[serde(default)]
    pub responsibility_type: Option<Ref<ResponsibilityType>>,
    #[serde(default)]
    pub target_class: Option<Ref<SchoolClass>>,
    #[serde(default)]
    pub target_subject: Option<Ref<Subject>>,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub teacher: String,
    pub responsibility_type: String,
    pub year: i32,
    pub target_class: String,
    pub target_subject: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub year: Option<i32>,
    pub teacher: Option<String>,
    pub responsibility_type: Option<String>,
    pub status: Option<String>,
}

impl AssignmentFilter {
    pub fn for_teacher(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher: Some(teacher_id.into()),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        push_non_empty(&mut params, "teacher", self.teacher.as_deref());
        push_non_empty(
            &mut params,
            "responsibilityType",
            self.responsibility_type.as_deref(),
        );
        push_non_empty(&mut params, "status", self.status.as_deref());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityQuery {
    pub year: i32,
    pub class_id: String,
    pub subject_id: String,
}

impl EligibilityQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("year", self.year.to_string()),
            ("classId", self.class_id.clone()),
            ("subjectId", self.subject_id.clone()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub teacher: Option<Ref<Teacher>>,
    #[serde(default)]
    pub responsibility_type: Option<Ref<ResponsibilityType>>,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantLeaveRequest {
    pub teacher: String,
    pub responsibility_type: String,
    pub year: i32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    pub teacher: Option<String>,
    pub status: Option<String>,
}

impl LeaveFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_non_empty(&mut params, "teacher", self.teacher.as_deref());
        push_non_empty(&mut params, "status", self.status.as_deref());
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveConflictResponse {
    #[serde(alias = "conflict", default)]
    pub has_conflict: bool,
    #[serde(default)]
    pub leave: Option<Leave>,
}

// ---------------------------------------------------------------------------
// Routines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub teacher: Option<Ref<Teacher>>,
    #[serde(default)]
    pub year: i32,
    #[serde(rename = "class", default)]
    pub school_class: Option<Ref<SchoolClass>>,
    #[serde(default)]
    pub subject: Option<Ref<Subject>>,
    #[serde(default)]
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePayload {
    pub teacher: String,
    pub year: i32,
    #[serde(rename = "class")]
    pub school_class: String,
    pub subject: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutineFilter {
    pub teacher: Option<String>,
    pub year: Option<i32>,
}

impl RoutineFilter {
    pub fn for_teacher(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher: Some(teacher_id.into()),
            year: None,
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_non_empty(&mut params, "teacher", self.teacher.as_deref());
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub year: Option<i32>,
    pub responsibility_type: Option<String>,
    pub teacher: Option<String>,
    pub campus: Option<String>,
}

impl ReportFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        push_non_empty(
            &mut params,
            "responsibilityType",
            self.responsibility_type.as_deref(),
        );
        push_non_empty(&mut params, "teacher", self.teacher.as_deref());
        push_non_empty(&mut params, "campus", self.campus.as_deref());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub responsibility: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn path_segment(self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

fn push_non_empty(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        params.push((key, value.to_string()));
    }
}
