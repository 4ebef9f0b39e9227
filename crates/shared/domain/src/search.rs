//! Record matching for the search and directory views.

use serde::Deserialize;

use crate::employee::Employee;

/// Whether `term` matches the caller's own record.
///
/// Name and position match case-insensitively; national-ID and employee
/// numbers match as plain substrings. An empty term never matches.
pub fn matches_own_record(employee: &Employee, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return false;
    }

    let lowered = term.to_lowercase();
    employee.name.to_lowercase().contains(&lowered)
        || employee.national_id.contains(term)
        || employee.employee_number.contains(term)
        || employee.position.to_lowercase().contains(&lowered)
}

/// Administrator directory filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct EmployeeFilter {
    /// Substring of name (case-insensitive), national-ID or employee number
    #[serde(default)]
    pub term: Option<String>,
    /// Exact position
    #[serde(default)]
    pub position: Option<String>,
    /// Exact grade
    #[serde(default)]
    pub grade: Option<String>,
}

impl EmployeeFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.term).is_none()
            && non_empty(&self.position).is_none()
            && non_empty(&self.grade).is_none()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        let matches_term = match non_empty(&self.term) {
            None => true,
            Some(term) => {
                let lowered = term.to_lowercase();
                employee.name.to_lowercase().contains(&lowered)
                    || employee.national_id.contains(term)
                    || employee.employee_number.contains(term)
            }
        };
        let matches_position =
            non_empty(&self.position).map_or(true, |position| employee.position == position);
        let matches_grade = non_empty(&self.grade).map_or(true, |grade| employee.grade == grade);

        matches_term && matches_position && matches_grade
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
