use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies the destination table of a CSV upload.
///
/// The set is closed: the upload form, the template catalog and the backend
/// whitelist all dispatch on this enum, so adding a table means adding a
/// variant and its template in `model::template`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    Student,
    Employee,
    EmploymentHistory,
    IgrsYearwise,
    IccYearwise,
    EwdYearwise,
    Alumni,
    ResearchProjects,
    ResearchMous,
    ResearchPatents,
    ExternshipInfo,
    ResearchPublications,
    IndustryCourses,
    AcademicProgramLaunch,
    PlacementSummary,
    PlacementCompanies,
    Startups,
    IndustryConclave,
    OpenHouse,
    NptelLocalChapters,
    NptelCourses,
    NptelEnrollments,
    UbaProjects,
    UbaEvents,
}

impl TableId {
    pub const ALL: [TableId; 24] = [
        TableId::Student,
        TableId::Employee,
        TableId::EmploymentHistory,
        TableId::IgrsYearwise,
        TableId::IccYearwise,
        TableId::EwdYearwise,
        TableId::Alumni,
        TableId::ResearchProjects,
        TableId::ResearchMous,
        TableId::ResearchPatents,
        TableId::ExternshipInfo,
        TableId::ResearchPublications,
        TableId::IndustryCourses,
        TableId::AcademicProgramLaunch,
        TableId::PlacementSummary,
        TableId::PlacementCompanies,
        TableId::Startups,
        TableId::IndustryConclave,
        TableId::OpenHouse,
        TableId::NptelLocalChapters,
        TableId::NptelCourses,
        TableId::NptelEnrollments,
        TableId::UbaProjects,
        TableId::UbaEvents,
    ];

    /// The wire name sent as the `table_name` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            TableId::Student => "student",
            TableId::Employee => "employee",
            TableId::EmploymentHistory => "employment_history",
            TableId::IgrsYearwise => "igrs_yearwise",
            TableId::IccYearwise => "icc_yearwise",
            TableId::EwdYearwise => "ewd_yearwise",
            TableId::Alumni => "alumni",
            TableId::ResearchProjects => "research_projects",
            TableId::ResearchMous => "research_mous",
            TableId::ResearchPatents => "research_patents",
            TableId::ExternshipInfo => "externship_info",
            TableId::ResearchPublications => "research_publications",
            TableId::IndustryCourses => "industry_courses",
            TableId::AcademicProgramLaunch => "academic_program_launch",
            TableId::PlacementSummary => "placement_summary",
            TableId::PlacementCompanies => "placement_companies",
            TableId::Startups => "startups",
            TableId::IndustryConclave => "industry_conclave",
            TableId::OpenHouse => "open_house",
            TableId::NptelLocalChapters => "nptel_local_chapters",
            TableId::NptelCourses => "nptel_courses",
            TableId::NptelEnrollments => "nptel_enrollments",
            TableId::UbaProjects => "uba_projects",
            TableId::UbaEvents => "uba_events",
        }
    }

    /// Case-insensitive lookup, used by the server whitelist.
    pub fn from_name_ignore_case(name: &str) -> Option<TableId> {
        let name = name.trim();
        TableId::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table '{}'", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for TableId {
    type Err = UnknownTable;

    /// Exact match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableId::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}
