//! Static catalog of the CSV layout expected for every upload target.
//!
//! Each [`TableId`] maps to a [`TemplateDefinition`]: the ordered column headers,
//! one example row used to build the downloadable template, and the columns that
//! identify a row uniquely (used by the server when upserting).
//!
//! The frontend uses the catalog to show the required headers and to offer a
//! `{table}_template.csv` download; the backend uses it as the schema a CSV
//! upload is checked against.

use crate::model::table::TableId;
use serde::Serialize;

/// MIME type of the generated template file.
pub const TEMPLATE_MIME: &str = "text/csv;charset=utf-8;";

/// Layout of one upload target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub headers: &'static [&'static str],
    pub sample: &'static [&'static str],
    /// Columns forming the natural key of a row. Empty when rows are only appended.
    pub unique_key: &'static [&'static str],
}

/// Headers and sample row for a table name, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub headers: &'static [&'static str],
    pub sample: &'static [&'static str],
}

impl Template {
    pub const EMPTY: Template = Template {
        headers: &[],
        sample: &[],
    };

    /// Renders the two-line template file: headers, then the sample row.
    ///
    /// No quoting is applied, sample values containing commas are written as is.
    pub fn to_csv(&self) -> Option<String> {
        if self.headers.is_empty() {
            return None;
        }
        Some(format!("{}\n{}", self.headers.join(","), self.sample.join(",")))
    }
}

impl TableId {
    pub fn template(self) -> &'static TemplateDefinition {
        match self {
            TableId::Student => &STUDENT,
            TableId::Employee => &EMPLOYEE,
            TableId::EmploymentHistory => &EMPLOYMENT_HISTORY,
            TableId::IgrsYearwise => &IGRS_YEARWISE,
            TableId::IccYearwise => &ICC_YEARWISE,
            TableId::EwdYearwise => &EWD_YEARWISE,
            TableId::Alumni => &ALUMNI,
            TableId::ResearchProjects => &RESEARCH_PROJECTS,
            TableId::ResearchMous => &RESEARCH_MOUS,
            TableId::ResearchPatents => &RESEARCH_PATENTS,
            TableId::ExternshipInfo => &EXTERNSHIP_INFO,
            TableId::ResearchPublications => &RESEARCH_PUBLICATIONS,
            TableId::IndustryCourses => &INDUSTRY_COURSES,
            TableId::AcademicProgramLaunch => &ACADEMIC_PROGRAM_LAUNCH,
            TableId::PlacementSummary => &PLACEMENT_SUMMARY,
            TableId::PlacementCompanies => &PLACEMENT_COMPANIES,
            TableId::Startups => &STARTUPS,
            TableId::IndustryConclave => &INDUSTRY_CONCLAVE,
            TableId::OpenHouse => &OPEN_HOUSE,
            TableId::NptelLocalChapters => &NPTEL_LOCAL_CHAPTERS,
            TableId::NptelCourses => &NPTEL_COURSES,
            TableId::NptelEnrollments => &NPTEL_ENROLLMENTS,
            TableId::UbaProjects => &UBA_PROJECTS,
            TableId::UbaEvents => &UBA_EVENTS,
        }
    }
}

/// Looks up the template for any table name.
///
/// Unrecognized names yield [`Template::EMPTY`].
pub fn get_template(table_name: &str) -> Template {
    match table_name.parse::<TableId>() {
        Ok(table) => {
            let definition = table.template();
            Template {
                headers: definition.headers,
                sample: definition.sample,
            }
        }
        Err(_) => Template::EMPTY,
    }
}

/// CSV text of the downloadable template, `None` for unknown tables.
pub fn template_csv(table_name: &str) -> Option<String> {
    get_template(table_name).to_csv()
}

pub fn template_file_name(table_name: &str) -> String {
    format!("{}_template.csv", table_name)
}

static STUDENT: TemplateDefinition = TemplateDefinition {
    headers: &[
        "rollno", "name", "program", "yearofadmission", "batch", "branch", "department", "pwd",
        "state", "category", "gender", "status",
    ],
    sample: &[
        "123456", "John Doe", "BTech", "2023", "Jan", "CSE", "Computer Science", "FALSE", "Kerala",
        "Gen", "Male", "Ongoing",
    ],
    unique_key: &["rollno"],
};

static EMPLOYEE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "empname", "email", "phonenumber", "bloodgroup", "dateofbirth", "gender", "department",
        "currentdesignationid", "isactive", "category", "pwd_exs", "state",
    ],
    sample: &[
        "Jane Smith", "jane@example.com", "9876543210", "O+", "1990-01-01", "Female",
        "Computer Science", "1", "TRUE", "Gen", "FALSE", "Kerala",
    ],
    unique_key: &["email"],
};

static EMPLOYMENT_HISTORY: TemplateDefinition = TemplateDefinition {
    headers: &[
        "employeeid", "designationid", "designation", "dateofjoining", "dateofrelieving",
        "appointmentmode", "natureofappointment", "isonlien", "lienstartdate", "lienenddate",
        "lienduration", "status", "remarks",
    ],
    sample: &[
        "1", "2", "Assistant Professor", "2020-01-15", "", "Direct", "Regular", "No", "", "", "",
        "Active", "Initial appointment",
    ],
    unique_key: &["employeeid", "designationid", "dateofjoining"],
};

static IGRS_YEARWISE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "grievance_year", "total_grievances_filed", "grievances_resolved", "grievances_pending",
    ],
    sample: &["2023", "10", "8", "2"],
    unique_key: &["grievance_year"],
};

static ICC_YEARWISE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "complaints_year", "total_complaints", "complaints_resolved", "complaints_pending",
    ],
    sample: &["2023", "5", "4", "1"],
    unique_key: &["complaints_year"],
};

static EWD_YEARWISE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "ewd_year",
        "annual_electricity_consumption",
        "per_capita_electricity_consumption",
        "per_capita_water_consumption",
        "per_capita_recycled_water",
        "green_coverage",
    ],
    sample: &["2023", "50000", "120.5", "45.2", "10.5", "35.5"],
    unique_key: &["ewd_year"],
};

static ALUMNI: TemplateDefinition = TemplateDefinition {
    headers: &[
        "rollno", "name", "alumniidno", "currentdesignation", "jobcountry", "jobplace",
        "yearofgraduation", "department", "program", "category", "gender", "homestate",
        "jobstate", "outcome", "employer_or_institution",
    ],
    sample: &[
        "112233", "Alice Bob", "AL123", "Software Engineer", "India", "Bangalore", "2022", "CSE",
        "BTech", "Gen", "Female", "Kerala", "Karnataka", "Corporate", "Google",
    ],
    unique_key: &["rollno"],
};

static RESEARCH_PROJECTS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "project_title", "principal_investigator", "department", "project_type",
        "funding_agency", "client_organization", "amount_sanctioned", "start_date", "end_date",
        "status",
    ],
    sample: &[
        "AI Project", "Dr. Smith", "CSE", "Funded", "DST", "", "5000000", "2023-01-01",
        "2025-01-01", "Ongoing",
    ],
    unique_key: &[],
};

static RESEARCH_MOUS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "partner_name", "collaboration_nature", "date_signed", "validity_end", "remarks",
    ],
    sample: &[
        "Tech Corp", "Joint Research", "2023-05-15", "2026-05-15", "Active collaboration",
    ],
    unique_key: &[],
};

static RESEARCH_PATENTS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "patent_title", "inventors", "patent_status", "filing_date", "grant_date", "remarks",
    ],
    sample: &[
        "New Algorithm", "Dr. Smith, John Doe", "Filed", "2023-08-20", "", "Pending review",
    ],
    unique_key: &[],
};

static EXTERNSHIP_INFO: TemplateDefinition = TemplateDefinition {
    headers: &[
        "empname", "department", "industry_name", "startdate", "enddate", "type", "remarks",
    ],
    sample: &[
        "Prof. Jones", "EE", "Power Grid Corp", "2023-06-01", "2023-07-31", "Summer Externship",
        "Completed",
    ],
    unique_key: &[],
};

static RESEARCH_PUBLICATIONS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "publication_title", "journal_name", "department", "faculty_name", "publication_year",
        "publication_type",
    ],
    sample: &[
        "Deep Learning", "IEEE Transactions", "CSE", "Dr. Smith", "2023", "Journal",
    ],
    unique_key: &[],
};

static INDUSTRY_COURSES: TemplateDefinition = TemplateDefinition {
    headers: &[
        "year_offered", "course_title", "department", "industry_partner", "is_active",
    ],
    sample: &["2023", "Cloud Computing", "CSE", "Google", "TRUE"],
    unique_key: &[],
};

static ACADEMIC_PROGRAM_LAUNCH: TemplateDefinition = TemplateDefinition {
    headers: &[
        "launch_year", "program_code", "program_name", "program_type", "department",
        "oelp_students",
    ],
    sample: &["2023", "DS_MTECH", "Data Science", "MTech", "CSE", "50"],
    unique_key: &["program_code"],
};

static PLACEMENT_SUMMARY: TemplateDefinition = TemplateDefinition {
    headers: &["placement_year", "program", "gender", "registered", "placed"],
    sample: &["2023", "UG", "Male", "120", "110"],
    unique_key: &["placement_year", "program", "gender"],
};

static PLACEMENT_COMPANIES: TemplateDefinition = TemplateDefinition {
    headers: &[
        "placement_year", "company_name", "sector", "offers", "hires", "is_top_recruiter",
    ],
    sample: &["2023", "Microsoft", "IT", "10", "8", "TRUE"],
    unique_key: &[],
};

static STARTUPS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "startup_name", "founder_name", "innovation_focus_area", "year_of_incubation", "status",
        "sector", "is_from_iitpkd",
    ],
    sample: &[
        "InnovateAI", "Jane Doe", "AI/ML", "2022", "Active", "DeepTech", "TRUE",
    ],
    unique_key: &["startup_name", "year_of_incubation"],
};

static INDUSTRY_CONCLAVE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "year", "theme", "focus_area", "number_of_companies", "description", "sessions_held",
        "key_speakers", "brochure_url", "event_photos_url",
    ],
    sample: &[
        "2023", "Industry 4.0", "Automation", "50", "Annual Conclave", "5", "Mr. X, Ms. Y", "",
        "",
    ],
    unique_key: &["year"],
};

static OPEN_HOUSE: TemplateDefinition = TemplateDefinition {
    headers: &[
        "event_year", "event_date", "theme", "target_audience", "departments_participated",
        "num_departments", "total_visitors", "key_highlights", "photos_url", "poster_url",
        "brochure_url",
    ],
    sample: &[
        "2023",
        "2023-10-15",
        "Science Day",
        "School Students",
        "\"CSE, ECE, ME\"",
        "3",
        "500",
        "Robot Demo",
        "https://example.com/photos",
        "https://example.com/poster.pdf",
        "https://example.com/brochure.pdf",
    ],
    unique_key: &["event_year", "event_date"],
};

static NPTEL_LOCAL_CHAPTERS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "chapter_name", "faculty_coordinator", "is_active", "established_year",
    ],
    sample: &["IIT Palakkad Chapter", "Dr. Smith", "TRUE", "2019"],
    unique_key: &["chapter_name"],
};

static NPTEL_COURSES: TemplateDefinition = TemplateDefinition {
    headers: &[
        "course_code", "course_title", "course_category", "offering_semester", "offering_year",
    ],
    sample: &["NPTEL123", "Data Structures", "Engineering", "Spring", "2023"],
    unique_key: &["course_code", "offering_year", "offering_semester"],
};

static NPTEL_ENROLLMENTS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "enrollment_year", "course_code", "student_name", "enrollment_semester",
        "certification_earned", "certification_date",
    ],
    sample: &[
        "2023", "NPTEL123", "John Doe", "Spring", "TRUE", "2023-05-20",
    ],
    unique_key: &[],
};

static UBA_PROJECTS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "project_title", "coordinator_name", "project_status", "start_date", "end_date",
        "intervention_description", "collaboration_partners",
    ],
    sample: &[
        "Water Conservation", "Dr. Green", "Ongoing", "2023-01-01", "",
        "Village pond restoration", "Panchayat",
    ],
    unique_key: &[],
};

static UBA_EVENTS: TemplateDefinition = TemplateDefinition {
    headers: &[
        "project_title", "event_title", "event_type", "event_date", "location", "description",
        "photos_url", "brochure_url",
    ],
    sample: &[
        "Water Conservation", "Awareness Camp", "Workshop", "2023-03-22", "Village Hall",
        "Community meeting", "", "",
    ],
    unique_key: &[],
};
