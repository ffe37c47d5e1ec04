//! Task model: the four task types, their typed requests, and the
//! template builder that turns a request into a prompt pair.
//!
//! Building a task is pure string construction. No external call happens
//! here; the built [`TaskSpec`] is handed to the execution boundary in
//! [`crate::agent`].

mod templates;

use crate::agent::render_template;
use crate::error::{DtwinError, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// The four supported task types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Personal introduction of the user.
    Introduce,
    /// Venture capital pitch for an idea or company.
    Pitch,
    /// Cold email to an investor requesting a meeting.
    ColdEmail,
    /// Report on recent acquisitions and market activity.
    SearchAcquisitions,
}

impl TaskKind {
    /// All task kinds, in the order they are documented.
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Introduce,
        TaskKind::Pitch,
        TaskKind::ColdEmail,
        TaskKind::SearchAcquisitions,
    ];

    /// The canonical tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Introduce => "introduce",
            TaskKind::Pitch => "pitch",
            TaskKind::ColdEmail => "cold_email",
            TaskKind::SearchAcquisitions => "search_acquisitions",
        }
    }

    /// One-line summary shown by `dtwin tasks`.
    pub fn summary(&self) -> &'static str {
        match self {
            TaskKind::Introduce => "Introduce the user in a compelling, professional way.",
            TaskKind::Pitch => "Create a venture capital pitch for an idea or company.",
            TaskKind::ColdEmail => "Draft a cold email to an investor requesting a meeting.",
            TaskKind::SearchAcquisitions => {
                "Report on recent acquisitions and market activity in areas of interest."
            }
        }
    }

    /// The optional parameters this kind accepts, as (name, default) pairs.
    pub fn parameters(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            TaskKind::Introduce => &[],
            TaskKind::Pitch => &[("idea_or_company", "my business idea")],
            TaskKind::ColdEmail => &[
                ("investor_name", "a potential investor"),
                ("context", "seeking business advice"),
            ],
            TaskKind::SearchAcquisitions => {
                &[("areas_of_interest", "technology and startups")]
            }
        }
    }

    /// An example invocation shown by `dtwin tasks`.
    pub fn example(&self) -> &'static str {
        match self {
            TaskKind::Introduce => "dtwin run introduce",
            TaskKind::Pitch => "dtwin run pitch --idea-or-company \"my AI startup\"",
            TaskKind::ColdEmail => {
                "dtwin run cold_email --investor-name \"John Smith\" --context \"seed round\""
            }
            TaskKind::SearchAcquisitions => {
                "dtwin run search_acquisitions --areas-of-interest \"fintech\""
            }
        }
    }
}

impl FromStr for TaskKind {
    type Err = DtwinError;

    /// Parse a task-type tag. Matching is case-insensitive and `-` is
    /// accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "introduce" => Ok(TaskKind::Introduce),
            "pitch" => Ok(TaskKind::Pitch),
            "cold_email" => Ok(TaskKind::ColdEmail),
            "search_acquisitions" => Ok(TaskKind::SearchAcquisitions),
            _ => Err(DtwinError::UnsupportedTaskType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional task parameters as collected from the command line.
///
/// Which fields matter depends on the task type; the rest are ignored.
#[derive(Debug, Clone, Default)]
pub struct TaskParams {
    pub idea_or_company: Option<String>,
    pub investor_name: Option<String>,
    pub context: Option<String>,
    pub areas_of_interest: Option<String>,
}

/// A fully-typed task request.
///
/// Each variant carries exactly the parameters its template uses. Missing
/// optional parameters resolve to fixed defaults at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRequest {
    Introduce,
    Pitch {
        idea_or_company: Option<String>,
    },
    ColdEmail {
        investor_name: Option<String>,
        context: Option<String>,
    },
    SearchAcquisitions {
        areas_of_interest: Option<String>,
    },
}

impl TaskRequest {
    /// Build a request from a raw tag and the parameter bag.
    ///
    /// Tag parsing is the first thing that happens on any run, so an
    /// unsupported type fails here, before any external call.
    pub fn from_args(tag: &str, params: &TaskParams) -> Result<Self> {
        let kind: TaskKind = tag.parse()?;
        Ok(Self::from_kind(kind, params))
    }

    /// Build a request for a known kind, keeping only the parameters the
    /// kind uses.
    pub fn from_kind(kind: TaskKind, params: &TaskParams) -> Self {
        match kind {
            TaskKind::Introduce => TaskRequest::Introduce,
            TaskKind::Pitch => TaskRequest::Pitch {
                idea_or_company: params.idea_or_company.clone(),
            },
            TaskKind::ColdEmail => TaskRequest::ColdEmail {
                investor_name: params.investor_name.clone(),
                context: params.context.clone(),
            },
            TaskKind::SearchAcquisitions => TaskRequest::SearchAcquisitions {
                areas_of_interest: params.areas_of_interest.clone(),
            },
        }
    }

    /// The kind of this request.
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::Introduce => TaskKind::Introduce,
            TaskRequest::Pitch { .. } => TaskKind::Pitch,
            TaskRequest::ColdEmail { .. } => TaskKind::ColdEmail,
            TaskRequest::SearchAcquisitions { .. } => TaskKind::SearchAcquisitions,
        }
    }

    /// Template variables provided by this request. Absent optional
    /// parameters are simply not inserted; the template fallbacks supply
    /// their defaults.
    fn template_vars(&self, today: NaiveDate) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(
            "current_date".to_string(),
            today.format("%Y-%m-%d").to_string(),
        );

        match self {
            TaskRequest::Introduce => {}
            TaskRequest::Pitch { idea_or_company } => {
                if let Some(value) = idea_or_company {
                    vars.insert("idea_or_company".to_string(), value.clone());
                }
            }
            TaskRequest::ColdEmail {
                investor_name,
                context,
            } => {
                if let Some(value) = investor_name {
                    vars.insert("investor_name".to_string(), value.clone());
                }
                if let Some(value) = context {
                    vars.insert("context".to_string(), value.clone());
                }
            }
            TaskRequest::SearchAcquisitions { areas_of_interest } => {
                if let Some(value) = areas_of_interest {
                    vars.insert("areas_of_interest".to_string(), value.clone());
                }
            }
        }

        vars
    }
}

/// The built prompt pair handed to the execution boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Full task description, with all parameters substituted.
    pub description: String,

    /// One-line statement of what a good result looks like.
    pub expected_output: String,
}

/// Build the task spec for a request.
///
/// Renders the kind's description template (a config override when one
/// exists for the tag, otherwise the builtin) with the request's
/// parameters, and pairs it with the kind's expected output. `today`
/// feeds the `{current_date}` variable, which every template may use.
pub fn build(
    request: &TaskRequest,
    overrides: &BTreeMap<String, String>,
    today: NaiveDate,
) -> Result<TaskSpec> {
    let kind = request.kind();
    let template = overrides
        .get(kind.as_str())
        .map(String::as_str)
        .unwrap_or_else(|| templates::description(kind));

    let vars = request.template_vars(today);
    let description = render_template(template, &vars).map_err(|e| {
        DtwinError::UserError(format!(
            "failed to render the '{}' task template: {}.\n\
             Fix: check the prompts section of your config; override templates \
             must carry a fallback for every optional parameter, e.g. \
             {{investor_name|a potential investor}}.",
            kind, e
        ))
    })?;

    Ok(TaskSpec {
        description,
        expected_output: templates::expected_output(kind).to_string(),
    })
}
