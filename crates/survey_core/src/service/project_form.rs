//! Two-step new-project form.
//!
//! # Responsibility
//! - Hold the transient input of a project being created: location first,
//!   then descriptive details.
//! - Turn complete input into a `NewProject` draft for the store.
//!
//! # Invariants
//! - The details step is reachable only once a position is selected.
//! - `build()` never yields a draft missing name, description, start date or
//!   position.
//! - Boundary vertices are validated when added, not at submission.

use crate::geo::boundary::BoundaryEditor;
use crate::geo::coordinate::{validate_coordinate, Coordinate, CoordinateError};
use crate::model::project::{CulturalPeriod, NewProject, SiteType};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    Location,
    Details,
}

/// Form submission error.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectFormError {
    /// No representative point selected yet.
    MissingPosition,
    /// A required text field is blank.
    MissingField(&'static str),
    /// A date field is not `YYYY-MM-DD`.
    InvalidDate { field: &'static str, input: String },
    /// Team size is not a positive whole number.
    InvalidTeamSize(String),
    Coordinate(CoordinateError),
}

impl Display for ProjectFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPosition => write!(f, "project location has not been selected"),
            Self::MissingField(field) => write!(f, "required field is empty: {field}"),
            Self::InvalidDate { field, input } => {
                write!(f, "invalid date for {field}: `{input}` (expected YYYY-MM-DD)")
            }
            Self::InvalidTeamSize(input) => {
                write!(f, "team size must be a positive whole number, got `{input}`")
            }
            Self::Coordinate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectFormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Coordinate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoordinateError> for ProjectFormError {
    fn from(value: CoordinateError) -> Self {
        Self::Coordinate(value)
    }
}

/// Transient state of the new-project wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    step: FormStep,
    position: Option<Coordinate>,
    boundary: BoundaryEditor,
    pub name: String,
    pub description: String,
    pub location: String,
    /// Raw `YYYY-MM-DD` input.
    pub start_date: String,
    /// Raw `YYYY-MM-DD` input; blank means no end date.
    pub expected_end_date: String,
    pub site_type: Option<SiteType>,
    pub cultural_period: Option<CulturalPeriod>,
    /// Blank means no permit recorded.
    pub permit_number: String,
    /// Raw numeric input; blank means unknown.
    pub team_size: String,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    /// Sets the position from typed latitude/longitude.
    ///
    /// On error the previous position is kept.
    pub fn go_to_location(&mut self, lat: &str, lng: &str) -> Result<Coordinate, CoordinateError> {
        let coordinate = validate_coordinate(lat, lng)?;
        self.position = Some(coordinate);
        Ok(coordinate)
    }

    /// Sets the position from a raw map click.
    pub fn select_position(&mut self, lat: f64, lng: f64) -> Result<Coordinate, CoordinateError> {
        let coordinate = Coordinate::new(lat, lng)?;
        self.position = Some(coordinate);
        Ok(coordinate)
    }

    pub fn boundary(&self) -> &BoundaryEditor {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut BoundaryEditor {
        &mut self.boundary
    }

    pub fn can_proceed(&self) -> bool {
        self.position.is_some()
    }

    /// Moves from the location step to the details step.
    pub fn next_step(&mut self) -> Result<(), ProjectFormError> {
        if !self.can_proceed() {
            return Err(ProjectFormError::MissingPosition);
        }
        self.step = FormStep::Details;
        Ok(())
    }

    /// Returns to the location step; entered details are kept.
    pub fn previous_step(&mut self) {
        self.step = FormStep::Location;
    }

    /// Whether the required detail fields are filled in.
    pub fn can_submit(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Builds the creation draft.
    ///
    /// # Errors
    /// - `MissingPosition` when no location was selected.
    /// - `MissingField` naming the first blank required field.
    /// - `InvalidDate` when a date does not parse.
    /// - `InvalidTeamSize` when a non-blank team size is not a positive integer.
    pub fn build(&self) -> Result<NewProject, ProjectFormError> {
        let position = self.position.ok_or(ProjectFormError::MissingPosition)?;
        if let Some(field) = self.missing_field() {
            return Err(ProjectFormError::MissingField(field));
        }

        let start_date = parse_date("start_date", &self.start_date)?;
        let expected_end_date = match self.expected_end_date.trim() {
            "" => None,
            value => Some(parse_date("expected_end_date", value)?),
        };
        let team_size = match self.team_size.trim() {
            "" => None,
            value => Some(parse_team_size(value)?),
        };
        let permit_number = Some(self.permit_number.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let mut draft = NewProject::new(
            self.name.trim(),
            self.description.trim(),
            start_date,
            position,
        );
        draft.location = self.location.trim().to_string();
        draft.expected_end_date = expected_end_date;
        draft.site_type = self.site_type;
        draft.cultural_period = self.cultural_period;
        draft.permit_number = permit_number;
        draft.team_size = team_size;
        draft.boundary = self.boundary.points().to_vec();
        Ok(draft)
    }

    fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("start_date", &self.start_date),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

fn parse_date(field: &'static str, input: &str) -> Result<NaiveDate, ProjectFormError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        ProjectFormError::InvalidDate {
            field,
            input: input.trim().to_string(),
        }
    })
}

fn parse_team_size(input: &str) -> Result<u32, ProjectFormError> {
    input
        .parse::<u32>()
        .ok()
        .filter(|size| *size >= 1)
        .ok_or_else(|| ProjectFormError::InvalidTeamSize(input.to_string()))
}
