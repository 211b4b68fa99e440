use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::calc;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeStatus {
    Pass,
    Fail,
}

impl GradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GradeStatus::Pass => "pass",
            GradeStatus::Fail => "fail",
        }
    }

    fn label(self) -> &'static str {
        match self {
            GradeStatus::Pass => "Pass",
            GradeStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A student with per-subject scores.
///
/// Fields are private so every mutation goes through validation: id, name and
/// class are never blank and every score is finite and within `0..=100`.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: String,
    name: String,
    class: String,
    grades: BTreeMap<String, f64>,
}

impl Student {
    pub fn new(id: &str, name: &str, class: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: required("student id", id)?,
            name: required("student name", name)?,
            class: required("student class", class)?,
            grades: BTreeMap::new(),
        })
    }

    /// Builds a student and applies each initial grade through [`Student::add_grade`].
    pub fn with_grades<I, S>(
        id: &str,
        name: &str,
        class: &str,
        grades: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut student = Self::new(id, name, class)?;
        for (subject, score) in grades {
            student.add_grade(subject.as_ref(), score)?;
        }
        Ok(student)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = required("student name", name)?;
        Ok(())
    }

    pub fn set_class(&mut self, class: &str) -> Result<(), ValidationError> {
        self.class = required("student class", class)?;
        Ok(())
    }

    /// Inserts or overwrites the score for `subject`.
    pub fn add_grade(&mut self, subject: &str, score: f64) -> Result<(), ValidationError> {
        let subject = required("subject", subject)?;
        let score = validate_score(score)?;
        self.grades.insert(subject, score);
        Ok(())
    }

    pub fn average(&self) -> f64 {
        calc::mean_2_decimals(self.grades.values().copied())
    }

    pub fn grade_status(&self) -> GradeStatus {
        if calc::is_passing(self.average()) {
            GradeStatus::Pass
        } else {
            GradeStatus::Fail
        }
    }

    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            class: self.class.clone(),
            grades: self.grades.clone(),
        }
    }

    /// Rebuilds a student from its snapshot form, re-running all validation.
    pub fn from_record(record: StudentRecord) -> Result<Self, ValidationError> {
        Self::with_grades(&record.id, &record.name, &record.class, record.grades)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Class: {}", self.class)?;
        writeln!(f, "Subjects:")?;
        if self.grades.is_empty() {
            writeln!(f, "  (no grades yet)")?;
        }
        for (subject, score) in &self.grades {
            writeln!(f, "  - {subject}: {score}")?;
        }
        writeln!(f, "Average: {}", self.average())?;
        writeln!(f, "Status: {}", self.grade_status())?;
        write!(f, "------------------------")
    }
}

/// Parses a score typed by the operator.
pub fn parse_score(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::ScoreNotNumeric(trimmed.to_string()))?;
    validate_score(value)
}

fn validate_score(score: f64) -> Result<f64, ValidationError> {
    if !score.is_finite() {
        return Err(ValidationError::ScoreNotNumeric(score.to_string()));
    }
    if !(0.0..=100.0).contains(&score) {
        return Err(ValidationError::ScoreOutOfRange(score));
    }
    Ok(score)
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Snapshot shape of a single student: `{id, name, class, grades}`.
///
/// Decoding is lenient the same way older snapshots were written: a numeric
/// `id` is stringified, a missing `grades` is empty and a score may be a
/// numeric string. Range and blank checks happen in [`Student::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub class: String,
    #[serde(default, deserialize_with = "lenient_scores")]
    pub grades: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Lenient::deserialize(deserializer)? {
        Lenient::Text(s) => Ok(s),
        Lenient::Number(n) => Ok(n.to_string()),
    }
}

fn lenient_scores<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Lenient>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(subject, value)| match value {
            Lenient::Number(n) => Ok((subject, n)),
            Lenient::Text(t) => match t.trim().parse::<f64>() {
                Ok(n) => Ok((subject, n)),
                Err(_) => Err(D::Error::custom(format!(
                    "score for {subject:?} is not numeric: {t:?}"
                ))),
            },
        })
        .collect()
}
