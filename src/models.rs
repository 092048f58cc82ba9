use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One enrolled learner. This is the canonical row shape of the `students`
/// table; the narrower stats view the app renders is `StudentSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub code: String,
    pub sessions: i32,
    pub scores: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Projection of a `Student` down to what the dashboard stat cards show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub age: i32,
    pub sessions_completed: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        let average_score = if student.scores.is_empty() {
            None
        } else {
            let mean = student.scores.iter().sum::<f64>() / student.scores.len() as f64;
            Some(mean.round())
        };
        Self {
            id: student.id,
            name: student.name.clone(),
            code: student.code.clone(),
            age: student.age,
            sessions_completed: student.sessions,
            average_score,
        }
    }
}

/// What a front end holds between a successful login and sign-out. Owns the
/// resolved student; never persisted anywhere.
#[derive(Debug, Clone)]
pub struct Session {
    pub student: Student,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn begin(student: Student) -> Self {
        Self {
            student,
            started_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary::from(&self.student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: Uuid::from_u128(7),
            name: "Jane Roe".to_string(),
            age: 17,
            code: "271".to_string(),
            sessions: 9,
            scores: vec![82.0, 88.0],
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn summary_projects_the_narrow_shape() {
        let student = sample_student();
        let summary = StudentSummary::from(&student);
        assert_eq!(summary.code, "271");
        assert_eq!(summary.name, "Jane Roe");
        assert_eq!(summary.age, 17);
        assert_eq!(summary.sessions_completed, 9);
    }

    #[test]
    fn average_score_is_the_rounded_mean() {
        let mut student = sample_student();
        assert_eq!(StudentSummary::from(&student).average_score, Some(85.0));

        student.scores = vec![70.0, 80.0, 84.0];
        assert_eq!(StudentSummary::from(&student).average_score, Some(78.0));

        student.scores.clear();
        assert_eq!(StudentSummary::from(&student).average_score, None);
    }

    #[test]
    fn session_carries_the_resolved_student() {
        let session = Session::begin(sample_student());
        assert_eq!(session.student.code, "271");
        assert_eq!(session.summary().sessions_completed, 9);
    }

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let mut student = sample_student();
        let value = serde_json::to_value(&student).unwrap();
        assert!(value.get("notes").is_none());
        assert!(value.get("created_at").is_none());

        student.notes = Some("prefers morning sessions".to_string());
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["notes"], "prefers morning sessions");
    }
}
