//! Per-course learning analytics.
//!
//! The report is computed in two steps: [`CourseAnalyticsService::load_snapshot`]
//! reads enrollment, assignment and submission rows for one course, and
//! [`aggregate`] folds that snapshot into a [`CourseOverview`]. `aggregate` is
//! pure and takes `now` explicitly, so the same snapshot always yields the
//! same report.

use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use db::models::{
    assignment,
    course::Entity as CourseEntity,
    course_selection,
    submission::{self, SubmissionStatus},
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Scores below this mark a difficult assignment or an at-risk student.
pub const PASSING_SCORE: f64 = 60.0;
/// Course average at or above which the performance is called excellent.
pub const EXCELLENT_AVERAGE: f64 = 90.0;
/// Course average below which follow-up tutoring is suggested.
pub const WEAK_AVERAGE: f64 = 65.0;

pub const NO_ASSIGNMENTS_INSIGHT: &str =
    "No assignments have been created for this course yet, so there is nothing to analyse.";
pub const NO_ENROLLMENT_INSIGHT: &str =
    "No students are enrolled in this course yet, so no analytics are available.";
pub const EXCELLENT_INSIGHT: &str =
    "Overall scores are excellent; consider offering more advanced material.";
pub const WEAK_INSIGHT: &str =
    "Overall scores are below expectations; consider scheduling follow-up tutoring.";

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSnapshot {
    pub id: i64,
    pub title: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl AssignmentSnapshot {
    fn display_title(&self) -> String {
        if self.title.is_empty() {
            format!("Assignment-{}", self.id)
        } else {
            self.title.clone()
        }
    }
}

impl From<&assignment::Model> for AssignmentSnapshot {
    fn from(model: &assignment::Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            deadline: model.deadline,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSnapshot {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    pub score: Option<i32>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SubmissionSnapshot {
    /// First of submitted-at, updated-at, created-at that is set.
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at.or(self.updated_at).or(self.created_at)
    }
}

impl From<&submission::Model> for SubmissionSnapshot {
    fn from(model: &submission::Model) -> Self {
        Self {
            id: model.id,
            assignment_id: model.assignment_id,
            student_id: model.student_id,
            status: model.status,
            score: model.score,
            submitted_at: model.submitted_at,
            updated_at: Some(model.updated_at),
            created_at: Some(model.created_at),
        }
    }
}

/// Everything the aggregator reads for one course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseSnapshot {
    /// Actively enrolled students in enrollment order.
    pub enrolled_student_ids: Vec<i64>,
    /// Assignments in course order.
    pub assignments: Vec<AssignmentSnapshot>,
    pub submissions: Vec<SubmissionSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    pub completion_rate: f64,
    pub average_score: Option<f64>,
    pub median_score: Option<f64>,
    pub enrolled_students: usize,
    pub total_assignments: usize,
    pub graded_submissions: usize,
    pub pending_submissions: usize,
    pub overdue_students: Vec<String>,
    pub difficult_assignments: Vec<String>,
    pub at_risk_students: Vec<String>,
    pub insights: Vec<String>,
}

impl CourseOverview {
    fn degenerate(enrolled: usize, assignments: usize, insight: &str) -> Self {
        Self {
            enrolled_students: enrolled,
            total_assignments: assignments,
            insights: vec![insight.to_string()],
            ..Default::default()
        }
    }
}

/// Picks the most recent submission by resolved timestamp.
///
/// A candidate without any timestamp never replaces the current pick, a
/// timestamped candidate always replaces an untimestamped pick, and ties keep
/// the earlier pick.
pub fn select_latest<'a, I>(submissions: I) -> Option<&'a SubmissionSnapshot>
where
    I: IntoIterator<Item = &'a SubmissionSnapshot>,
{
    submissions.into_iter().fold(None, |latest, candidate| match latest {
        None => Some(candidate),
        Some(current) => match (candidate.resolved_at(), current.resolved_at()) {
            (None, _) => Some(current),
            (Some(_), None) => Some(candidate),
            (Some(cand), Some(cur)) if cand > cur => Some(candidate),
            _ => Some(current),
        },
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn median(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let mid = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    Some(round2(mid))
}

#[derive(Debug, Default, Clone, Copy)]
struct ScoreStats {
    sum: f64,
    count: usize,
}

impl ScoreStats {
    fn accept(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    /// Students without any score count as averaging 0.
    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Builds the course report from a snapshot.
///
/// Pending counts include enrolled students with no submission once the
/// deadline has passed, but not before; graded + pending is therefore not
/// the number of submissions.
pub fn aggregate(snapshot: &CourseSnapshot, now: DateTime<Utc>) -> CourseOverview {
    let enrolled = &snapshot.enrolled_student_ids;
    let total_assignments = snapshot.assignments.len();

    if snapshot.assignments.is_empty() {
        return CourseOverview::degenerate(enrolled.len(), 0, NO_ASSIGNMENTS_INSIGHT);
    }
    if enrolled.is_empty() {
        return CourseOverview::degenerate(0, total_assignments, NO_ENROLLMENT_INSIGHT);
    }

    let mut graded = 0usize;
    let mut pending = 0usize;
    let mut all_scores: Vec<f64> = Vec::new();
    let mut difficult: Vec<String> = Vec::new();
    let mut overdue: Vec<i64> = Vec::new();
    let mut overdue_seen: HashSet<i64> = HashSet::new();
    let mut stats_by_student: HashMap<i64, ScoreStats> = HashMap::new();
    let mut missing_by_student: HashMap<i64, usize> = HashMap::new();

    let mut mark_overdue = |student_id: i64| {
        if overdue_seen.insert(student_id) {
            overdue.push(student_id);
        }
    };

    for assignment in &snapshot.assignments {
        let mut by_student: HashMap<i64, Vec<&SubmissionSnapshot>> = HashMap::new();
        for sub in snapshot
            .submissions
            .iter()
            .filter(|s| s.assignment_id == assignment.id)
        {
            by_student.entry(sub.student_id).or_default().push(sub);
        }

        let mut assignment_stats = ScoreStats::default();

        for &student_id in enrolled {
            let latest = by_student
                .get(&student_id)
                .and_then(|subs| select_latest(subs.iter().copied()));

            match latest {
                Some(sub) => {
                    if sub.status == SubmissionStatus::Graded {
                        graded += 1;
                    } else {
                        pending += 1;
                    }

                    if let Some(score) = sub.score {
                        let score = f64::from(score);
                        stats_by_student.entry(student_id).or_default().accept(score);
                        assignment_stats.accept(score);
                        all_scores.push(score);
                    }

                    if let Some(deadline) = assignment.deadline {
                        if sub.submitted_at.is_none_or(|at| at > deadline) {
                            mark_overdue(student_id);
                        }
                    }
                }
                None => {
                    *missing_by_student.entry(student_id).or_default() += 1;
                    if assignment.deadline.is_some_and(|d| d < now) {
                        mark_overdue(student_id);
                        pending += 1;
                    }
                }
            }
        }

        let is_difficult = if assignment_stats.count > 0 {
            assignment_stats.average() < PASSING_SCORE
        } else {
            assignment.deadline.is_some_and(|d| d < now)
        };
        if is_difficult {
            difficult.push(assignment.display_title());
        }
    }

    let missing_threshold = std::cmp::max(1, total_assignments / 3);
    let at_risk: Vec<i64> = enrolled
        .iter()
        .copied()
        .filter(|id| {
            let average = stats_by_student
                .get(id)
                .map(ScoreStats::average)
                .unwrap_or(0.0);
            let missing = missing_by_student.get(id).copied().unwrap_or(0);
            average < PASSING_SCORE || missing > missing_threshold
        })
        .collect();

    let completion_rate = round2(graded as f64 / (enrolled.len() * total_assignments) as f64);

    let average = (!all_scores.is_empty()).then(|| mean(&all_scores));

    let mut insights = Vec::new();
    if let Some(avg) = average {
        if avg >= EXCELLENT_AVERAGE {
            insights.push(EXCELLENT_INSIGHT.to_string());
        } else if avg < WEAK_AVERAGE {
            insights.push(WEAK_INSIGHT.to_string());
        }
    }
    if !overdue.is_empty() {
        insights.push(format!(
            "{} student(s) have overdue or late submissions; consider sending reminders.",
            overdue.len()
        ));
    }
    if !difficult.is_empty() {
        insights.push(format!(
            "Consider reviewing these difficult assignments: {}",
            difficult.join(", ")
        ));
    }
    if !at_risk.is_empty() {
        insights.push(format!(
            "{} student(s) are academically at risk.",
            at_risk.len()
        ));
    }

    CourseOverview {
        completion_rate,
        average_score: average.map(round2),
        median_score: median(&all_scores),
        enrolled_students: enrolled.len(),
        total_assignments,
        graded_submissions: graded,
        pending_submissions: pending,
        overdue_students: overdue.iter().map(i64::to_string).collect(),
        difficult_assignments: difficult,
        at_risk_students: at_risk.iter().map(i64::to_string).collect(),
        insights,
    }
}

pub struct CourseAnalyticsService;

impl CourseAnalyticsService {
    /// Reads the rows the aggregator needs. Fails with `NotFound` for an unknown course.
    pub async fn load_snapshot(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<CourseSnapshot, ServiceError> {
        let course = CourseEntity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found"))?;

        let enrolled_student_ids =
            course_selection::Model::enrolled_student_ids(db, course.id).await?;
        let assignments = assignment::Model::find_by_course(db, course.id).await?;
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = submission::Model::find_by_assignments(db, &assignment_ids).await?;

        Ok(CourseSnapshot {
            enrolled_student_ids,
            assignments: assignments.iter().map(AssignmentSnapshot::from).collect(),
            submissions: submissions.iter().map(SubmissionSnapshot::from).collect(),
        })
    }

    pub async fn course_overview(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<CourseOverview, ServiceError> {
        let snapshot = Self::load_snapshot(db, course_id).await?;
        let overview = aggregate(&snapshot, Utc::now());

        tracing::debug!(
            course_id,
            enrolled = overview.enrolled_students,
            assignments = overview.total_assignments,
            graded = overview.graded_submissions,
            "Computed course analytics"
        );

        Ok(overview)
    }
}
