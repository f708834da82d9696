// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan model: weeks of days of exercises.
//!
//! Week status is derived: a week is `completed` only when every one of its
//! days is `completed`. It is recomputed whenever a day changes and after
//! a plan is generated.

use crate::models::lenient::{f64_from_any, string_from_any, strings_from_any, u32_from_any};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Completion status shared by days and weeks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PlanStatus {
    #[default]
    Pending,
    Completed,
}

impl PlanStatus {
    /// Parse a client-supplied status string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PlanStatus::Pending),
            "completed" => Some(PlanStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::Completed => "completed",
        }
    }
}

/// Deserialize a status, treating anything unknown as pending.
pub(crate) fn status_from_any<'de, D>(deserializer: D) -> Result<PlanStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = string_from_any(deserializer)?;
    Ok(PlanStatus::parse(&raw).unwrap_or_default())
}

/// A single exercise within a day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    pub name: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub instructions: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub description: String,
    #[serde(default, deserialize_with = "u32_from_any")]
    pub sets: u32,
    #[serde(default, deserialize_with = "u32_from_any")]
    pub reps: u32,
    /// Duration such as "30 sec"
    #[serde(default, deserialize_with = "string_from_any")]
    pub time: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub rest_time: String,
    /// Illustration URL, filled from the exercise catalog
    #[serde(default, deserialize_with = "string_from_any")]
    pub image: String,
    #[serde(default, deserialize_with = "strings_from_any")]
    pub equipment: Vec<String>,
    #[serde(default, deserialize_with = "strings_from_any")]
    pub muscle_group: Vec<String>,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub calories_burned: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutDay {
    #[serde(deserialize_with = "u32_from_any")]
    pub day: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, deserialize_with = "status_from_any")]
    pub status: PlanStatus,
}

impl WorkoutDay {
    pub fn calories(&self) -> f64 {
        self.exercises.iter().map(|e| e.calories_burned).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutWeek {
    #[serde(deserialize_with = "u32_from_any")]
    pub week: u32,
    #[serde(default)]
    pub days: Vec<WorkoutDay>,
    #[serde(default, deserialize_with = "status_from_any")]
    pub status: PlanStatus,
}

impl WorkoutWeek {
    /// Recompute the week status from its days.
    pub fn recompute_status(&mut self) -> PlanStatus {
        self.status = if self.days.iter().all(|d| d.status == PlanStatus::Completed) {
            PlanStatus::Completed
        } else {
            PlanStatus::Pending
        };
        self.status
    }
}

/// Body returned by the model for a workout prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratedWorkoutPlan {
    pub weeks: Vec<WorkoutWeek>,
}

impl GeneratedWorkoutPlan {
    /// Distinct exercise names in plan order.
    pub fn exercise_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for exercise in self.exercises() {
            if !names.iter().any(|n| n == &exercise.name) {
                names.push(exercise.name.clone());
            }
        }
        names
    }

    fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .flat_map(|d| d.exercises.iter())
    }

    /// Set every exercise's image from the catalog; unknown names get "".
    pub fn apply_images(&mut self, images: &HashMap<String, String>) {
        for week in &mut self.weeks {
            for day in &mut week.days {
                for exercise in &mut day.exercises {
                    exercise.image = images.get(&exercise.name).cloned().unwrap_or_default();
                }
            }
        }
    }

    /// Recompute all week statuses.
    pub fn normalize(&mut self) {
        for week in &mut self.weeks {
            week.recompute_status();
        }
    }
}

/// Stored workout plan (one per user).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    /// Owner's auth user ID (also used as document ID)
    pub user_id: String,
    #[serde(default)]
    pub weeks: Vec<WorkoutWeek>,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of a day status change.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusChange {
    pub week_number: u32,
    pub day_number: u32,
    pub day_status: PlanStatus,
    pub week_status: PlanStatus,
}

/// Why a status change could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusChangeError {
    #[error("Week not found in workout plan")]
    WeekNotFound,
    #[error("Day not found in week")]
    DayNotFound,
}

impl WorkoutPlan {
    /// Set the status of one day and recompute its week.
    pub fn set_day_status(
        &mut self,
        week_number: u32,
        day_number: u32,
        status: PlanStatus,
    ) -> Result<StatusChange, StatusChangeError> {
        let week = self
            .weeks
            .iter_mut()
            .find(|w| w.week == week_number)
            .ok_or(StatusChangeError::WeekNotFound)?;

        let day = week
            .days
            .iter_mut()
            .find(|d| d.day == day_number)
            .ok_or(StatusChangeError::DayNotFound)?;
        day.status = status;

        let week_status = week.recompute_status();

        Ok(StatusChange {
            week_number,
            day_number,
            day_status: status,
            week_status,
        })
    }

    /// Progress summary for the workout dashboard.
    pub fn progress(&self) -> WorkoutProgress {
        let mut progress = WorkoutProgress {
            total_weeks: self.weeks.len() as u32,
            ..Default::default()
        };

        for week in &self.weeks {
            if week.status == PlanStatus::Completed {
                progress.completed_weeks += 1;
            }
            for day in &week.days {
                let calories = day.calories();
                progress.total_days += 1;
                progress.planned_calories += calories;
                if day.status == PlanStatus::Completed {
                    progress.completed_days += 1;
                    progress.completed_calories += calories;
                } else if progress.current.is_none() {
                    progress.current = Some(DayRef {
                        week: week.week,
                        day: day.day,
                    });
                }
            }
        }

        if progress.total_days > 0 {
            progress.completion_percentage =
                round1(progress.completed_days as f64 * 100.0 / progress.total_days as f64);
        }

        progress
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Position of a day within a plan.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayRef {
    pub week: u32,
    pub day: u32,
}

/// Workout dashboard summary.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutProgress {
    pub total_weeks: u32,
    pub completed_weeks: u32,
    pub total_days: u32,
    pub completed_days: u32,
    /// Completed days as a percentage of all days, one decimal
    pub completion_percentage: f64,
    pub planned_calories: f64,
    pub completed_calories: f64,
    /// First day still pending, if any
    pub current: Option<DayRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32, status: PlanStatus, calories: f64) -> WorkoutDay {
        WorkoutDay {
            day: n,
            exercises: vec![Exercise {
                name: "Squats".to_string(),
                calories_burned: calories,
                ..Default::default()
            }],
            status,
        }
    }

    fn plan() -> WorkoutPlan {
        WorkoutPlan {
            user_id: "user_1".to_string(),
            weeks: vec![
                WorkoutWeek {
                    week: 1,
                    days: vec![
                        day(1, PlanStatus::Completed, 100.0),
                        day(2, PlanStatus::Pending, 150.0),
                    ],
                    status: PlanStatus::Pending,
                },
                WorkoutWeek {
                    week: 2,
                    days: vec![day(1, PlanStatus::Pending, 200.0)],
                    status: PlanStatus::Pending,
                },
            ],
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_completing_last_day_completes_week() {
        let mut plan = plan();
        let change = plan.set_day_status(1, 2, PlanStatus::Completed).unwrap();
        assert_eq!(change.day_status, PlanStatus::Completed);
        assert_eq!(change.week_status, PlanStatus::Completed);
        assert_eq!(plan.weeks[0].status, PlanStatus::Completed);
        assert_eq!(plan.weeks[1].status, PlanStatus::Pending);
    }

    #[test]
    fn test_reopening_day_reopens_week() {
        let mut plan = plan();
        plan.set_day_status(1, 2, PlanStatus::Completed).unwrap();
        let change = plan.set_day_status(1, 1, PlanStatus::Pending).unwrap();
        assert_eq!(change.week_status, PlanStatus::Pending);
        assert_eq!(plan.weeks[0].days[0].status, PlanStatus::Pending);
    }

    #[test]
    fn test_missing_week_or_day() {
        let mut plan = plan();
        assert_eq!(
            plan.set_day_status(9, 1, PlanStatus::Completed),
            Err(StatusChangeError::WeekNotFound)
        );
        assert_eq!(
            plan.set_day_status(2, 5, PlanStatus::Completed),
            Err(StatusChangeError::DayNotFound)
        );
        assert_eq!(plan, self::plan());
    }

    #[test]
    fn test_empty_week_is_completed() {
        let mut week = WorkoutWeek {
            week: 1,
            days: vec![],
            status: PlanStatus::Pending,
        };
        assert_eq!(week.recompute_status(), PlanStatus::Completed);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(PlanStatus::parse("completed"), Some(PlanStatus::Completed));
        assert_eq!(PlanStatus::parse("pending"), Some(PlanStatus::Pending));
        assert_eq!(PlanStatus::parse("in-progress"), None);
        assert_eq!(PlanStatus::parse("Completed"), None);
    }

    #[test]
    fn test_progress() {
        let progress = plan().progress();
        assert_eq!(progress.total_weeks, 2);
        assert_eq!(progress.completed_weeks, 0);
        assert_eq!(progress.total_days, 3);
        assert_eq!(progress.completed_days, 1);
        assert_eq!(progress.completion_percentage, 33.3);
        assert_eq!(progress.planned_calories, 450.0);
        assert_eq!(progress.completed_calories, 100.0);
        assert_eq!(progress.current, Some(DayRef { week: 1, day: 2 }));
    }

    #[test]
    fn test_progress_empty_plan() {
        let mut plan = plan();
        plan.weeks.clear();
        let progress = plan.progress();
        assert_eq!(progress.completion_percentage, 0.0);
        assert_eq!(progress.current, None);
    }

    #[test]
    fn test_generated_plan_images_and_names() {
        let mut generated: GeneratedWorkoutPlan = serde_json::from_value(serde_json::json!({
            "weeks": [{
                "week": 1,
                "days": [{
                    "day": 1,
                    "exercises": [
                        {"name": "Squats", "sets": 3, "reps": "12", "image": "x"},
                        {"name": "Made Up Move", "sets": 2},
                        {"name": "Squats", "sets": 3}
                    ],
                    "status": "pending"
                }],
                "status": "completed"
            }]
        }))
        .unwrap();

        assert_eq!(generated.exercise_names(), vec!["Squats", "Made Up Move"]);

        let images = HashMap::from([("Squats".to_string(), "https://img/squats.png".to_string())]);
        generated.apply_images(&images);
        generated.normalize();

        let exercises = &generated.weeks[0].days[0].exercises;
        assert_eq!(exercises[0].image, "https://img/squats.png");
        assert_eq!(exercises[0].reps, 12);
        assert_eq!(exercises[1].image, "");
        assert_eq!(generated.weeks[0].status, PlanStatus::Pending);
    }

    #[test]
    fn test_unknown_status_reads_as_pending() {
        let day: WorkoutDay =
            serde_json::from_str(r#"{"day": 1, "status": "in-progress"}"#).unwrap();
        assert_eq!(day.status, PlanStatus::Pending);
    }
}
