use serde::{Deserialize, Serialize};

use crate::value_objects::enums::task_priorities::TaskPriority;

/// One task as submitted by the client for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInputModel {
    pub description: String,
    pub time: String,
    #[serde(default)]
    pub is_done: bool,
}

/// Request body of the generation endpoint. Fields stay optional so that a
/// missing field is reported by the use case as a 400, not a serde rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequestModel {
    pub tasks: Option<Vec<TaskInputModel>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskModel {
    pub description: String,
    pub start_time: String,
    pub duration: f64,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleResponseModel {
    pub schedule: Vec<ScheduledTaskModel>,
}

/// The two instruction strings sent to the completion API.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePrompt {
    pub system: String,
    pub user: String,
}

/// Outcome of the persistence transaction that follows a successful
/// generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationPersistOutcome {
    Recorded { charged: bool },
    CreditsExhausted,
}

pub fn pending_tasks(tasks: &[TaskInputModel]) -> Vec<&TaskInputModel> {
    tasks.iter().filter(|task| !task.is_done).collect()
}

/// Renders the fixed system instruction and the user instruction for the
/// given tasks and working-hours window. Done tasks are excluded. Total:
/// an empty task list yields a degenerate prompt, never an error.
pub fn build_schedule_prompt(
    tasks: &[TaskInputModel],
    start_time: &str,
    end_time: &str,
) -> SchedulePrompt {
    let task_descriptions = pending_tasks(tasks)
        .iter()
        .map(|task| format!("{} ({} hours)", task.description, task.time))
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are a helpful daily task scheduler. Given a list of tasks with estimated \
                  durations and working hours, create an optimal schedule that prioritizes tasks \
                  effectively."
        .to_string();

    let user = format!(
        "Please schedule these tasks between {start_time} and {end_time}:\n\n\
         {task_descriptions}\n\n\
         Create a realistic schedule considering:\n\
         - Task priorities and dependencies\n\
         - Short breaks between tasks\n\
         - Logical task ordering\n\
         - Available time constraints"
    );

    SchedulePrompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str, time: &str, is_done: bool) -> TaskInputModel {
        TaskInputModel {
            description: description.to_string(),
            time: time.to_string(),
            is_done,
        }
    }

    #[test]
    fn prompt_excludes_done_tasks() {
        let tasks = vec![task("Write report", "2", false), task("Email client", "1", true)];

        let prompt = build_schedule_prompt(&tasks, "09:00", "17:00");

        assert!(prompt.user.contains("Write report (2 hours)"));
        assert!(!prompt.user.contains("Email client"));
    }

    #[test]
    fn prompt_interpolates_working_hours() {
        let tasks = vec![task("Write report", "2", false)];

        let prompt = build_schedule_prompt(&tasks, "08:30", "16:30");

        assert!(prompt.user.contains("between 08:30 and 16:30"));
        assert!(prompt.system.contains("daily task scheduler"));
    }

    #[test]
    fn pending_tasks_filters_done() {
        let tasks = vec![
            task("a", "1", false),
            task("b", "1", true),
            task("c", "3", false),
        ];

        let pending = pending_tasks(&tasks);

        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|task| !task.is_done));
    }

    #[test]
    fn empty_task_list_yields_degenerate_prompt() {
        let prompt = build_schedule_prompt(&[], "09:00", "17:00");

        assert!(prompt.user.contains("between 09:00 and 17:00"));
    }

    #[test]
    fn scheduled_task_uses_camel_case_wire_names() {
        let entry = ScheduledTaskModel {
            description: "Write report".to_string(),
            start_time: "09:00".to_string(),
            duration: 2.0,
            priority: TaskPriority::High,
            subtasks: None,
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["priority"], "high");
        assert!(json.get("subtasks").is_none());
    }

    #[test]
    fn schedule_request_tolerates_missing_fields() {
        let request: ScheduleRequestModel = serde_json::from_str("{}").unwrap();

        assert!(request.tasks.is_none());
        assert!(request.start_time.is_none());
        assert!(request.end_time.is_none());
    }
}
