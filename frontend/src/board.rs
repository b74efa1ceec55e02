//! 看板与统计的客户端派生数据

use promanager_shared::{Project, Task, TaskStatus};

/// 某一列（状态）下的任务，保持原有顺序
pub fn column_tasks(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.status == status)
        .cloned()
        .collect()
}

/// 列表渲染用的键：状态变化时卡片整体重建，控件回到服务端的状态
pub fn card_key(task: &Task) -> (u64, TaskStatus) {
    (task.id, task.status)
}

/// 选择框选中的值对应的目标状态；未变化或无法识别时为 `None`
pub fn requested_status(current: TaskStatus, value: &str) -> Option<TaskStatus> {
    TaskStatus::parse(value).filter(|next| *next != current)
}

/// 任务计数摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(
            Self {
                total: tasks.len(),
                ..Self::default()
            },
            |mut summary, task| {
                match task.status {
                    TaskStatus::Todo => summary.todo += 1,
                    TaskStatus::InProgress => summary.in_progress += 1,
                    TaskStatus::Done => summary.done += 1,
                }
                summary
            },
        )
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }
}

/// 所有项目的任务数之和（管理端总览）
pub fn total_task_count(projects: &[Project]) -> u64 {
    projects.iter().map(|p| u64::from(p.task_count)).sum()
}

/// 任务卡片上的快捷操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAction {
    pub label: &'static str,
    pub target: TaskStatus,
}

/// "Start" 仅对待办任务可用；"Mark done" 对所有未完成任务可用
pub fn next_actions(status: TaskStatus) -> Vec<TaskAction> {
    let mut actions = Vec::with_capacity(2);
    if status == TaskStatus::Todo {
        actions.push(TaskAction {
            label: "Start",
            target: TaskStatus::InProgress,
        });
    }
    if status != TaskStatus::Done {
        actions.push(TaskAction {
            label: "Mark done",
            target: TaskStatus::Done,
        });
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            project_id: Some(1),
            project_title: None,
            assigned_user_id: None,
            assigned_user_name: None,
            assigned_user_email: None,
            assigned_user_role: None,
            status,
            due_date: None,
        }
    }

    #[test]
    fn test_each_task_lands_in_exactly_one_column() {
        let tasks = vec![
            task(1, TaskStatus::Todo),
            task(2, TaskStatus::Done),
            task(3, TaskStatus::InProgress),
            task(4, TaskStatus::Todo),
        ];

        let ids = |status| -> Vec<u64> { column_tasks(&tasks, status).iter().map(|t| t.id).collect() };
        assert_eq!(ids(TaskStatus::Todo), vec![1, 4]);
        assert_eq!(ids(TaskStatus::InProgress), vec![3]);
        assert_eq!(ids(TaskStatus::Done), vec![2]);

        let placed: usize = TaskStatus::ALL
            .into_iter()
            .map(|status| column_tasks(&tasks, status).len())
            .sum();
        assert_eq!(placed, tasks.len());
    }

    #[test]
    fn test_status_change_moves_task_between_columns() {
        let mut tasks = vec![task(1, TaskStatus::Todo), task(2, TaskStatus::Todo)];
        tasks[0].status = TaskStatus::InProgress;

        assert!(column_tasks(&tasks, TaskStatus::Todo).iter().all(|t| t.id != 1));
        assert_eq!(column_tasks(&tasks, TaskStatus::InProgress)[0].id, 1);
    }

    #[test]
    fn test_card_key_follows_server_status() {
        let before = task(7, TaskStatus::Todo);
        let mut after = before.clone();
        assert_eq!(card_key(&before), card_key(&after));

        // 服务端状态变化后键不同，卡片及其选择框会重建
        after.status = TaskStatus::InProgress;
        assert_ne!(card_key(&before), card_key(&after));
        assert_eq!(card_key(&after), (7, TaskStatus::InProgress));
    }

    #[test]
    fn test_requested_status() {
        assert_eq!(
            requested_status(TaskStatus::Todo, "IN_PROGRESS"),
            Some(TaskStatus::InProgress)
        );
        assert_eq!(requested_status(TaskStatus::Done, "DONE"), None);
        assert_eq!(requested_status(TaskStatus::Todo, "ARCHIVED"), None);
    }

    #[test]
    fn test_summary_counts() {
        let tasks = vec![
            task(1, TaskStatus::Todo),
            task(2, TaskStatus::InProgress),
            task(3, TaskStatus::Done),
            task(4, TaskStatus::Done),
        ];
        let summary = TaskSummary::from_tasks(&tasks);
        assert_eq!(
            summary,
            TaskSummary {
                total: 4,
                todo: 1,
                in_progress: 1,
                done: 2,
            }
        );
        assert_eq!(summary.count(TaskStatus::Done), 2);
        assert_eq!(summary.count(TaskStatus::InProgress), 1);
        assert_eq!(TaskSummary::from_tasks(&[]), TaskSummary::default());
    }

    #[test]
    fn test_total_task_count() {
        let project = |id, task_count| Project {
            id,
            title: format!("P{}", id),
            description: None,
            owner_name: None,
            task_count,
        };
        assert_eq!(total_task_count(&[project(1, 3), project(2, 4)]), 7);
        assert_eq!(total_task_count(&[]), 0);
    }

    #[test]
    fn test_next_actions() {
        let labels = |status| -> Vec<&'static str> { next_actions(status).iter().map(|a| a.label).collect() };
        assert_eq!(labels(TaskStatus::Todo), vec!["Start", "Mark done"]);
        assert_eq!(labels(TaskStatus::InProgress), vec!["Mark done"]);
        assert!(next_actions(TaskStatus::Done).is_empty());
        assert_eq!(next_actions(TaskStatus::Todo)[0].target, TaskStatus::InProgress);
    }
}
