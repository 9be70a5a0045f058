use std::fmt;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoreTask {
    RoleCheck,
    MonitorTags,
}

impl ChoreTask {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoleCheck => "role-check",
            Self::MonitorTags => "monitor-tags",
        }
    }
}

impl fmt::Display for ChoreTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSelection {
    pub role_check: bool,
    pub monitor_tags: bool,
}

impl TaskSelection {
    pub fn all() -> Self {
        Self {
            role_check: true,
            monitor_tags: true,
        }
    }

    /// Parses `role-check`, `monitor-tags` or `all`, comma-separated and case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut selection = Self::default();
        for entry in raw.split(',') {
            let name = entry.trim().to_ascii_lowercase();
            match name.as_str() {
                "" => {}
                "all" => selection = Self::all(),
                "role-check" => selection.role_check = true,
                "monitor-tags" => selection.monitor_tags = true,
                _ => return Err(ConfigError::UnknownTask { name }),
            }
        }
        if selection.is_empty() {
            return Err(ConfigError::NoTasks);
        }
        Ok(selection)
    }

    pub fn is_empty(&self) -> bool {
        !self.role_check && !self.monitor_tags
    }

    pub fn contains(&self, task: ChoreTask) -> bool {
        match task {
            ChoreTask::RoleCheck => self.role_check,
            ChoreTask::MonitorTags => self.monitor_tags,
        }
    }

    /// Selected tasks in report order.
    pub fn tasks(&self) -> Vec<ChoreTask> {
        [ChoreTask::RoleCheck, ChoreTask::MonitorTags]
            .into_iter()
            .filter(|task| self.contains(*task))
            .collect()
    }
}
