use yansi::Paint;

use crate::models::InstanceStatus;

pub fn format_status(status: InstanceStatus) -> String {
    match status {
        InstanceStatus::Running => "Running".to_string(),
        InstanceStatus::Stopped => "Stopped".to_string(),
        InstanceStatus::Starting => "Starting".to_string(),
        InstanceStatus::Stopping => "Stopping".to_string(),
    }
}

pub fn colorize_status(status: InstanceStatus) -> String {
    let label = format_status(status);
    match status {
        InstanceStatus::Running => Paint::new(label).fg(yansi::Color::Green).to_string(),
        InstanceStatus::Stopped => Paint::new(label).fg(yansi::Color::Red).to_string(),
        InstanceStatus::Starting | InstanceStatus::Stopping => {
            Paint::new(label).fg(yansi::Color::Yellow).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_labels() {
        assert_eq!(format_status(InstanceStatus::Running), "Running");
        assert_eq!(format_status(InstanceStatus::Stopping), "Stopping");
    }
}
