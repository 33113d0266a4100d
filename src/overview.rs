//! Static dashboard widgets: headline metrics, activity feed, quick actions.
//! None of this is measured; it is fixture data for the overview panel.

use crate::catalog::{Status, System};

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: &'static str,
    pub value: &'static str,
    /// Percent change against the previous period.
    pub change: f32,
    pub icon: &'static str,
}

pub const METRICS: [Metric; 4] = [
    Metric {
        name: "Active Users",
        value: "344",
        change: 12.5,
        icon: "👥",
    },
    Metric {
        name: "System Uptime",
        value: "99.8%",
        change: 0.2,
        icon: "📈",
    },
    Metric {
        name: "Data Processed",
        value: "2.4TB",
        change: 8.7,
        icon: "🗄",
    },
    Metric {
        name: "Avg Response",
        value: "120ms",
        change: -5.3,
        icon: "⚡",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Login,
    Update,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub user: &'static str,
    pub action: &'static str,
    pub system: &'static str,
    pub timestamp: &'static str,
    pub kind: ActivityKind,
}

pub const ACTIVITIES: [Activity; 5] = [
    Activity {
        user: "Sarah Chen",
        action: "Updated customer records",
        system: "CRM System",
        timestamp: "2 minutes ago",
        kind: ActivityKind::Update,
    },
    Activity {
        user: "Mike Johnson",
        action: "Generated monthly report",
        system: "Analytics Dashboard",
        timestamp: "15 minutes ago",
        kind: ActivityKind::Success,
    },
    Activity {
        user: "Emily Davis",
        action: "Processed inventory batch",
        system: "Inventory Hub",
        timestamp: "1 hour ago",
        kind: ActivityKind::Success,
    },
    Activity {
        user: "System",
        action: "Backup completed successfully",
        system: "Security Center",
        timestamp: "2 hours ago",
        kind: ActivityKind::Success,
    },
    Activity {
        user: "Alex Rodriguez",
        action: "Login attempt failed",
        system: "Security Center",
        timestamp: "3 hours ago",
        kind: ActivityKind::Error,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    GlobalSearch,
    Notifications,
    Support,
    Settings,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        Self::GlobalSearch,
        Self::Notifications,
        Self::Support,
        Self::Settings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::GlobalSearch => "Global Search",
            Self::Notifications => "Notifications",
            Self::Support => "Help & Support",
            Self::Settings => "System Settings",
        }
    }

    /// Quick actions are bound to the digit keys 1-4.
    pub fn from_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }
}

/// Systems shown in the health and usage panels.
pub fn active_systems(systems: &[System]) -> impl Iterator<Item = &System> {
    systems.iter().filter(|s| s.status == Status::Active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_quick_action_digits() {
        assert_eq!(QuickAction::from_digit('1'), Some(QuickAction::GlobalSearch));
        assert_eq!(QuickAction::from_digit('4'), Some(QuickAction::Settings));
        assert_eq!(QuickAction::from_digit('0'), None);
        assert_eq!(QuickAction::from_digit('5'), None);
        assert_eq!(QuickAction::from_digit('x'), None);
    }

    #[test]
    fn test_active_systems_skip_development() {
        let systems = catalog::catalog();
        let ids: Vec<u32> = active_systems(&systems).map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_metric_fixture() {
        assert_eq!(METRICS.len(), 4);
        assert!(METRICS.iter().any(|m| m.change < 0.0));
        assert_eq!(ACTIVITIES.iter().filter(|a| a.kind == ActivityKind::Error).count(), 1);
    }
}
