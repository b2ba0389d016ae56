//! Achievement badges for today's progress. Stateless thresholds that get
//! re-evaluated on every render; nothing here is ever persisted.

/// How a badge decides it is unlocked.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Requirement {
    /// Any water logged today.
    AnyIntake,
    /// Progress ratio at or above the threshold.
    Progress(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Badge {
    pub title: &'static str,
    pub description: &'static str,
    requirement: Requirement,
}

pub const BADGES: [Badge; 5] = [
    Badge {
        title: "First Sip",
        description: "Logged water today",
        requirement: Requirement::AnyIntake,
    },
    Badge {
        title: "25% Charged",
        description: "Quarter to your goal",
        requirement: Requirement::Progress(0.25),
    },
    Badge {
        title: "Halfway Hero",
        description: "50% of your goal",
        requirement: Requirement::Progress(0.5),
    },
    Badge {
        title: "Almost There",
        description: "75% of your goal",
        requirement: Requirement::Progress(0.75),
    },
    Badge {
        title: "Goal Crusher",
        description: "Goal reached",
        requirement: Requirement::Progress(1.0),
    },
];

impl Badge {
    pub fn unlocked(&self, total_today: u64, progress: f64) -> bool {
        match self.requirement {
            Requirement::AnyIntake => total_today > 0,
            Requirement::Progress(threshold) => progress >= threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BADGES;

    fn unlocked_titles(total_today: u64, progress: f64) -> Vec<&'static str> {
        BADGES
            .iter()
            .filter(|badge| badge.unlocked(total_today, progress))
            .map(|badge| badge.title)
            .collect()
    }

    #[test]
    fn test_nothing_unlocked_without_intake() {
        assert!(unlocked_titles(0, 0.0).is_empty());
    }

    #[test]
    fn test_first_sip_unlocks_on_any_intake() {
        assert_eq!(unlocked_titles(1, 0.0), vec!["First Sip"]);
    }

    #[test]
    fn test_badges_unlock_at_quartiles() {
        assert_eq!(
            unlocked_titles(32, 0.5),
            vec!["First Sip", "25% Charged", "Halfway Hero"]
        );
        assert_eq!(
            unlocked_titles(64, 1.0),
            vec![
                "First Sip",
                "25% Charged",
                "Halfway Hero",
                "Almost There",
                "Goal Crusher"
            ]
        );
    }
}
