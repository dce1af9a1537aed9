//! Population counts for the status label.

use serde::Serialize;

use crate::core::types::Role;
use crate::engine::CreatureSnapshot;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationCounts {
    pub prey: usize,
    pub predators: usize,
}

impl PopulationCounts {
    /// Two-line status string shown in the corner of the view.
    pub fn status_text(&self) -> String {
        format!("Prey: {}\n Predators: {}", self.prey, self.predators)
    }
}

/// Count prey and predators. Unknown roles count as neither.
pub fn count_population(creatures: &[CreatureSnapshot]) -> PopulationCounts {
    creatures
        .iter()
        .fold(PopulationCounts::default(), |mut counts, creature| {
            match creature.role {
                Role::Prey => counts.prey += 1,
                Role::Predator => counts.predators += 1,
                Role::Unknown(_) => {}
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Sex;

    fn critter(id: i32, role: Role) -> CreatureSnapshot {
        CreatureSnapshot {
            id,
            x: 0.0,
            y: 0.0,
            role,
            sex: Sex::Male,
        }
    }

    #[test]
    fn test_three_prey_one_predator() {
        let snapshot = vec![
            critter(0, Role::Prey),
            critter(1, Role::Predator),
            critter(2, Role::Prey),
            critter(3, Role::Prey),
        ];
        let counts = count_population(&snapshot);
        assert_eq!(counts, PopulationCounts { prey: 3, predators: 1 });
        assert_eq!(counts.status_text(), "Prey: 3\n Predators: 1");
    }

    #[test]
    fn test_empty_snapshot() {
        assert_eq!(
            count_population(&[]).status_text(),
            "Prey: 0\n Predators: 0"
        );
    }

    #[test]
    fn test_unknown_roles_not_counted() {
        let snapshot = vec![critter(0, Role::Unknown(7)), critter(1, Role::Predator)];
        let counts = count_population(&snapshot);
        assert_eq!(counts.prey, 0);
        assert_eq!(counts.predators, 1);
    }
}
