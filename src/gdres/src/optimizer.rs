//! Greedy resistance optimizer
//!
//! Repeatedly places the addon/slot pair that covers the most remaining
//! resistance deficit, walking addon classes in a fixed priority order, until
//! every goal is met or nothing left helps. This is greedy and can miss the
//! global optimum.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use crate::addon::{Addon, AddonClass};
use crate::catalog::Catalog;
use crate::slots::Slot;

/// Default class order: augments are placed before components
pub const DEFAULT_PRIORITY: &[AddonClass] = &[AddonClass::Augment, AddonClass::Component];

/// Target for one resistance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceGoal {
    pub name: String,
    pub current: i64,
    pub goal: i64,
}

impl ResistanceGoal {
    pub fn new(name: impl Into<String>, current: i64, goal: i64) -> Self {
        Self {
            name: name.into(),
            current,
            goal,
        }
    }

    /// How much the optimizer still has to find
    pub fn deficit(&self) -> i64 {
        self.goal - self.current
    }
}

/// An available addon reduced to what the optimizer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub class: AddonClass,
    pub name: String,
    pub slots: BTreeSet<String>,
    /// Goal name -> resistance this addon adds toward it
    pub contributions: HashMap<String, f64>,
}

impl Candidate {
    pub fn new(class: AddonClass, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
            slots: BTreeSet::new(),
            contributions: HashMap::new(),
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slots.insert(slot.into());
        self
    }

    pub fn with_contribution(mut self, goal: impl Into<String>, amount: f64) -> Self {
        self.contributions.insert(goal.into(), amount);
        self
    }

    /// Map an addon's resistance bonuses onto the goals.
    ///
    /// A bonus counts toward a goal when its kind contains the goal name,
    /// ignoring case. When several bonuses match, the last one wins.
    pub fn from_addon(class: AddonClass, addon: &Addon, goals: &[ResistanceGoal]) -> Self {
        let mut contributions = HashMap::new();
        for goal in goals {
            let goal_name = goal.name.to_lowercase();
            for bonus in &addon.resistances {
                if bonus.kind.to_lowercase().contains(&goal_name) {
                    contributions.insert(goal.name.clone(), bonus.magnitude);
                }
            }
        }

        Self {
            class,
            name: addon.name.clone(),
            slots: addon.slots.clone(),
            contributions,
        }
    }

    pub fn contribution(&self, goal: &str) -> f64 {
        self.contributions.get(goal).copied().unwrap_or(0.0)
    }

    pub fn fits(&self, slot: &Slot) -> bool {
        slot.accepts(self.class) && self.slots.contains(&slot.name)
    }
}

/// One committed placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub class: AddonClass,
    pub slot: String,
    pub addon: String,
    pub score: f64,
}

/// Final state of one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalOutcome {
    pub name: String,
    pub current: i64,
    pub goal: i64,
    /// Resistance added by the assigned addons
    pub accumulated: f64,
}

impl GoalOutcome {
    /// Projected resistance with every assignment equipped
    pub fn total(&self) -> f64 {
        self.current as f64 + self.accumulated
    }

    pub fn is_met(&self) -> bool {
        self.total() >= self.goal as f64
    }
}

/// Result of an optimizer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Assignments in the order they were committed
    pub assignments: Vec<Assignment>,
    pub outcomes: Vec<GoalOutcome>,
    pub goals_met: bool,
}

impl Plan {
    pub fn assignments_for(&self, class: AddonClass) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.class == class)
    }

    pub fn outcome(&self, goal: &str) -> Option<&GoalOutcome> {
        self.outcomes.iter().find(|o| o.name == goal)
    }
}

#[derive(Debug, Clone, Copy)]
struct Move {
    candidate: usize,
    slot: usize,
    score: f64,
}

/// Greedy slot filler
#[derive(Debug, Clone)]
pub struct Optimizer {
    slots: Vec<Slot>,
    goals: Vec<ResistanceGoal>,
    candidates: Vec<Candidate>,
    priority: Vec<AddonClass>,
}

impl Optimizer {
    pub fn new(slots: Vec<Slot>, goals: Vec<ResistanceGoal>) -> Self {
        Self {
            slots,
            goals,
            candidates: Vec::new(),
            priority: DEFAULT_PRIORITY.to_vec(),
        }
    }

    /// Order in which classes get a chance to place an addon each round.
    /// Classes left out are never placed.
    pub fn with_priority(mut self, priority: Vec<AddonClass>) -> Self {
        self.priority = priority;
        self
    }

    pub fn add_candidate(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    /// Add every available addon of a catalog
    pub fn add_catalog(&mut self, catalog: &Catalog) {
        for addon in catalog.available() {
            let candidate = Candidate::from_addon(catalog.class(), addon, &self.goals);
            self.candidates.push(candidate);
        }
    }

    pub fn goals(&self) -> &[ResistanceGoal] {
        &self.goals
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn priority(&self) -> &[AddonClass] {
        &self.priority
    }

    /// Resistance a candidate would still usefully add
    pub fn score(&self, candidate: &Candidate, accumulated: &HashMap<String, f64>) -> f64 {
        self.goals
            .iter()
            .map(|goal| {
                let so_far = accumulated.get(&goal.name).copied().unwrap_or(0.0);
                let remaining = (goal.deficit() as f64 - so_far).max(0.0);
                candidate.contribution(&goal.name).min(remaining)
            })
            .sum()
    }

    fn goals_met(&self, accumulated: &HashMap<String, f64>) -> bool {
        self.goals.iter().all(|goal| {
            accumulated.get(&goal.name).copied().unwrap_or(0.0) >= goal.deficit() as f64
        })
    }

    /// Best positive-score pair for one class. Ties keep the first pair seen.
    fn best_move(
        &self,
        class: AddonClass,
        open: &[&Slot],
        accumulated: &HashMap<String, f64>,
    ) -> Option<Move> {
        let mut best: Option<Move> = None;

        for (ci, candidate) in self.candidates.iter().enumerate() {
            if candidate.class != class {
                continue;
            }
            for (si, slot) in open.iter().enumerate() {
                if !candidate.fits(slot) {
                    continue;
                }
                let score = self.score(candidate, accumulated);
                if score > best.map_or(0.0, |m| m.score) {
                    best = Some(Move {
                        candidate: ci,
                        slot: si,
                        score,
                    });
                }
            }
        }

        best
    }

    /// Fill slots until every goal is met or no placement helps
    pub fn run(&self) -> Plan {
        let mut accumulated: HashMap<String, f64> =
            self.goals.iter().map(|g| (g.name.clone(), 0.0)).collect();
        let mut open: Vec<(AddonClass, Vec<&Slot>)> = self
            .priority
            .iter()
            .map(|&class| (class, self.slots.iter().filter(|s| s.accepts(class)).collect()))
            .collect();
        let mut assignments = Vec::new();

        while !self.goals_met(&accumulated) {
            let mut committed = false;

            for (class, slots) in &mut open {
                let Some(step) = self.best_move(*class, slots, &accumulated) else {
                    continue;
                };

                let candidate = &self.candidates[step.candidate];
                let slot = slots.remove(step.slot);
                for goal in &self.goals {
                    *accumulated.entry(goal.name.clone()).or_insert(0.0) +=
                        candidate.contribution(&goal.name);
                }

                info!(
                    class = %class,
                    slot = %slot.name,
                    addon = %candidate.name,
                    score = step.score,
                    "assigned addon"
                );
                assignments.push(Assignment {
                    class: *class,
                    slot: slot.name.clone(),
                    addon: candidate.name.clone(),
                    score: step.score,
                });
                committed = true;
                break;
            }

            if !committed {
                debug!("no placement improves any goal, stopping");
                break;
            }
        }

        let outcomes: Vec<GoalOutcome> = self
            .goals
            .iter()
            .map(|goal| GoalOutcome {
                name: goal.name.clone(),
                current: goal.current,
                goal: goal.goal,
                accumulated: accumulated.get(&goal.name).copied().unwrap_or(0.0),
            })
            .collect();

        Plan {
            goals_met: self.goals_met(&accumulated),
            assignments,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::ResistanceBonus;

    fn ring_setup() -> Optimizer {
        Optimizer::new(
            vec![Slot::new("Ring", true, false)],
            vec![ResistanceGoal::new("Fire", 10, 60)],
        )
    }

    #[test]
    fn test_single_component_partial_goal() {
        let mut optimizer = ring_setup();
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Ember Band")
                .with_slot("Ring")
                .with_contribution("Fire", 30.0),
        );

        let plan = optimizer.run();
        assert_eq!(plan.assignments.len(), 1);
        assert_eq!(plan.assignments[0].slot, "Ring");
        assert_eq!(plan.assignments[0].addon, "Ember Band");

        let fire = plan.outcome("Fire").unwrap();
        assert_eq!(fire.total(), 40.0);
        assert_eq!(fire.goal, 60);
        assert!(!plan.goals_met);
    }

    #[test]
    fn test_augments_before_components() {
        let mut optimizer = Optimizer::new(
            vec![Slot::new("Ring", true, true)],
            vec![ResistanceGoal::new("Fire", 0, 100)],
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Big Component")
                .with_slot("Ring")
                .with_contribution("Fire", 50.0),
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Augment, "Small Augment")
                .with_slot("Ring")
                .with_contribution("Fire", 5.0),
        );

        let plan = optimizer.run();
        let order: Vec<&str> = plan.assignments.iter().map(|a| a.addon.as_str()).collect();
        assert_eq!(order, vec!["Small Augment", "Big Component"]);
    }

    #[test]
    fn test_priority_is_configurable() {
        let mut optimizer = Optimizer::new(
            vec![Slot::new("Ring", true, true)],
            vec![ResistanceGoal::new("Fire", 0, 100)],
        )
        .with_priority(vec![AddonClass::Component, AddonClass::Augment]);
        optimizer.add_candidate(
            Candidate::new(AddonClass::Augment, "Small Augment")
                .with_slot("Ring")
                .with_contribution("Fire", 5.0),
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Big Component")
                .with_slot("Ring")
                .with_contribution("Fire", 50.0),
        );

        let plan = optimizer.run();
        assert_eq!(plan.assignments[0].addon, "Big Component");
        assert_eq!(plan.assignments.len(), 2);
    }

    #[test]
    fn test_excess_contribution_scores_zero() {
        let mut optimizer = Optimizer::new(
            vec![Slot::new("Ring", true, false), Slot::new("Amulet", true, false)],
            vec![
                ResistanceGoal::new("Fire", 0, 20),
                ResistanceGoal::new("Cold", 0, 20),
            ],
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Huge Fire")
                .with_slot("Ring")
                .with_slot("Amulet")
                .with_contribution("Fire", 80.0),
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Mixed")
                .with_slot("Ring")
                .with_slot("Amulet")
                .with_contribution("Fire", 15.0)
                .with_contribution("Cold", 15.0),
        );

        let plan = optimizer.run();
        // Mixed covers 30 usable points, Huge Fire only 20.
        assert_eq!(plan.assignments[0].addon, "Mixed");
        assert_eq!(plan.assignments[0].score, 30.0);
        // 5 of each is left: Huge Fire can only cover 5, Mixed covers 10.
        assert_eq!(plan.assignments[1].addon, "Mixed");
        assert_eq!(plan.assignments[1].slot, "Amulet");
        assert_eq!(plan.assignments[1].score, 10.0);
        assert!(plan.goals_met);
        assert_eq!(plan.outcome("Fire").unwrap().total(), 30.0);
    }

    #[test]
    fn test_never_commits_non_positive_score() {
        let mut optimizer = ring_setup();
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Frost Band")
                .with_slot("Ring")
                .with_contribution("Cold", 30.0),
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Wrong Slot")
                .with_slot("Amulet")
                .with_contribution("Fire", 30.0),
        );

        let plan = optimizer.run();
        assert!(plan.assignments.is_empty());
        assert_eq!(plan.outcome("Fire").unwrap().accumulated, 0.0);
    }

    #[test]
    fn test_slot_class_must_accept() {
        let mut optimizer = ring_setup();
        optimizer.add_candidate(
            Candidate::new(AddonClass::Augment, "Ember Seal")
                .with_slot("Ring")
                .with_contribution("Fire", 30.0),
        );
        assert!(optimizer.run().assignments.is_empty());
    }

    #[test]
    fn test_met_goals_do_nothing() {
        let mut optimizer = Optimizer::new(
            vec![Slot::new("Ring", true, false)],
            vec![ResistanceGoal::new("Fire", 80, 60)],
        );
        optimizer.add_candidate(
            Candidate::new(AddonClass::Component, "Ember Band")
                .with_slot("Ring")
                .with_contribution("Fire", 30.0),
        );
        let plan = optimizer.run();
        assert!(plan.goals_met);
        assert!(plan.assignments.is_empty());
    }

    #[test]
    fn test_terminates_within_slot_count_and_is_monotonic() {
        let slots: Vec<Slot> = ["Head", "Body", "Leg", "Ring"]
            .iter()
            .map(|name| Slot::new(*name, true, true))
            .collect();
        let mut optimizer = Optimizer::new(
            slots,
            vec![
                ResistanceGoal::new("Fire", 0, 1000),
                ResistanceGoal::new("Cold", 0, 1000),
            ],
        );
        for class in [AddonClass::Component, AddonClass::Augment] {
            optimizer.add_candidate(
                Candidate::new(class, format!("{class} Plate"))
                    .with_slot("Head")
                    .with_slot("Body")
                    .with_slot("Leg")
                    .with_slot("Ring")
                    .with_contribution("Fire", 10.0)
                    .with_contribution("Cold", 4.0),
            );
        }

        let plan = optimizer.run();
        assert_eq!(plan.assignments.len(), 8);
        assert!(plan.assignments.iter().all(|a| a.score > 0.0));
        assert_eq!(plan.assignments_for(AddonClass::Augment).count(), 4);

        let mut running = 0.0;
        for assignment in &plan.assignments {
            let next = running + assignment.score;
            assert!(next >= running);
            running = next;
        }
        assert_eq!(plan.outcome("Fire").unwrap().accumulated, 80.0);
    }

    #[test]
    fn test_candidate_from_addon_matches_goal_names() {
        let mut addon = Addon::new("Prismatic", "Prismatic");
        addon.slots.insert("Ring".to_string());
        addon.resistances = vec![
            ResistanceBonus::new(10.0, "Fire"),
            ResistanceBonus::new(6.0, "Poison & Acid"),
            ResistanceBonus::new(12.0, "Fire"),
        ];
        let goals = vec![
            ResistanceGoal::new("fire", 0, 80),
            ResistanceGoal::new("Acid", 0, 80),
            ResistanceGoal::new("Chaos", 0, 80),
        ];

        let candidate = Candidate::from_addon(AddonClass::Component, &addon, &goals);
        assert_eq!(candidate.contribution("fire"), 12.0);
        assert_eq!(candidate.contribution("Acid"), 6.0);
        assert_eq!(candidate.contribution("Chaos"), 0.0);
        assert!(candidate.slots.contains("Ring"));
    }
}
