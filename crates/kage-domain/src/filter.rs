//! Filter composition for list queries
//!
//! A [`Filter`] is the conjunction of zero or more [`Criterion`]s. It is
//! built by folding a list of optional criteria: absent ones are skipped,
//! and no criteria at all matches everything. Because AND commutes, the
//! order in which criteria are added never changes the result.
//!
//! Each entity kind gets a small criteria struct (`MissionCriteria`,
//! `NinjaCriteria`, `VillageCriteria`) that only knows how to turn its
//! optional fields into criteria; the composition itself is shared.

use crate::model::mission::{Difficulty, Mission, MissionStatus};
use crate::model::ninja::{Ninja, NinjaId};
use crate::model::rank::Rank;
use crate::model::village::{Village, VillageId};

/// A single equality test over `T`
pub type Criterion<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Conjunction of criteria over `T`
pub struct Filter<T> {
    criteria: Vec<Criterion<T>>,
}

impl<T> Filter<T> {
    /// The filter with no criteria; matches every record
    pub fn everything() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Fold optional criteria into one filter
    pub fn compose<I>(criteria: I) -> Self
    where
        I: IntoIterator<Item = Option<Criterion<T>>>,
    {
        criteria
            .into_iter()
            .flatten()
            .fold(Self::everything(), Filter::and)
    }

    /// Add one more criterion
    pub fn and(mut self, criterion: Criterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Merge two filters into their conjunction
    pub fn and_all(mut self, other: Filter<T>) -> Self {
        self.criteria.extend(other.criteria);
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.criteria.iter().all(|criterion| criterion(item))
    }

    /// Keep the matching items, preserving order
    pub fn apply<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::everything()
    }
}

impl<T> core::fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Filter")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}

// ========== Missions ==========

pub fn mission_has_difficulty(difficulty: Difficulty) -> Criterion<Mission> {
    Box::new(move |m| m.difficulty() == difficulty)
}

pub fn mission_has_status(status: MissionStatus) -> Criterion<Mission> {
    Box::new(move |m| m.status() == status)
}

pub fn mission_assigned_to(ninja: NinjaId) -> Criterion<Mission> {
    Box::new(move |m| m.is_assigned(ninja))
}

/// Optional list filters for missions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionCriteria {
    pub difficulty: Option<Difficulty>,
    pub status: Option<MissionStatus>,
    pub assigned_to: Option<NinjaId>,
}

impl MissionCriteria {
    pub fn to_filter(&self) -> Filter<Mission> {
        Filter::compose([
            self.difficulty.map(mission_has_difficulty),
            self.status.map(mission_has_status),
            self.assigned_to.map(mission_assigned_to),
        ])
    }
}

// ========== Ninjas ==========

pub fn ninja_has_rank(rank: Rank) -> Criterion<Ninja> {
    Box::new(move |n| n.rank() == rank)
}

pub fn ninja_in_village(village: VillageId) -> Criterion<Ninja> {
    Box::new(move |n| n.village() == Some(village))
}

pub fn ninja_is_elite(elite: bool) -> Criterion<Ninja> {
    Box::new(move |n| n.is_elite() == elite)
}

/// Optional list filters for ninjas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NinjaCriteria {
    pub rank: Option<Rank>,
    pub village: Option<VillageId>,
    pub elite: Option<bool>,
}

impl NinjaCriteria {
    pub fn to_filter(&self) -> Filter<Ninja> {
        Filter::compose([
            self.rank.map(ninja_has_rank),
            self.village.map(ninja_in_village),
            self.elite.map(ninja_is_elite),
        ])
    }
}

// ========== Villages ==========

/// A village together with its resolved Kage
///
/// Filtering on the leader's name needs both sides, so village lists are
/// built from listings rather than bare villages.
#[derive(Debug, Clone)]
pub struct VillageListing {
    pub village: Village,
    pub kage: Ninja,
}

pub fn village_led_by_name(name: String) -> Criterion<VillageListing> {
    Box::new(move |listing| listing.kage.name() == name)
}

/// Optional list filters for villages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VillageCriteria {
    pub kage_name: Option<String>,
}

impl VillageCriteria {
    pub fn to_filter(&self) -> Filter<VillageListing> {
        Filter::compose([self.kage_name.clone().map(village_led_by_name)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mission::MissionId;
    use crate::model::time::Timestamp;

    fn missions() -> Vec<Mission> {
        let at = Timestamp::from_unix_millis(0);
        vec![
            Mission::new(MissionId::new(1), "Catch Tora", Difficulty::D, at)
                .with_assignees([NinjaId::new(1)]),
            Mission::new(MissionId::new(2), "Escort Tazuna", Difficulty::C, at)
                .with_assignees([NinjaId::new(1), NinjaId::new(2)]),
            Mission::new(MissionId::new(3), "Retrieve Sasuke", Difficulty::A, at)
                .with_assignees([NinjaId::new(3)]),
        ]
    }

    fn ids(missions: &[Mission]) -> Vec<u64> {
        missions.iter().map(|m| m.id().value()).collect()
    }

    #[test]
    fn test_zero_criteria_matches_everything() {
        let filter = MissionCriteria::default().to_filter();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(missions()).len(), 3);
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let criteria = MissionCriteria {
            difficulty: Some(Difficulty::C),
            assigned_to: Some(NinjaId::new(1)),
            ..MissionCriteria::default()
        };
        assert_eq!(ids(&criteria.to_filter().apply(missions())), vec![2]);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = Filter::everything()
            .and(mission_has_difficulty(Difficulty::C))
            .and(mission_assigned_to(NinjaId::new(2)));
        let b = Filter::everything()
            .and(mission_assigned_to(NinjaId::new(2)))
            .and(mission_has_difficulty(Difficulty::C));

        assert_eq!(ids(&a.apply(missions())), ids(&b.apply(missions())));
    }

    #[test]
    fn test_composing_twice_is_idempotent() {
        let criteria = MissionCriteria {
            assigned_to: Some(NinjaId::new(1)),
            ..MissionCriteria::default()
        };
        let once = criteria.to_filter();
        let twice = criteria.to_filter().and_all(criteria.to_filter());

        assert_eq!(twice.len(), 2);
        assert_eq!(ids(&once.apply(missions())), ids(&twice.apply(missions())));
    }

    #[test]
    fn test_ninja_criteria() {
        let ninjas = vec![
            Ninja::new(NinjaId::new(1), "Itachi", "itachi@konoha.jp", "h")
                .with_rank(Rank::Jonin)
                .with_elite(true)
                .with_village(Some(VillageId::new(1))),
            Ninja::new(NinjaId::new(2), "Shikamaru", "shika@konoha.jp", "h")
                .with_rank(Rank::Chunin)
                .with_village(Some(VillageId::new(1))),
            Ninja::new(NinjaId::new(3), "Gaara", "gaara@suna.jp", "h")
                .with_rank(Rank::Kage)
                .with_village(Some(VillageId::new(2))),
        ];

        let in_leaf = NinjaCriteria {
            village: Some(VillageId::new(1)),
            ..NinjaCriteria::default()
        };
        assert_eq!(in_leaf.to_filter().apply(ninjas.clone()).len(), 2);

        let not_elite = NinjaCriteria {
            elite: Some(false),
            village: Some(VillageId::new(1)),
            ..NinjaCriteria::default()
        };
        let found = not_elite.to_filter().apply(ninjas);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Shikamaru");
    }

    #[test]
    fn test_village_criteria_matches_leader_name() {
        let kage = Ninja::new(NinjaId::new(9), "Tsunade", "tsunade@konoha.jp", "h");
        let listing = VillageListing {
            village: Village::new(VillageId::new(1), "Konohagakure", kage.id()),
            kage,
        };

        let by_name = VillageCriteria {
            kage_name: Some("Tsunade".to_string()),
        };
        assert!(by_name.to_filter().matches(&listing));

        let other = VillageCriteria {
            kage_name: Some("Gaara".to_string()),
        };
        assert!(!other.to_filter().matches(&listing));
    }
}
