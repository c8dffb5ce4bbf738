//! Initiative at the start of a sequence, and spending shots during it.
//!
//! An [`InitiativeDraft`] collects one entry per eligible shot. Each entry's
//! initiative is either rolled (d6 + speed) or typed in directly. Once
//! every entry has a value, [`InitiativeDraft::apply`] writes the new shot
//! positions into a copy of the fight. A shot that was negative going into
//! the sequence carries that penalty over.

use cw_core::{EntityClass, EntityId, Fight, Shot};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::{self, DIE_SIDES};
use crate::error::{MechError, MechResult};
use crate::rules::{CombatRules, normalize_shot_cost};
use crate::stats;

/// Which side of the fight an entry is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// PCs and Allies.
    Heroes,
    /// Everyone else.
    Villains,
}

impl Side {
    /// The side a class fights on.
    pub fn of(class: EntityClass) -> Self {
        if class.is_hero_side() {
            Self::Heroes
        } else {
            Self::Villains
        }
    }
}

/// One combatant's row in the initiative draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    /// The shot being scheduled.
    pub shot_id: EntityId,
    /// Display name.
    pub name: String,
    /// Heroes or villains.
    pub side: Side,
    /// Speed added to the die, or the driven vehicle's Acceleration.
    pub speed: i32,
    /// The shot going into this sequence.
    pub current_shot: Option<i32>,
    /// Rolled or entered initiative, `None` until set.
    pub initiative: Option<i32>,
}

impl InitiativeEntry {
    /// The shot this entry lands on: initiative plus any negative carry-over.
    pub fn applied_shot(&self) -> Option<i32> {
        let carry = self.current_shot.filter(|s| *s < 0).unwrap_or(0);
        self.initiative.map(|i| i.saturating_add(carry))
    }
}

/// Returns true if a shot gets fresh initiative: characters that have not
/// entered the sequence or have run out of shots.
pub fn is_eligible(shot: &Shot) -> bool {
    !shot.is_vehicle() && shot.current_shot.is_none_or(|s| s <= 0)
}

/// Initiative being gathered for a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeDraft {
    entries: Vec<InitiativeEntry>,
}

impl InitiativeDraft {
    /// A draft with one unset entry per eligible shot, in fight order.
    pub fn for_fight(fight: &Fight) -> Self {
        let entries = fight
            .shots
            .iter()
            .filter(|shot| is_eligible(shot))
            .filter_map(|shot| {
                let character = shot.as_character()?;
                Some(InitiativeEntry {
                    shot_id: shot.id,
                    name: character.name.clone(),
                    side: Side::of(character.entity_class),
                    speed: stats::initiative_speed(character, fight),
                    current_shot: shot.current_shot,
                    initiative: None,
                })
            })
            .collect();
        Self { entries }
    }

    /// All entries.
    pub fn entries(&self) -> &[InitiativeEntry] {
        &self.entries
    }

    /// Entries for PCs and Allies.
    pub fn heroes(&self) -> impl Iterator<Item = &InitiativeEntry> {
        self.entries.iter().filter(|e| e.side == Side::Heroes)
    }

    /// Entries for everyone else.
    pub fn villains(&self) -> impl Iterator<Item = &InitiativeEntry> {
        self.entries.iter().filter(|e| e.side == Side::Villains)
    }

    /// Look up an entry by shot.
    pub fn entry(&self, shot_id: EntityId) -> Option<&InitiativeEntry> {
        self.entries.iter().find(|e| e.shot_id == shot_id)
    }

    fn entry_mut(&mut self, shot_id: EntityId) -> MechResult<&mut InitiativeEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.shot_id == shot_id)
            .ok_or(MechError::UnknownShot(shot_id))
    }

    /// Roll d6 + speed for every unset entry, optionally only on one side.
    /// `roll` supplies single die results.
    pub fn roll_missing<F: FnMut() -> u32>(mut self, side: Option<Side>, mut roll: F) -> Self {
        for entry in &mut self.entries {
            if entry.initiative.is_some() || side.is_some_and(|s| s != entry.side) {
                continue;
            }
            entry.initiative = Some(die_value(roll()).saturating_add(entry.speed));
        }
        self
    }

    /// [`InitiativeDraft::roll_missing`] with a real RNG.
    pub fn roll_missing_with_rng<R: Rng + ?Sized>(self, side: Option<Side>, rng: &mut R) -> Self {
        self.roll_missing(side, || dice::roll_die(rng))
    }

    /// Roll one entry, replacing any value it had.
    pub fn roll_entry<F: FnOnce() -> u32>(mut self, shot_id: EntityId, roll: F) -> MechResult<Self> {
        let entry = self.entry_mut(shot_id)?;
        entry.initiative = Some(die_value(roll()).saturating_add(entry.speed));
        Ok(self)
    }

    /// Enter an initiative value directly, bypassing the die.
    pub fn set_initiative(mut self, shot_id: EntityId, value: i32) -> MechResult<Self> {
        self.entry_mut(shot_id)?.initiative = Some(value);
        Ok(self)
    }

    /// Clear an entry so it must be set again.
    pub fn clear_initiative(mut self, shot_id: EntityId) -> MechResult<Self> {
        self.entry_mut(shot_id)?.initiative = None;
        Ok(self)
    }

    /// Number of entries still without initiative.
    pub fn missing(&self) -> usize {
        self.entries.iter().filter(|e| e.initiative.is_none()).count()
    }

    /// Returns true once every entry has initiative.
    pub fn can_apply(&self) -> bool {
        self.missing() == 0
    }

    /// Write the applied shots into a copy of `fight`. Fails without
    /// touching anything while any entry is unset.
    pub fn apply(&self, fight: &Fight) -> MechResult<Fight> {
        let missing = self.missing();
        if missing > 0 {
            return Err(MechError::InitiativeIncomplete { missing });
        }
        let mut next = fight.clone();
        for entry in &self.entries {
            let shot = next
                .shot_mut(entry.shot_id)
                .ok_or(MechError::UnknownShot(entry.shot_id))?;
            shot.current_shot = entry.applied_shot();
        }
        tracing::debug!(
            fight = %fight.name,
            sequence = fight.sequence,
            entries = self.entries.len(),
            "initiative applied"
        );
        Ok(next)
    }
}

fn die_value(roll: u32) -> i32 {
    roll.clamp(1, DIE_SIDES) as i32
}

/// Advance the fight to its next sequence.
pub fn begin_sequence(fight: &Fight) -> Fight {
    let mut next = fight.clone();
    next.sequence = fight.sequence.saturating_add(1);
    tracing::debug!(fight = %fight.name, sequence = next.sequence, "sequence started");
    next
}

/// Spend shots for an action. Non-positive costs fall back to the default
/// attack cost; the resulting shot may go negative.
pub fn spend_shots(fight: &Fight, shot_id: EntityId, cost: i32, rules: &CombatRules) -> MechResult<Fight> {
    let cost = normalize_shot_cost(cost, rules.attack_shot_cost);
    let mut next = fight.clone();
    let shot = next.shot_mut(shot_id).ok_or(MechError::UnknownShot(shot_id))?;
    let after = shot.current_shot.unwrap_or(0).saturating_sub(cost);
    shot.current_shot = Some(after);
    tracing::debug!(shot = %shot_id, cost, after, "shots spent");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::scripted;
    use crate::rules::preset;
    use cw_core::{Character, Vehicle, keys};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn character(class: EntityClass, name: &str, speed: i32) -> Character {
        Character::new(class, name).with_action_value(keys::SPEED, speed)
    }

    #[test]
    fn negative_shot_carries_over() {
        let shot = Shot::character(character(EntityClass::Pc, "Hero", 3)).at(-2);
        let id = shot.id;
        let fight = Fight::new("Docks").with_shot(shot);
        let draft = InitiativeDraft::for_fight(&fight).roll_missing(None, scripted(&[4]));
        assert_eq!(draft.entry(id).and_then(InitiativeEntry::applied_shot), Some(5));
        let applied = draft.apply(&fight).unwrap();
        assert_eq!(applied.shot(id).unwrap().current_shot, Some(5));
    }

    #[test]
    fn eligibility() {
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 5));
        assert!(is_eligible(&hero));
        assert!(is_eligible(&hero.clone().at(0)));
        assert!(is_eligible(&hero.clone().at(-3)));
        assert!(!is_eligible(&hero.at(4)));
        assert!(!is_eligible(&Shot::vehicle(Vehicle::new("Van"))));
    }

    #[test]
    fn draft_partitions_sides() {
        let fight = Fight::new("Market")
            .with_shot(Shot::character(character(EntityClass::Pc, "Hero", 6)))
            .with_shot(Shot::character(character(EntityClass::Ally, "Sidekick", 5)))
            .with_shot(Shot::character(character(EntityClass::Mook, "Goons", 4)))
            .with_shot(Shot::character(character(EntityClass::Boss, "Big Bad", 8)))
            .with_shot(Shot::character(character(EntityClass::Npc, "Busy", 7)).at(6))
            .with_shot(Shot::vehicle(Vehicle::new("Van")));
        let draft = InitiativeDraft::for_fight(&fight);
        assert_eq!(draft.entries().len(), 4);
        let heroes: Vec<&str> = draft.heroes().map(|e| e.name.as_str()).collect();
        let villains: Vec<&str> = draft.villains().map(|e| e.name.as_str()).collect();
        assert_eq!(heroes, ["Hero", "Sidekick"]);
        assert_eq!(villains, ["Goons", "Big Bad"]);
    }

    #[test]
    fn cannot_apply_until_complete() {
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 6));
        let boss = Shot::character(character(EntityClass::Boss, "Big Bad", 8));
        let boss_id = boss.id;
        let fight = Fight::new("Temple").with_shot(hero).with_shot(boss);
        let draft = InitiativeDraft::for_fight(&fight).roll_missing(Some(Side::Heroes), scripted(&[3]));
        assert!(!draft.can_apply());
        assert_eq!(draft.missing(), 1);
        let err = draft.apply(&fight).unwrap_err();
        assert!(matches!(err, MechError::InitiativeIncomplete { missing: 1 }));

        let draft = draft.set_initiative(boss_id, 15).unwrap();
        assert!(draft.can_apply());
        let applied = draft.apply(&fight).unwrap();
        assert_eq!(applied.shot(boss_id).unwrap().current_shot, Some(15));
        assert_eq!(applied.shots[0].current_shot, Some(9));
    }

    #[test]
    fn manual_and_rolled_paths_converge() {
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 6));
        let id = hero.id;
        let fight = Fight::new("Rooftop").with_shot(hero);
        let rolled = InitiativeDraft::for_fight(&fight).roll_entry(id, || 5).unwrap();
        assert_eq!(rolled.entry(id).unwrap().initiative, Some(11));
        let typed = InitiativeDraft::for_fight(&fight).set_initiative(id, 11).unwrap();
        assert_eq!(rolled.apply(&fight).unwrap(), typed.apply(&fight).unwrap());
    }

    #[test]
    fn roll_missing_keeps_existing_values() {
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 6));
        let id = hero.id;
        let fight = Fight::new("Alley").with_shot(hero);
        let draft = InitiativeDraft::for_fight(&fight)
            .set_initiative(id, 20)
            .unwrap()
            .roll_missing(None, scripted(&[]));
        assert_eq!(draft.entry(id).unwrap().initiative, Some(20));
        let draft = draft.clear_initiative(id).unwrap();
        assert!(!draft.can_apply());
    }

    #[test]
    fn drivers_roll_with_acceleration() {
        let car = Vehicle::new("Interceptor").with_action_value(keys::ACCELERATION, 10);
        let driver = character(EntityClass::Pc, "Wheelman", 5).driving(car.id);
        let fight = Fight::new("Highway")
            .with_shot(Shot::vehicle(car))
            .with_shot(Shot::character(driver));
        let draft = InitiativeDraft::for_fight(&fight);
        assert_eq!(draft.entries().len(), 1);
        assert_eq!(draft.entries()[0].speed, 10);
    }

    #[test]
    fn unknown_shot_rejected() {
        let fight = Fight::new("Empty");
        let draft = InitiativeDraft::for_fight(&fight);
        assert!(draft.can_apply());
        let err = draft.set_initiative(EntityId::new(), 4).unwrap_err();
        assert!(matches!(err, MechError::UnknownShot(_)));
    }

    #[test]
    fn seeded_rolls_stay_in_range() {
        let fight = Fight::new("Casino")
            .with_shot(Shot::character(character(EntityClass::Pc, "A", 4)))
            .with_shot(Shot::character(character(EntityClass::Npc, "B", 2)));
        let mut rng = StdRng::seed_from_u64(3);
        let draft = InitiativeDraft::for_fight(&fight).roll_missing_with_rng(None, &mut rng);
        for entry in draft.entries() {
            let init = entry.initiative.unwrap();
            assert!((entry.speed + 1..=entry.speed + 6).contains(&init));
        }
    }

    #[test]
    fn sequence_and_shot_spending() {
        let rules = preset::standard();
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 6)).at(2);
        let id = hero.id;
        let fight = Fight::new("Bridge").with_shot(hero);
        let fight = begin_sequence(&fight);
        assert_eq!(fight.sequence, 1);
        let fight = spend_shots(&fight, id, 3, &rules).unwrap();
        assert_eq!(fight.shot(id).unwrap().current_shot, Some(-1));
        let fight = spend_shots(&fight, id, 0, &rules).unwrap();
        assert_eq!(fight.shot(id).unwrap().current_shot, Some(-4));
        assert!(spend_shots(&fight, EntityId::new(), 3, &rules).is_err());
    }

    #[test]
    fn extreme_initiative_saturates() {
        let shot = Shot::character(character(EntityClass::Pc, "Hero", 3)).at(-2);
        let id = shot.id;
        let fight = Fight::new("Abyss").with_shot(shot);
        let applied = InitiativeDraft::for_fight(&fight)
            .set_initiative(id, i32::MIN)
            .unwrap()
            .apply(&fight)
            .unwrap();
        assert_eq!(applied.shot(id).unwrap().current_shot, Some(i32::MIN));

        let fast = Shot::character(character(EntityClass::Pc, "Blur", i32::MAX));
        let fast_id = fast.id;
        let fight = Fight::new("Racetrack").with_shot(fast);
        let draft = InitiativeDraft::for_fight(&fight).roll_missing(None, scripted(&[6]));
        assert_eq!(draft.entry(fast_id).unwrap().initiative, Some(i32::MAX));
        let draft = draft.roll_entry(fast_id, || 4).unwrap();
        assert_eq!(draft.entry(fast_id).unwrap().initiative, Some(i32::MAX));
    }

    #[test]
    fn spending_shots_saturates() {
        let rules = preset::standard();
        let hero = Shot::character(character(EntityClass::Pc, "Hero", 6)).at(i32::MIN + 1);
        let id = hero.id;
        let fight = Fight::new("Bottom").with_shot(hero);
        let fight = spend_shots(&fight, id, 3, &rules).unwrap();
        assert_eq!(fight.shot(id).unwrap().current_shot, Some(i32::MIN));
    }
}
