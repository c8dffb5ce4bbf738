//! Attack setup and resolution.
//!
//! An [`AttackSetup`] is the state of an attack form. It is built with
//! [`AttackSetup::new`] and then folded through [`AttackChange`]s, each of
//! which returns a new setup. Once the dice are rolled,
//! [`resolve_attack`] turns the setup into an [`AttackOutcome`] and
//! [`commit_attack`] applies that outcome to the characters involved.

use cw_core::{Character, EntityClass, EntityId};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::damage::{self, Smackdown};
use crate::dice::{self, ExplodingRoll, Swerve};
use crate::error::{MechError, MechResult};
use crate::rules::{CombatRules, normalize_shot_cost};
use crate::stats;

/// A selected target, reduced to what the attack form needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTarget {
    /// The target character.
    pub id: EntityId,
    /// The target's class.
    pub entity_class: EntityClass,
}

impl AttackTarget {
    /// Describe a character as a target.
    pub fn of(character: &Character) -> Self {
        Self {
            id: character.id,
            entity_class: character.entity_class,
        }
    }
}

/// A single edit to an attack form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum AttackChange {
    /// Pick a weapon by index into the attacker's weapon list, or go unarmed.
    SelectWeapon(Option<usize>),
    /// Replace the target list.
    SelectTargets(Vec<AttackTarget>),
    /// Attack with a different action value.
    SelectAttackSkill(String),
    /// Turn the kachunk reload on or off.
    ToggleKachunk(bool),
    /// Set the flat damage modifier.
    SetDamageModifier(i32),
    /// Set the shot cost. Non-positive input resets to the default.
    SetShotCost(i32),
    /// Ask to spend a fortune point on the roll.
    SpendFortune(bool),
}

/// The state of an attack form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSetup {
    /// Action value the attack rolls against.
    pub attack_skill: String,
    /// Effective value of `attack_skill`, impairment included.
    pub base_attack_value: i32,
    /// Bonus currently applied for targeting mooks.
    pub mook_bonus: i32,
    /// Index of the selected weapon, `None` for unarmed.
    pub weapon: Option<usize>,
    /// Selected targets.
    pub targets: Vec<AttackTarget>,
    /// Damage the attack deals on a hit, modifier included.
    pub damage: i32,
    /// Flat damage modifier.
    pub damage_modifier: i32,
    /// Whether the kachunk reload is in effect.
    pub kachunk: bool,
    /// Shots the attack costs.
    pub shot_cost: i32,
    /// Whether a fortune point is spent on the roll.
    pub use_fortune: bool,
}

impl AttackSetup {
    /// A fresh setup for `attacker`: main attack, unarmed, no targets.
    pub fn new(attacker: &Character, rules: &CombatRules) -> Self {
        let attack_skill = stats::main_attack(attacker, rules);
        Self {
            base_attack_value: stats::action_value(attacker, &attack_skill),
            attack_skill,
            mook_bonus: 0,
            weapon: None,
            targets: Vec::new(),
            damage: base_damage(attacker, None, rules),
            damage_modifier: 0,
            kachunk: false,
            shot_cost: rules.attack_shot_cost,
            use_fortune: false,
        }
    }

    /// Attack value including any mook bonus.
    pub fn attack_value(&self) -> i32 {
        self.base_attack_value.saturating_add(self.mook_bonus)
    }

    /// Returns true if any selected target is a mook.
    pub fn targets_mooks(&self) -> bool {
        self.targets.iter().any(|t| t.entity_class.is_mook())
    }

    /// Apply one change and return the new setup.
    pub fn apply(
        mut self,
        attacker: &Character,
        rules: &CombatRules,
        change: AttackChange,
    ) -> MechResult<Self> {
        match change {
            AttackChange::SelectWeapon(index) => {
                if let Some(i) = index.filter(|i| *i >= attacker.weapons.len()) {
                    return Err(MechError::InvalidWeapon(i));
                }
                if self.kachunk {
                    self.kachunk = false;
                    self.shot_cost = without_kachunk(self.shot_cost);
                }
                self.weapon = index;
                self.damage =
                    base_damage(attacker, index, rules).saturating_add(self.damage_modifier);
            }
            AttackChange::SelectTargets(targets) => {
                self.targets = targets;
            }
            AttackChange::SelectAttackSkill(skill) => {
                self.base_attack_value = stats::action_value(attacker, &skill);
                self.attack_skill = skill;
            }
            AttackChange::ToggleKachunk(on) if on == self.kachunk => {}
            AttackChange::ToggleKachunk(true) if !self.kachunk_capable(attacker) => {
                tracing::debug!(
                    attacker = %attacker.name,
                    weapon = ?self.weapon,
                    "weapon cannot kachunk"
                );
            }
            AttackChange::ToggleKachunk(on) => {
                self.kachunk = on;
                if on {
                    self.damage = rules.kachunk_damage.saturating_add(self.damage_modifier);
                    self.shot_cost = self.shot_cost.saturating_add(1);
                } else {
                    self.damage = base_damage(attacker, self.weapon, rules)
                        .saturating_add(self.damage_modifier);
                    self.shot_cost = without_kachunk(self.shot_cost);
                }
            }
            AttackChange::SetDamageModifier(modifier) => {
                let base = if self.kachunk {
                    rules.kachunk_damage
                } else {
                    base_damage(attacker, self.weapon, rules)
                };
                self.damage_modifier = modifier;
                self.damage = base.saturating_add(modifier);
            }
            AttackChange::SetShotCost(cost) => {
                self.shot_cost = normalize_shot_cost(cost, rules.attack_shot_cost);
            }
            AttackChange::SpendFortune(wanted) => {
                let allowed = can_use_fortune(attacker);
                if wanted && !allowed {
                    tracing::debug!(attacker = %attacker.name, "fortune not available");
                }
                self.use_fortune = wanted && allowed;
            }
        }
        self.mook_bonus = self.mook_bonus_for(attacker);
        Ok(self)
    }

    /// Fold a sequence of changes, stopping at the first error.
    pub fn apply_all<I>(self, attacker: &Character, rules: &CombatRules, changes: I) -> MechResult<Self>
    where
        I: IntoIterator<Item = AttackChange>,
    {
        changes
            .into_iter()
            .try_fold(self, |setup, change| setup.apply(attacker, rules, change))
    }

    /// Returns true if the selected weapon supports the kachunk reload.
    /// Unarmed attacks never do.
    pub fn kachunk_capable(&self, attacker: &Character) -> bool {
        self.weapon
            .and_then(|i| attacker.weapons.get(i))
            .is_some_and(|w| w.kachunk)
    }

    fn mook_bonus_for(&self, attacker: &Character) -> i32 {
        if !self.targets_mooks() {
            return 0;
        }
        self.weapon
            .and_then(|i| attacker.weapons.get(i))
            .map_or(0, |w| w.mook_bonus)
    }
}

/// Shot cost once the kachunk surcharge is removed. Never drops below one
/// shot, and never resets to the default.
fn without_kachunk(cost: i32) -> i32 {
    cost.saturating_sub(1).max(1)
}

/// Damage before modifiers: the weapon's, otherwise the character's Damage
/// value, otherwise unarmed damage.
fn base_damage(attacker: &Character, weapon: Option<usize>, rules: &CombatRules) -> i32 {
    match weapon.and_then(|i| attacker.weapons.get(i)) {
        Some(w) => w.damage,
        None => {
            let own = stats::damage(attacker);
            if own > 0 { own } else { rules.unarmed_damage }
        }
    }
}

/// Returns true if `attacker` may spend fortune: PCs with points left.
pub fn can_use_fortune(attacker: &Character) -> bool {
    attacker.entity_class.is_pc() && stats::fortune(attacker) > 0
}

/// The resolved result of an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The swerve that was rolled.
    pub swerve: Swerve,
    /// Bonus from the fortune die, 0 when no fortune was spent.
    pub fortune_bonus: i32,
    /// Attack value plus swerve plus fortune bonus, minus defense.
    pub action_result: i32,
    /// The attack landed.
    pub hit: bool,
    /// Action result plus damage on a hit, 0 on a miss.
    pub smackdown: i32,
    /// Toughness the smackdown was checked against.
    pub toughness: i32,
    /// Wounds the smackdown deals, never negative.
    pub wounds: i32,
    /// Both swerve stacks opened with a 6.
    pub boxcars: bool,
    /// A fortune point was spent.
    pub fortune_spent: bool,
    /// Shots the attack costs.
    pub shot_cost: i32,
}

/// Resolve an attack from already-rolled dice.
///
/// `fortune_roll` is only counted when the setup spends fortune.
pub fn resolve_attack(
    setup: &AttackSetup,
    swerve: Swerve,
    fortune_roll: Option<&ExplodingRoll>,
    defense: i32,
    toughness: i32,
) -> AttackOutcome {
    let fortune_bonus = if setup.use_fortune {
        fortune_roll.map_or(0, |r| i32::try_from(r.total).unwrap_or(i32::MAX))
    } else {
        0
    };
    let action_result = setup
        .attack_value()
        .saturating_add(swerve.result)
        .saturating_add(fortune_bonus)
        .saturating_sub(defense);
    let hit = action_result >= 0;
    let smackdown = if hit {
        action_result.saturating_add(setup.damage)
    } else {
        0
    };
    let wounds = smackdown.saturating_sub(toughness).max(0);
    tracing::debug!(
        attack = setup.attack_value(),
        swerve = swerve.result,
        defense,
        action_result,
        smackdown,
        "attack resolved"
    );
    AttackOutcome {
        boxcars: swerve.boxcars,
        swerve,
        fortune_bonus,
        action_result,
        hit,
        smackdown,
        toughness,
        wounds,
        fortune_spent: setup.use_fortune,
        shot_cost: setup.shot_cost,
    }
}

/// Roll the swerve (and the fortune die, if spent) and resolve.
pub fn roll_attack<R: Rng + ?Sized>(
    setup: &AttackSetup,
    rng: &mut R,
    defense: i32,
    toughness: i32,
) -> AttackOutcome {
    let swerve = dice::roll_swerve(rng);
    let fortune = setup
        .use_fortune
        .then(|| dice::roll_exploding(|| dice::roll_die(rng)));
    resolve_attack(setup, swerve, fortune.as_ref(), defense, toughness)
}

/// Apply an outcome: deduct spent fortune from the attacker and, on a hit,
/// the smackdown to the target. Returns the new attacker and target.
pub fn commit_attack(
    attacker: &Character,
    target: &Character,
    outcome: &AttackOutcome,
    mooks_defeated: u32,
    rules: &CombatRules,
) -> (Character, Character) {
    let attacker = if outcome.fortune_spent {
        damage::spend_fortune(attacker)
    } else {
        attacker.clone()
    };
    let target = if outcome.hit {
        let hit = Smackdown::new(outcome.smackdown)
            .with_toughness(outcome.toughness)
            .defeating(mooks_defeated);
        damage::take_smackdown(target, &hit, rules)
    } else {
        target.clone()
    };
    (attacker, target)
}
