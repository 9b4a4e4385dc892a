//! Player damage pipeline
//!
//! Все источники урона (снаряд, melee goblin, топор troll) приходят как
//! `PlayerDamaged` events и применяются в одном месте: здесь проверяется
//! неуязвимость и переход в game over.

use bevy::prelude::*;
use crate::components::{EnemyKind, Health, Immortality, Player, Score};
use crate::config::GameConfig;
use crate::effects::DamageFlash;
use crate::game_state::{GameOver, GamePhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageSource {
    Projectile,
    GoblinMelee,
    TrollAxe,
}

/// Event: урон по игроку (до проверки неуязвимости)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaged {
    pub amount: u32,
    pub source: DamageSource,
}

/// Event: враг убит лазером
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub score_awarded: u32,
    pub position: Vec3,
}

/// Результат применения урона к игроку
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Неуязвимость: урон полностью подавлен
    Suppressed,
    Applied { remaining: u32 },
    Fatal,
}

/// Применяет урон к игроку (saturating, clamp к 0)
pub fn apply_player_damage(health: &mut Health, immortality: &Immortality, amount: u32) -> DamageOutcome {
    if immortality.active {
        return DamageOutcome::Suppressed;
    }

    health.take_damage(amount);
    if health.is_alive() {
        DamageOutcome::Applied {
            remaining: health.current,
        }
    } else {
        DamageOutcome::Fatal
    }
}

/// System: PlayerDamaged → Health, damage flash, game over
///
/// После фатального удара оставшиеся события тика игнорируются.
pub fn process_player_damage(
    mut events: EventReader<PlayerDamaged>,
    mut players: Query<(&mut Health, &Immortality, &Score), With<Player>>,
    mut phase: ResMut<GamePhase>,
    mut flash: ResMut<DamageFlash>,
    config: Res<GameConfig>,
    mut game_over: EventWriter<GameOver>,
) {
    let Ok((mut health, immortality, score)) = players.single_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        if !phase.is_running() {
            continue;
        }

        match apply_player_damage(&mut health, immortality, event.amount) {
            DamageOutcome::Suppressed => {
                crate::logger::log(&format!("🛡️ {:?} damage {} suppressed (immortal)", event.source, event.amount));
            }
            DamageOutcome::Applied { remaining } => {
                flash.trigger(config.effects.damage_flash_ms);
                crate::logger::log(&format!(
                    "💢 Player took {} from {:?} (HP: {})",
                    event.amount, event.source, remaining
                ));
            }
            DamageOutcome::Fatal => {
                flash.trigger(config.effects.damage_flash_ms);
                *phase = GamePhase::Over {
                    final_score: score.points,
                };
                game_over.write(GameOver {
                    final_score: score.points,
                });
                crate::logger::log_info(&format!(
                    "☠️ Game over! Killed by {:?}, final score: {}",
                    event.source, score.points
                ));
            }
        }
    }
}
