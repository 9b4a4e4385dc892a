//! Enemy attacks: goblin ranged + melee contact, troll axe.

use bevy::prelude::*;
use crate::combat::{projectile_bundle, DamageSource, PlayerDamaged};
use crate::components::{Enemy, EnemyKind, Player};
use crate::config::GameConfig;
use crate::effects::ShakeRequested;
use crate::elapsed_ms;

/// System: goblin стреляет (cooldown) и бьёт вплотную (каждый тик)
///
/// Melee contact не ограничен cooldown: 5 урона за тик пока goblin ближе melee_range.
pub fn goblin_attacks(
    mut commands: Commands,
    mut goblins: Query<(Entity, &mut Enemy, &Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut damage: EventWriter<PlayerDamaged>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation;
    let now = elapsed_ms(&time);
    let goblin = &config.goblin;

    for (entity, mut enemy, transform) in goblins.iter_mut() {
        if !enemy.alive || !enemy.kind.is_goblin() {
            continue;
        }

        let distance = transform.translation.distance(target);

        if distance < goblin.ranged_range && enemy.action_ready(now) {
            let origin = transform.translation + Vec3::Y * goblin.projectile_launch_height;
            let velocity = (target - origin).normalize_or_zero() * goblin.projectile_speed;
            commands.spawn(projectile_bundle(origin, velocity, goblin));
            enemy.mark_action(now);

            crate::logger::log(&format!("🔴 Goblin {:?} fired at player (dist {:.1})", entity, distance));
        }

        if distance < goblin.melee_range {
            damage.write(PlayerDamaged {
                amount: goblin.melee_damage_per_tick,
                source: DamageSource::GoblinMelee,
            });
        }
    }
}

/// System: troll axe (только после приземления, cooldown 3000ms)
pub fn troll_attacks(
    mut trolls: Query<(Entity, &mut Enemy, &Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut damage: EventWriter<PlayerDamaged>,
    mut shakes: EventWriter<ShakeRequested>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation;
    let now = elapsed_ms(&time);
    let troll = &config.troll;

    for (entity, mut enemy, transform) in trolls.iter_mut() {
        if !enemy.alive || !matches!(enemy.kind, EnemyKind::Troll(_)) || !enemy.is_grounded() {
            continue;
        }

        let distance = transform.translation.distance(target);
        if distance < troll.attack_range && enemy.action_ready(now) {
            damage.write(PlayerDamaged {
                amount: troll.attack_damage,
                source: DamageSource::TrollAxe,
            });
            shakes.write(ShakeRequested::from(troll.attack_shake));
            enemy.mark_action(now);

            crate::logger::log(&format!("🪓 Troll {:?} axe attack (dist {:.1})", entity, distance));
        }
    }
}
