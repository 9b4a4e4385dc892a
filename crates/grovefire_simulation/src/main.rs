//! Headless симуляция GROVEFIRE
//!
//! Скриптованная сессия без рендера: старт, стрельба по таймеру,
//! периодический вывод registry. Первый аргумент: путь к TOML конфигу.

use std::time::Duration;

use grovefire_simulation::logger::{log_error, log_info};
use grovefire_simulation::{create_stepped_app, registry_counts, GameConfig, GamePhase, HostInput, HudState};

const STEP: Duration = Duration::from_millis(16);
const TICKS: usize = 60 * 60;

fn main() {
    let seed = 42;
    println!("Starting GROVEFIRE headless simulation (seed: {})", seed);

    let mut app = create_stepped_app(seed, STEP);

    if let Some(path) = std::env::args().nth(1) {
        match GameConfig::load(&path) {
            Ok(config) => {
                log_info(&format!("⚙️ Loaded config from {}", path));
                app.insert_resource(config);
            }
            Err(error) => log_error(&format!("❌ {} (using defaults)", error)),
        }
    }

    // Click: NotStarted → Running
    app.world_mut().send_event(HostInput::Click);

    for tick in 0..TICKS {
        // Короткое нажатие Space каждые ~250ms
        if tick % 16 == 1 {
            app.world_mut().send_event(HostInput::key_down("Space"));
            app.world_mut().send_event(HostInput::key_up("Space"));
        }

        app.update();

        if tick % 300 == 0 {
            let counts = registry_counts(app.world_mut());
            let hud = *app.world().resource::<HudState>();
            println!(
                "Tick {}: goblins {}, trolls {}, projectiles {}, packs {} | HP {}/{} score {}",
                tick,
                counts.goblins,
                counts.trolls,
                counts.projectiles,
                counts.health_packs,
                hud.health,
                hud.max_health,
                hud.score
            );
        }

        if let GamePhase::Over { final_score } = *app.world().resource::<GamePhase>() {
            println!("Game over at tick {} (final score: {})", tick, final_score);
            return;
        }
    }

    println!("Simulation complete!");
}
