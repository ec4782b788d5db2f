use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use rewind_engine::core::{RewindCtx, TimeMachine, TimeMachineConfig};
use rewind_engine::logging::{init_logging, LoggingConfig};
use rewind_engine::observer::TimeObserver;
use rewind_engine::time::Playback;

const FRAME_DT: f64 = 1.0 / 32.0;

// ── observers ─────────────────────────────────────────────────────────────

/// Moves at constant speed; position follows the clock in both directions.
struct Projectile {
    position: f64,
    speed: f64,
}

impl TimeObserver for Projectile {
    fn on_time_advance(&mut self, delta: f64, _ctx: &mut RewindCtx<'_>) {
        self.position += self.speed * delta;
    }
}

/// Spawns a crate on every whole second crossed going forward. Each spawn is
/// recorded as undoable so rewinding removes it again.
struct Arena {
    crates: Rc<RefCell<Vec<f64>>>,
    last_now: f64,
}

impl TimeObserver for Arena {
    fn on_time_advance(&mut self, delta: f64, ctx: &mut RewindCtx<'_>) {
        let now = ctx.now();
        if delta > 0.0 {
            let mut k = self.last_now.floor() + 1.0;
            while k <= now {
                self.crates.borrow_mut().push(k);
                let crates = self.crates.clone();
                let spawned_at = k;
                ctx.add_rewind_action(move || {
                    let mut crates = crates.borrow_mut();
                    let before = crates.len();
                    crates.retain(|&c| c != spawned_at);
                    anyhow::ensure!(crates.len() < before, "crate {spawned_at} already gone");
                    Ok(())
                });
                k += 1.0;
            }
        }
        self.last_now = now;
    }

    fn on_end_frame_set(&mut self, frame: i64) {
        log::info!("arena: scrub committed at frame {frame}, {} crate(s)", self.crates.borrow().len());
    }
}

/// Mirrors the scrub slider.
#[derive(Default)]
struct Preview {
    shown: Vec<i64>,
}

impl TimeObserver for Preview {
    fn on_time_advance(&mut self, _delta: f64, _ctx: &mut RewindCtx<'_>) {}

    fn on_frame_set(&mut self, frame: i64) {
        self.shown.push(frame);
    }

    fn on_end_frame_set(&mut self, frame: i64) {
        log::info!("preview: {} frame(s) scrubbed, settled on {frame}", self.shown.len());
        self.shown.clear();
    }
}

// ── session ───────────────────────────────────────────────────────────────

fn run_frames(tm: &mut TimeMachine, playback: &Playback, frames: usize) {
    for _ in 0..frames {
        let jump = playback.step(tm, FRAME_DT);
        for failure in &jump.failures {
            log::warn!("{failure}");
        }
        if !tm.is_rewind_time() {
            tm.set_frame_count(tm.frame_count() + if playback.is_reversed() { -1 } else { 1 });
        }
    }
}

fn main() -> Result<()> {
    let logging = if std::env::args().any(|a| a == "--verbose") {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    init_logging(logging);

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          REWIND STUDIO  v0.1           ║");
    println!("  ║   headless timeline  ·  undo on rewind ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let config = TimeMachineConfig {
        time_epsilon: 1e-9,
        rewind_capacity: Some(4096),
        ..Default::default()
    };
    let mut tm = TimeMachine::with_config(config).context("invalid time machine config")?;

    let projectile = Rc::new(RefCell::new(Projectile { position: 0.0, speed: 3.0 }));
    let crates = Rc::new(RefCell::new(Vec::new()));
    let arena = Rc::new(RefCell::new(Arena { crates: crates.clone(), last_now: 0.0 }));
    let preview = Rc::new(RefCell::new(Preview::default()));

    tm.register(&projectile);
    tm.register(&arena);
    tm.register(&preview);

    let mut playback = Playback::new();

    // ── play ──────────────────────────────────────────────────────────────
    run_frames(&mut tm, &playback, 128);
    println!(
        "  [PLAY]    t={:>6.3}  frame={:>3}  projectile={:>6.3}  crates={:?}",
        tm.time(),
        tm.frame_count(),
        projectile.borrow().position,
        crates.borrow()
    );

    // ── rewind ────────────────────────────────────────────────────────────
    playback.reverse();
    run_frames(&mut tm, &playback, 48);
    println!(
        "  [REWIND]  t={:>6.3}  frame={:>3}  projectile={:>6.3}  crates={:?}",
        tm.time(),
        tm.frame_count(),
        projectile.borrow().position,
        crates.borrow()
    );

    // ── hard jump back to the start ───────────────────────────────────────
    let jump = tm.set_time(0.0);
    println!(
        "  [JUMP]    t={:>6.3}  undone={}  segments={}  crates={:?}",
        tm.time(),
        jump.undone,
        jump.segments,
        crates.borrow()
    );

    // ── scrub ─────────────────────────────────────────────────────────────
    tm.set_rewind_mode(true);
    for frame in [40, 32, 24, -3] {
        tm.set_frame_count(frame);
    }
    tm.set_rewind_mode(false);
    println!("  [SCRUB]   frame={:>3}", tm.frame_count());

    // ── resume ────────────────────────────────────────────────────────────
    playback.play();
    run_frames(&mut tm, &playback, 64);
    println!(
        "  [RESUME]  t={:>6.3}  projectile={:>6.3}  crates={:?}  pending={}",
        tm.time(),
        projectile.borrow().position,
        crates.borrow(),
        tm.pending_actions()
    );
    println!();

    log::debug!("{tm:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_machine() -> (TimeMachine, Rc<RefCell<Arena>>, Rc<RefCell<Vec<f64>>>) {
        let mut tm = TimeMachine::new();
        let crates = Rc::new(RefCell::new(Vec::new()));
        let arena = Rc::new(RefCell::new(Arena { crates: crates.clone(), last_now: 0.0 }));
        tm.register(&arena);
        (tm, arena, crates)
    }

    #[test]
    fn fractional_steps_undo_the_matching_crate() {
        let (mut tm, _arena, crates) = arena_machine();
        let playback = Playback::new();
        for _ in 0..11 {
            playback.step(&mut tm, 0.2);
        }
        assert_eq!(*crates.borrow(), vec![1.0, 2.0]);

        // Crate 2 was recorded at the frame that crossed t=2, so stopping
        // just above t=1 removes it and keeps crate 1.
        let jump = tm.set_time(1.1);
        assert!(jump.failures.is_empty());
        assert_eq!(*crates.borrow(), vec![1.0]);

        tm.set_time(0.0);
        assert!(crates.borrow().is_empty());
    }

    #[test]
    fn missing_crate_is_reported_as_failure() {
        let (mut tm, _arena, crates) = arena_machine();
        tm.set_time(1.5);
        crates.borrow_mut().clear();

        let jump = tm.set_time(0.5);
        assert_eq!(jump.undone, 1);
        assert_eq!(jump.failures.len(), 1);
        assert!(jump.failures[0].to_string().contains("crate 1 already gone"));
    }
}
