use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use yew::prelude::*;

pub const CONFETTI_DURATION_MS: u32 = 3_000;
const EMIT_EVERY_MS: u32 = 50;
const COLORS: [&str; 4] = ["#F9D000", "#FFD700", "#FFA500", "#FF6347"];

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub from_left: bool,
    pub color: &'static str,
    /// Horizontal travel in viewport widths.
    pub dx: f64,
    /// Vertical travel in viewport heights (negative is up).
    pub dy: f64,
}

impl Particle {
    fn style(&self) -> String {
        format!(
            "background: {}; {}: 0; --dx: {:.1}vw; --dy: {:.1}vh;",
            self.color,
            if self.from_left { "left" } else { "right" },
            self.dx,
            self.dy
        )
    }
}

/// Two particles from each side per emission, fanned out around 60° / 120°.
pub fn emit(tick: usize) -> Vec<Particle> {
    (0..4)
        .map(|n| {
            let id = tick * 4 + n;
            let from_left = n < 2;
            // Deterministic spread in [-0.5, 0.5) so bursts do not look stamped.
            let jitter = ((id * 37) % 100) as f64 / 100.0 - 0.5;
            let dx = 30.0 + jitter * 20.0;
            Particle {
                id,
                from_left,
                color: COLORS[id % COLORS.len()],
                dx: if from_left { dx } else { -dx },
                dy: -35.0 + jitter * 25.0,
            }
        })
        .collect()
}

/// Side cannons that fire for [`CONFETTI_DURATION_MS`] after mounting.
#[function_component(Confetti)]
pub fn confetti() -> Html {
    let particles = use_state(Vec::<Particle>::new);

    {
        let particles = particles.clone();
        use_effect_with_deps(
            move |_| {
                let emitted = Rc::new(RefCell::new(Vec::new()));
                let tick = Rc::new(RefCell::new(0usize));
                let interval_handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

                let interval = {
                    let emitted = Rc::clone(&emitted);
                    Interval::new(EMIT_EVERY_MS, move || {
                        let mut tick = tick.borrow_mut();
                        emitted.borrow_mut().extend(emit(*tick));
                        *tick += 1;
                        particles.set(emitted.borrow().clone());
                    })
                };
                *interval_handle.borrow_mut() = Some(interval);

                let stop = {
                    let interval_handle = Rc::clone(&interval_handle);
                    Timeout::new(CONFETTI_DURATION_MS, move || {
                        interval_handle.borrow_mut().take();
                    })
                };

                move || {
                    drop(stop);
                    interval_handle.borrow_mut().take();
                }
            },
            (),
        );
    }

    html! {
        <div class="confetti-layer" aria-hidden="true">
            { for particles.iter().map(|p| html! {
                <span key={p.id} class="confetti-piece" style={p.style()}></span>
            }) }
            <style>
                {r#"
                .confetti-layer {
                    position: fixed;
                    inset: 0;
                    pointer-events: none;
                    z-index: 100;
                    overflow: hidden;
                }
                .confetti-piece {
                    position: absolute;
                    top: 50%;
                    width: 8px;
                    height: 12px;
                    border-radius: 2px;
                    opacity: 0;
                    animation: confettiFly 1.6s ease-out forwards;
                }
                @keyframes confettiFly {
                    0% { opacity: 1; transform: translate(0, 0) rotate(0deg); }
                    60% { opacity: 1; transform: translate(var(--dx), var(--dy)) rotate(360deg); }
                    100% { opacity: 0; transform: translate(var(--dx), calc(var(--dy) + 40vh)) rotate(540deg); }
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_emission_fires_both_sides() {
        let burst = emit(3);
        assert_eq!(burst.len(), 4);
        assert_eq!(burst.iter().filter(|p| p.from_left).count(), 2);
        assert!(burst.iter().filter(|p| p.from_left).all(|p| p.dx > 0.0));
        assert!(burst.iter().filter(|p| !p.from_left).all(|p| p.dx < 0.0));
        assert!(burst.iter().all(|p| p.dy < 0.0));
    }

    #[test]
    fn particle_ids_never_repeat() {
        let mut ids: Vec<usize> = (0..10).flat_map(emit).map(|p| p.id).collect();
        let total = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
