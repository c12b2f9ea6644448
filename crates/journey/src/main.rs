//! Headless journey driver: plays the built-in challenges at a fixed frame rate and
//! logs what a renderer would draw at each step.

use anyhow::{bail, Result};
use journey::{Journey, JourneyConfig, JourneyEvent, Phase, SubmitOutcome, TOTAL_STEPS};
use procgen::{Landmarks, Scenery};

/// Give up if the scripted run has not completed after this much simulated time.
const MAX_SIMULATED_SECONDS: f32 = 120.0;
/// Step at which the script returns to an earlier gate once.
const JUMP_FROM_STEP: usize = 3;
const JUMP_TO_STEP: usize = 1;
const FINALE_GLIDE_SECONDS: f32 = 3.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = JourneyConfig::load();
    if !JourneyConfig::path().exists() {
        log::info!("Writing default settings to {}", JourneyConfig::path().display());
        config.save();
    }
    let dt = config.frame_delta();

    let scenery = Scenery::generate(TOTAL_STEPS, config.scenery_seed, config.particle_count);
    log::info!(
        "Route of {} gates: {} road tiles, {} trees, {} particles",
        TOTAL_STEPS,
        scenery.road.len(),
        scenery.trees.len(),
        scenery.particles.len()
    );
    let landmarks = Landmarks::for_route(TOTAL_STEPS);
    log::debug!("Goal at {:?}, sun at {:?}", landmarks.goal, landmarks.sun);

    let mut journey = Journey::from_config(&config);
    journey.start();

    let mut answered_wrong = false;
    let mut jumped_back = false;

    while journey.phase() != Phase::Completed {
        if journey.time().elapsed_seconds() > MAX_SIMULATED_SECONDS {
            bail!("journey did not complete within {MAX_SIMULATED_SECONDS}s of simulated time");
        }

        if let Some(challenge) = journey.current_challenge().copied() {
            if !journey.is_input_locked() {
                journey.drag(12.0, -4.0);
                if !answered_wrong {
                    answered_wrong = journey.submit_answer("not even close") == SubmitOutcome::Incorrect;
                } else if journey.step() == JUMP_FROM_STEP && !jumped_back {
                    jumped_back = journey.jump_to_step(JUMP_TO_STEP);
                } else {
                    if challenge.hint.is_available() {
                        log::debug!("Hint for #{}: {:?}", challenge.id, challenge.hint);
                    }
                    log::debug!("Answering #{}: {}", challenge.id, challenge.prompt);
                    journey.submit_answer(challenge.expected_answer);
                }
            }
        }

        journey.advance(dt);

        for event in journey.drain_events() {
            match event {
                JourneyEvent::StepChanged(step) => {
                    let a = journey.ambience();
                    log::info!(
                        "Step {}/{}: progress {:.2}, saturation {:.3}, fog {:.4}, exposure {:.2}",
                        step,
                        journey.total(),
                        a.progress,
                        a.saturation,
                        a.fog_density,
                        a.exposure
                    );
                }
                JourneyEvent::IncorrectAnswer => log::info!("Wrong answer at step {}", journey.step()),
                JourneyEvent::PhaseChanged(phase) => log::info!("Phase changed to {:?}", phase),
            }
        }
    }

    // Let the camera glide into the finale shot.
    let glide_frames = (FINALE_GLIDE_SECONDS / dt.as_secs_f32()).ceil() as u32;
    for _ in 0..glide_frames {
        journey.advance(dt);
    }

    let uniform = journey.frame_uniform();
    log::info!(
        "Completed after {} frames ({:.1}s, {:.0} fps); camera at {:?} looking at {:?}; uniform {} bytes",
        journey.time().frame_count(),
        journey.time().elapsed_seconds(),
        journey.time().fps(),
        journey.camera().position(),
        journey.camera().look_target(),
        bytemuck::bytes_of(&uniform).len()
    );

    Ok(())
}
