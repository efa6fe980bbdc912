//! `shutter simulate`: drive an integrator at a fixed frame rate

use serde::Serialize;
use shutter_core::Vec2;
use shutter_motion::{IntegratorConfig, MotionIntegrator, SpringPreset};

/// What pulls the point mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    Spring { target: Vec2, preset: SpringPreset },
    /// Release friction only, as after a fling
    Fling,
}

/// State sampled after one `run_model` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub frames: Vec<Frame>,
    /// Simulated seconds until completion
    pub duration: f32,
    /// False when the time ceiling stopped the run
    pub settled: bool,
}

/// Run a simulation from `from` with `velocity`, sampling at `fps`
pub fn run(
    config: &IntegratorConfig,
    from: Vec2,
    velocity: Vec2,
    drive: Drive,
    fps: u32,
) -> Simulation {
    let mut integrator = MotionIntegrator::with_config(config.clone());
    integrator.reset_at(from, velocity, 0.0);
    match drive {
        Drive::Spring { target, preset } => integrator.add_spring(target, preset.config()),
        Drive::Fling => integrator.add_release_deceleration(),
    }

    let frame = 1.0 / f64::from(fps.max(1));
    let mut frames = vec![Frame {
        time: 0.0,
        position: from,
        velocity,
    }];

    let mut now = 0.0;
    loop {
        now += frame;
        let step = integrator.run_model(now);
        frames.push(Frame {
            time: now,
            position: step.position,
            velocity: integrator.velocity(),
        });
        if step.done {
            break;
        }
    }

    let duration = integrator.elapsed();
    Simulation {
        frames,
        duration,
        settled: duration < config.max_duration,
    }
}

/// Parse `x,y` into a vector
pub fn parse_vec2(value: &str) -> Result<Vec2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid coordinate '{part}': {err}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_reaches_target() {
        let target = Vec2::new(200.0, -80.0);
        let sim = run(
            &IntegratorConfig::default(),
            Vec2::ZERO,
            Vec2::ZERO,
            Drive::Spring {
                target,
                preset: SpringPreset::Quick,
            },
            60,
        );

        assert!(sim.settled);
        let last = sim.frames.last().unwrap();
        assert!(last.position.approx_eq(&target, 2.0), "{:?}", last.position);
        assert!(sim.frames.windows(2).all(|pair| pair[0].time < pair[1].time));
    }

    #[test]
    fn test_fling_coasts_to_rest() {
        // 600 px/s against 1500 px/s² stops after 0.4 s and 120 px
        let sim = run(
            &IntegratorConfig::default(),
            Vec2::ZERO,
            Vec2::new(600.0, 0.0),
            Drive::Fling,
            60,
        );

        let last = sim.frames.last().unwrap();
        assert!(sim.settled);
        assert!((last.position.x - 120.0).abs() < 1.0, "{:?}", last.position);
        assert_eq!(last.velocity, Vec2::ZERO);
        assert!(sim.duration < 0.6);
    }

    #[test]
    fn test_ceiling_is_reported() {
        let config = IntegratorConfig::default().with_max_duration(0.1);
        let sim = run(
            &config,
            Vec2::ZERO,
            Vec2::ZERO,
            Drive::Spring {
                target: Vec2::new(500.0, 0.0),
                preset: SpringPreset::Slow,
            },
            30,
        );

        assert!(!sim.settled);
        assert!((sim.duration - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parse_vec2() {
        assert_eq!(parse_vec2("12.5,-3"), Ok(Vec2::new(12.5, -3.0)));
        assert_eq!(parse_vec2(" 1 , 2 "), Ok(Vec2::new(1.0, 2.0)));
        assert!(parse_vec2("12").is_err());
        assert!(parse_vec2("a,b").is_err());
    }
}
