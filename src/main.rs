//! Chimney Fall entry point
//!
//! Usage: `chimney-fall [CONFIG.json] [FRAMES_OUT.json]`
//!
//! Without a config file the reference parameters are used. With an output
//! path the sampled, ground-clipped frames are written there as JSON.

use std::process::ExitCode;

use chimney_fall::{SamplingConfig, SimConfig, SimulationOutput, Termination, extract_frames, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let frames_path = args.next();

    let config = match config_path {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No config given, using reference parameters");
            SimConfig::default()
        }
    };

    let output = match run(&config) {
        Ok(output) => output,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_summary(&output);

    if let Some(path) = frames_path {
        let frames = extract_frames(&output, &SamplingConfig::default());
        match frames.write_json(&path) {
            Ok(()) => log::info!(
                "Wrote {} bottom and {} top frames to {}",
                frames.bottom.len(),
                frames.top.len(),
                path
            ),
            Err(e) => {
                log::error!("{} ({})", e, path);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(output: &SimulationOutput) {
    match &output.break_event {
        Some(event) => println!("{}", event),
        None => println!("No break"),
    }
    if output.broke() {
        println!(
            "{} frames before the break, {} after",
            output.pre_break_frames(),
            output.bottom.len() - output.pre_break_frames()
        );
    }
    let reason = match output.termination {
        Termination::GroundContact => "top piece hit the ground",
        Termination::MaxTime => "time limit reached",
    };
    println!(
        "Stopped at t={:.2}s after {} steps ({})",
        output.end_time, output.steps, reason
    );
    println!(
        "Recorded {} bottom-piece frames, {} top-piece frames",
        output.bottom.len(),
        output.top.len()
    );
}
