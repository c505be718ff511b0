//! Simulation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Load the TC script
//!     - Main loop:
//!         - Telecommand processing, TCs from the script due at the current
//!           simulation time
//!         - Simulation processing, one cycle of the mode arbiter
//!         - Archiving of the cycle's telemetry
//!         - Cycle management, only pacing to the wall clock in realtime mode
//!     - Save the trajectory
//!
//! The simulation stops once the requested duration has been simulated or,
//! without a duration, once the script has ended and the vehicle has returned
//! to manual control.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use comms_if::tm::{ModeKind, PoseTm, SimTm};
use sim_lib::{
    mode_arbiter::{InputData, ModeArbiter},
    params::SimParams,
    tc_processor
};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter, LogSink},
    module::State,
    params::LoadError,
    script_interpreter::{ScriptInterpreter, PendingTcs},
    session::Session,
    time::duration_to_seconds
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "sim_exec", about = "Differential drive vehicle simulation")]
struct Opts {
    /// TC script to execute
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Simulated time to run for, in seconds
    #[structopt(short, long)]
    duration: Option<f64>,

    /// Pace the simulation to the wall clock
    #[structopt(short, long)]
    realtime: bool,

    /// Parameter file, relative to the params directory
    #[structopt(short, long, default_value = "sim.toml")]
    params: String,

    /// Minimum log level, one of info, debug or trace
    #[structopt(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Only log to the session log file
    #[structopt(short, long)]
    quiet: bool
}

/// A single row of the telemetry archive.
#[derive(Debug, Serialize)]
struct TmRecord {
    time_s: f64,
    mode: ModeKind,
    x_m: f64,
    y_m: f64,
    heading_rad: f64,
    left_rads: f64,
    right_rads: f64,
    left_rpm: f64,
    right_rpm: f64,
    traj_len: usize,
    num_notifications: usize
}

/// Summary of the run, saved at the end of the session.
#[derive(Debug, Serialize)]
struct RunSummary {
    num_cycles: u64,
    sim_time_s: f64,
    final_mode: ModeKind,
    final_pose: PoseTm,
    trajectory: Vec<[f64; 2]>
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "sim_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    let sink = if opts.quiet { LogSink::FileOnly } else { LogSink::ConsoleAndFile };
    logger_init(opts.log_level, sink, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Differential Drive Simulation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let params: SimParams = match util::params::load(&opts.params) {
        Ok(p) => p,
        Err(LoadError::FileLoadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Parameter file {} not found, using defaults", opts.params);
            SimParams::default()
        },
        Err(e) => return Err(e).wrap_err("Could not load the simulation parameters")
    };

    let cycle_period_s = params.cycle_period_s;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    let mut script = match opts.script {
        Some(ref path) => {
            info!("Loading script from {:?}", path);

            let si = ScriptInterpreter::new(path)
                .wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            Some(si)
        },
        None => None
    };

    if script.is_none() && opts.duration.is_none() {
        return Err(eyre!("Expected a script, a duration or both"));
    }

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut sim = ModeArbiter::default();
    sim.init(params)
        .wrap_err("Failed to initialise the simulation")?;
    info!("ModeArbiter init complete");

    let mut tm_archiver = Archiver::from_path(&session, "sim_tm.csv")
        .wrap_err("Failed to open the telemetry archive")?;

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let run_start = chrono::Utc::now();
    let mut num_cycles: u64 = 0;
    let mut num_cycle_overruns: u64 = 0;
    let mut end_of_script = script.is_none();

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- STOP CONDITIONS ----

        match opts.duration {
            Some(d) if sim.time_s() >= d => {
                info!("Simulated {:.02} s, stopping", d);
                break
            },
            None if end_of_script && sim.mode_kind() == ModeKind::Manual => {
                info!("Script complete and vehicle under manual control, stopping");
                break
            },
            _ => ()
        }

        // ---- TELECOMMAND PROCESSING ----

        let mut input = InputData::default();

        if let Some(ref mut si) = script {
            match si.get_pending_tcs(sim.time_s()) {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        tc_processor::exec(&mut input, tc);
                    }
                },
                PendingTcs::EndOfScript => {
                    if !end_of_script {
                        info!("End of TC script reached");
                        end_of_script = true;
                    }
                }
            }
        }

        // ---- SIMULATION PROCESSING ----

        let (tm, report) = sim.proc(&input)
            .wrap_err("Error during simulation processing")?;

        trace!("Sim status: {:?}", report);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = tm_archiver.serialise(TmRecord::from(&tm)) {
            warn!("Could not archive telemetry: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        num_cycles += 1;

        if !opts.realtime {
            continue;
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => thread::sleep(d),
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period_s
                );
                num_cycle_overruns += 1;
            }
        }
    }

    // ---- SHUTDOWN ----

    let wall_time_s = duration_to_seconds(chrono::Utc::now() - run_start)
        .unwrap_or(f64::NAN);

    info!(
        "Simulated {:.02} s in {} cycles, taking {:.03} s ({} overruns)",
        sim.time_s(), num_cycles, wall_time_s, num_cycle_overruns
    );

    let summary = RunSummary {
        num_cycles,
        sim_time_s: sim.time_s(),
        final_mode: sim.mode_kind(),
        final_pose: sim.pose().to_tm(),
        trajectory: sim.traj_snapshot()
    };

    let summary_path = session.save_json("run_summary.json", &summary)
        .wrap_err("Failed to save the run summary")?;
    info!("Run summary saved to {:?}", summary_path);

    info!("End of execution");

    Ok(())
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl From<&SimTm> for TmRecord {
    fn from(tm: &SimTm) -> Self {
        Self {
            time_s: tm.time_s,
            mode: tm.mode,
            x_m: tm.pose.x_m,
            y_m: tm.pose.y_m,
            heading_rad: tm.pose.heading_rad,
            left_rads: tm.wheel_rates_rads[0],
            right_rads: tm.wheel_rates_rads[1],
            left_rpm: tm.wheel_rpm[0],
            right_rpm: tm.wheel_rpm[1],
            traj_len: tm.traj_len,
            num_notifications: tm.notifications.len()
        }
    }
}
