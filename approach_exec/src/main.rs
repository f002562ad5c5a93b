//! Main approach executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling
//!         - Vision processing:
//!             - Frame acquisition from the (simulated) camera
//!             - Target selection and camera health monitoring
//!         - Approach processing
//!         - Base simulation
//!         - Archiving
//!     - Stop the base and write the run summary
//!
//! Without a script the approach is started on the first cycle and the exec
//! stops once it completes. With a script the approach is driven by the
//! script's TCs and the exec stops once the script has ended and no approach
//! is running. In both cases the exec stops after `max_duration_s`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use approach_lib::{
    approach_ctrl::ApproachCtrl,
    approach_mgr::{ApproachMgr, ApproachMode, ApproachStats, ApproachStatus},
    data_store::DataStore,
    params::ApproachExecParams,
    sim::{self, SimBase, SimCamera, SimError},
    tc_processor,
    vision::VisionMonitor,
};
use comms_if::tc::{approach::ApproachCmd, Tc};
use util::{
    archive::{Archived, Archiver},
    host,
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Vision-guided approach executable.
#[derive(Debug, StructOpt)]
#[structopt(name = "approach_exec")]
struct Cli {
    /// Timed telecommand script to run. If not given the approach starts
    /// immediately.
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,
}

/// Summary of the run, saved into the session directory.
#[derive(Debug, Serialize)]
struct RunSummary {
    num_cycles: u64,
    elapsed_s: f64,
    approach_completed: bool,
    final_mode: ApproachMode,
    stats: ApproachStats,
    final_position_m: [f64; 2],
    final_heading_deg: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let args = Cli::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "approach_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Vision-Guided Approach Executable\n");
    let host_info = host::get_uname()
        .wrap_err("Failed to get host information")?;
    info!(
        "Running on: {} ({} {} {})",
        host_info.nodename,
        host_info.sysname,
        host_info.release,
        host_info.machine
    );
    if let Some(epoch) = util::session::get_epoch() {
        info!("Session epoch: {}", epoch);
    }
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ApproachExecParams = util::params::load("exec.toml")
        .wrap_err("Could not load exec params")?;
    exec_params.validate()
        .wrap_err("Invalid exec params")?;

    let sim_params: sim::Params = util::params::load("sim.toml")
        .map_err(SimError::ParamLoadError)
        .wrap_err("Could not load sim params")?;
    sim_params.validate()
        .wrap_err("Invalid sim params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    let mut script = match args.script {
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
        None => {
            info!("No script provided, the approach will start immediately\n");
            None
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let approach_ctrl = ApproachCtrl::init("approach_ctrl.toml", &session)
        .wrap_err("Failed to initialise ApproachCtrl")?;
    info!("ApproachCtrl init complete");

    let vision = VisionMonitor::init("vision.toml", &session)
        .wrap_err("Failed to initialise the VisionMonitor")?;
    info!("VisionMonitor init complete");

    let mut ds = DataStore::new(
        ApproachMgr::new(approach_ctrl),
        vision,
        SimBase::new(sim_params.base),
        SimCamera::new(sim_params.camera),
    );
    ds.set_sim_base_archiver(
        Archiver::from_path(&session, "sim/base.csv")
            .wrap_err("Failed to create the sim base archive")?
    );
    info!("Simulation init complete");

    info!("Module initialisation complete\n");

    if script.is_none() {
        tc_processor::exec(&mut ds, &Tc::Approach(ApproachCmd::Start));
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let mut script_ended = script.is_none();

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        ds.cycle_start(exec_params.cycle_frequency_hz());

        if ds.sim_time_s > exec_params.max_duration_s {
            warn!(
                "Maximum duration of {:.02} s reached, stopping",
                exec_params.max_duration_s
            );
            break;
        }

        // ---- TELECOMMAND PROCESSING ----

        if let Some(ref mut si) = script {
            match si.get_pending_tcs(ds.sim_time_s) {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        tc_processor::exec(&mut ds, tc);
                    }
                },
                PendingTcs::EndOfScript => {
                    if !script_ended {
                        info!("End of TC script reached");
                        script_ended = true;
                    }
                }
            }
        }

        // ---- VISION PROCESSING ----

        ds.proc_vision();

        // ---- APPROACH PROCESSING ----

        let status = ds.proc_approach();

        if ds.is_1_hz_cycle && status == ApproachStatus::Approaching {
            let report = ds.approach_mgr.ctrl().report();
            info!(
                "Approaching: yaw error {:.02} deg, area error {:.02} %, target {:?}",
                report.yaw_error_deg,
                report.area_error_pct,
                report.target_id
            );
        }

        // ---- SIMULATION ----

        ds.sim_base.step(exec_params.cycle_period_s);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.write() {
            warn!("Could not write archives: {}", e);
        }

        // ---- EXIT CHECK ----

        if script_ended && !ds.approach_mgr.is_approaching() {
            info!("No approach running and no more TCs, stopping");
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    ds.shutdown();

    let pos = ds.sim_base.position_m();
    let summary = RunSummary {
        num_cycles: ds.num_cycles,
        elapsed_s: util::session::get_elapsed_seconds(),
        approach_completed: ds.approach_completed,
        final_mode: ds.approach_mgr.mode(),
        stats: *ds.approach_mgr.stats(),
        final_position_m: [pos.x, pos.y],
        final_heading_deg: ds.sim_base.heading_rad().to_degrees(),
    };

    info!("Run summary: {:#?}", summary);
    session.save("summary.json", summary);

    info!("End of execution");

    session.exit();

    Ok(())
}
