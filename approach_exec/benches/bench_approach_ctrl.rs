//! # Approach Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use approach_lib::{
    approach_ctrl::{ApproachCtrl, Params},
    approach_mgr::ApproachMgr,
    sim::{BaseParams, CameraParams, SimBase, SimCamera},
    vision::{self, VisionMonitor},
};
use comms_if::eqpt::vision::TargetObservation;

fn params() -> Params {
    Params {
        rot_k_p: 0.05,
        drive_k_p: 0.1,
        angle_tol_deg: 2.0,
        area_tol_pct: 2.0,
        min_rot_dem: 0.05,
        max_rot_dem: 1.0,
        min_drive_dem: 0.05,
        max_drive_dem: 1.0,
        max_yaw_error_for_drive_deg: 5.0,
        target_area_pct: 20.0,
    }
}

fn approach_ctrl_benchmark(c: &mut Criterion) {
    let mut ctrl = ApproachCtrl::new(params()).unwrap();
    ctrl.on_start();

    let observations = [
        TargetObservation::new(0, 10.0, 5.0),
        TargetObservation::new(0, 1.0, 19.0),
        TargetObservation::new(0, -3.0, 25.0),
        TargetObservation::no_target(),
    ];

    c.bench_function("approach_ctrl_tick", |b| {
        b.iter(|| {
            for obs in observations.iter() {
                black_box(ctrl.on_tick(black_box(obs)));
            }
        })
    });

    // ---- Full closed loop cycle ----

    let mut base = SimBase::new(BaseParams {
        max_speed_m_s: 0.5,
        max_rot_rate_rad_s: 1.0,
        start_position_m: [0.0, 0.0],
        start_heading_deg: 0.0,
    });
    let mut cam = SimCamera::new(CameraParams {
        hfov_deg: 70.0,
        max_range_m: 10.0,
        area_coeff_pct_m2: 80.0,
        dropout_period: 0,
        tag_id: 4,
        tag_position_m: [4.0, 0.3],
        tag_height_m: 0.0,
    });
    let mut monitor = VisionMonitor::new(vision::Params::default());
    let mut mgr = ApproachMgr::new(ApproachCtrl::new(params()).unwrap());
    mgr.start();

    c.bench_function("approach_closed_loop_cycle", |b| {
        b.iter(|| {
            monitor.update(cam.capture(&base));
            black_box(mgr.step(&monitor, &mut base));
            base.step(0.02);
        })
    });
}

criterion_group!(benches, approach_ctrl_benchmark);
criterion_main!(benches);
