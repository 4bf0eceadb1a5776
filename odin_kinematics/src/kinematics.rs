/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! euclidean kinematics. This module collects the maneuver families (turns, direct-to, ground speed and
//! vertical speed acceleration, level-out) so that clients can `use odin_kinematics::kinematics::*`, and adds
//! combined maneuvers and loss of separation probes

pub use crate::turn::*;
pub use crate::direct_to::*;
pub use crate::gs_accel::*;
pub use crate::vs_accel::*;
pub use crate::level_out::*;

use odin_common::vect::Vect3;
use odin_common::warn;
use crate::velocity::Velocity;

/// sampling step of the loss of separation probes
pub const LOS_TIME_STEP: f64 = 1.0;

/// acceleration magnitude of a maneuver that derives the sign from its goal. Negative input is corrected
/// with a warning
pub(crate) fn accel_magnitude (accel: f64, op: &str)->f64 {
    if accel < 0.0 {
        warn!("{}: negative acceleration {} corrected", op, accel);
        -accel
    } else {
        accel
    }
}

#[inline] pub fn track_from (p1: &Vect3, p2: &Vect3)->f64 { (*p2 - *p1).vect2().trk() }

/// simultaneous turn towards `goal_trk` and vertical acceleration towards `goal_vs`
pub fn vs_accel_and_turn_until (s: &Vect3, v: &Velocity, t: f64, goal_trk: f64, goal_vs: f64, max_bank: f64, vs_accel: f64)->(Vect3,Velocity) {
    let (ts,tv) = turn_until( s, v, t, goal_trk, max_bank);
    let (vs,vv) = vs_accel_until( s, v, t, goal_vs, vs_accel);
    (Vect3::new( ts.x, ts.y, vs.z), Velocity::from_xyz( tv.x(), tv.y(), vv.z()))
}

// sample own positions every LOS_TIME_STEP until stop_time and check against linear intruder
fn probe_los<F> (own_at: F, si: &Vect3, vi: &Velocity, stop_time: f64, d: f64, h: f64)->bool where F: Fn(f64)->Vect3 {
    let mut t = 0.0;
    while t < stop_time {
        let so_t = own_at(t);
        let si_t = si.linear( &vi.vect3(), t);
        let ds = so_t - si_t;
        if ds.norm_2d() < d && ds.z.abs() < h { return true }
        t += LOS_TIME_STEP;
    }
    false
}

/// is there a loss of horizontal (`d`) and vertical (`h`) separation while own turns towards the track of `nvo`
pub fn test_los_trk (so: &Vect3, vo: &Velocity, nvo: &Velocity, si: &Vect3, vi: &Velocity, bank_own: f64, stop_time: f64, d: f64, h: f64)->bool {
    probe_los( |t| turn_until( so, vo, t, nvo.trk(), bank_own).0, si, vi, stop_time, d, h)
}

/// is there a loss of separation while own accelerates towards the ground speed of `nvo`
pub fn test_los_gs (so: &Vect3, vo: &Velocity, nvo: &Velocity, si: &Vect3, vi: &Velocity, gs_accel_own: f64, stop_time: f64, d: f64, h: f64)->bool {
    probe_los( |t| gs_accel_until( so, vo, t, nvo.gs(), gs_accel_own).0, si, vi, stop_time, d, h)
}

/// is there a loss of separation while own accelerates towards the vertical speed of `nvo`
pub fn test_los_vs (so: &Vect3, vo: &Velocity, nvo: &Velocity, si: &Vect3, vi: &Velocity, vs_accel_own: f64, stop_time: f64, d: f64, h: f64)->bool {
    probe_los( |t| vs_accel_until( so, vo, t, nvo.vs(), vs_accel_own).0, si, vi, stop_time, d, h)
}
