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

//! ground speed acceleration along a constant track, and the solvers that find accelerations meeting
//! a required time of arrival (RTA)
//!
//! Accelerations are magnitudes (m/s²). Negative values are corrected with a warning, the sign of the
//! applied acceleration always follows from the goal speed.

use odin_common::{sign, atan2_safe};
use odin_common::numeric::{almost_equals, root};
use odin_common::vect::{Vect2, Vect3};
use odin_common::warn;
use crate::velocity::Velocity;
use crate::turn::linear;
use crate::kinematics::accel_magnitude;
use crate::errors::{Result, infeasible};

/* #region acceleration motion ***********************************************************************************/

/// position after accelerating along the current track with (signed) acceleration `a` for `t` seconds
pub fn gs_accel_pos (so3: &Vect3, vo3: &Velocity, t: f64, a: f64)->Vect3 {
    let so = so3.vect2();
    let vo = vo3.vect2();
    let sk = so.add_scal( vo.norm()*t + 0.5*a*t*t, &vo.hat());
    Vect3::from_vect2( sk, so3.z + vo3.z()*t)
}

/// position and velocity after accelerating with (signed) acceleration `a` for `t` seconds
pub fn gs_accel (so: &Vect3, vo: &Velocity, t: f64, a: f64)->(Vect3,Velocity) {
    let nvo = vo.with_gs( vo.gs() + a*t);
    (gs_accel_pos( so, vo, t, a), nvo)
}

/// time to change ground speed from `gs0` to `goal_gs`. Fails if the speeds differ and the acceleration is zero
pub fn gs_accel_time (gs0: f64, goal_gs: f64, gs_accel: f64)->Result<f64> {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_time");
    let delta_gs = (gs0 - goal_gs).abs();

    if delta_gs == 0.0 { return Ok(0.0) }
    if gs_accel == 0.0 { return Err( infeasible("zero acceleration cannot change ground speed")) }
    Ok( delta_gs / gs_accel )
}

#[inline] pub fn gs_accel_time_vel (vo: &Velocity, goal_gs: f64, gs_accel: f64)->Result<f64> { gs_accel_time( vo.gs(), goal_gs, gs_accel) }

/// position, velocity and time at which `goal_gs` is reached
pub fn gs_accel_goal (so: &Vect3, vo: &Velocity, goal_gs: f64, gs_accel: f64)->Result<(Vect3,Velocity,f64)> {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_goal");
    let sgn = if goal_gs < vo.gs() { -1.0 } else { 1.0 };
    let accel_time = gs_accel_time_vel( vo, goal_gs, gs_accel)?;

    let nso = gs_accel_pos( so, vo, accel_time, sgn * gs_accel);
    Ok( (nso, vo.with_gs( goal_gs), accel_time) )
}

/// accelerate towards `goal_gs` and continue with constant speed once it is reached
pub fn gs_accel_until (so: &Vect3, vo: &Velocity, t: f64, goal_gs: f64, gs_accel: f64)->(Vect3,Velocity) {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_until");
    let accel_time = gs_accel_time_vel( vo, goal_gs, gs_accel).unwrap_or( f64::INFINITY);
    let a = if goal_gs < vo.gs() { -gs_accel } else { gs_accel };

    if t <= accel_time {
        self::gs_accel( so, vo, t, a)
    } else {
        let (s,v) = self::gs_accel( so, vo, accel_time, a);
        self::gs_accel( &s, &v, t - accel_time, 0.0)
    }
}

/// like `gs_accel_until` but with half of `ramp_time` flown at the initial speed
pub fn gs_accel_until_with_ramp (so: &Vect3, vo: &Velocity, t: f64, goal_gs: f64, gs_accel: f64, ramp_time: f64)->(Vect3,Velocity) {
    let rmp_tm = t.min( ramp_time / 2.0);
    let (s,v) = linear( so, vo, rmp_tm);
    gs_accel_until( &s, &v, t - rmp_tm, goal_gs, gs_accel)
}

/* #endregion acceleration motion */

/* #region RTA solvers *******************************************************************************************/

/// ground speed reached and acceleration time so that `dist` is covered in `rta` seconds when accelerating
/// first and then flying at constant speed. The sign of the acceleration follows from the average speed needed
pub fn gs_accel_to_rta (gs_in: f64, dist: f64, rta: f64, gs_accel: f64)->Result<(f64,f64)> {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_to_rta");
    let avg_gs = dist / rta;
    let a = if avg_gs < gs_in { -gs_accel } else { gs_accel };

    let aa = 0.5*a;
    let bb = -a*rta;
    let cc = dist - gs_in*rta;
    let d = (bb*bb - 4.0*aa*cc).sqrt();
    let ta = (-bb + d) / (2.0*aa);
    let tb = (-bb - d) / (2.0*aa);

    let t = if ta >= 0.0 && ta <= rta {
        ta
    } else if tb >= 0.0 && tb <= rta {
        tb
    } else {
        return Err( infeasible("rta not reachable with given acceleration"))
    };

    Ok( (gs_in + a*t, t) )
}

/// can `dist` be covered in `rta` seconds with signed acceleration `a`, and for how long can we accelerate
/// before reaching zero speed
pub fn gs_accel_to_rta_possible (gs_in: f64, dist: f64, rta: f64, a: f64)->(bool,f64) {
    if a > 0.0 {
        (gs_in*rta + 0.5*a*rta*rta >= dist, rta)
    } else {
        let t = rta.min( -gs_in/a);
        (gs_in*rta + 0.5*a*rta*rta <= dist, t)
    }
}

/// accelerate then fly at constant speed, like `gs_accel_to_rta`, but decelerations are limited to what
/// can be done before reaching zero ground speed
pub fn gs_accel_to_rta_ad (gs_in: f64, dist: f64, rta: f64, gs_accel: f64)->Result<(f64,f64)> {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_to_rta_ad");
    let avg_gs = dist / rta;
    let sgn = if avg_gs < gs_in { -1.0 } else { 1.0 };
    let a = gs_accel * sgn;

    let (possible, t_max) = gs_accel_to_rta_possible( gs_in, dist, rta, a);
    if possible {
        let aa = 0.5*a;
        let bb = -a*rta;
        let cc = dist - gs_in*rta;
        let t = (-bb - sgn*(bb*bb - 4.0*aa*cc).sqrt()) / (2.0*aa); // the smaller positive root
        if t < t_max {
            return Ok( (gs_in + a*t, t) )
        }
    }
    Err( infeasible("rta not reachable before stopping"))
}

/// durations of the first and last acceleration phases (with signed accelerations `a1`,`a2`) that change the
/// speed from `gs1` to `gs3` while covering `d` in `t` seconds
fn gs_accel_to_rtav_phases (gs1: f64, gs3: f64, d: f64, t: f64, a1: f64, a2: f64)->Option<(f64,f64)> {
    let x01 = (gs3 - gs1)/a2;
    let x02 = -(a1/a2);
    let x03 = t - x01;
    let x04 = x02 + 1.0;
    let x05 = x03*gs1;
    let x06 = x03*a1 - x04*gs1;
    let x07 = x04*a1;
    let x08 = x01*gs1 + 0.5*a2*x01*x01;
    let x09 = x02*gs1 + x01*a1 + x01*x02*a2;
    let x10 = x02*a1 + 0.5*a2*x02*x02;

    let aa = 0.5*a1 + x10 - x07;
    let bb = gs1 + x06 + x09;
    let cc = x05 + x08 - d;

    let (t1a, t1b) = if aa == 0.0 {
        (-cc/bb, -1.0)
    } else {
        let dd = (bb*bb - 4.0*aa*cc).sqrt();
        ((-bb + dd)/(2.0*aa), (-bb - dd)/(2.0*aa))
    };
    let t3a = x01 + x02*t1a;
    let t3b = x01 + x02*t1b;

    if t1a >= 0.0 && t3a >= 0.0 && t1a + t3a <= t {
        Some( (t1a,t3a) )
    } else if t1b >= 0.0 && t3b >= 0.0 && t1b + t3b <= t {
        Some( (t1b,t3b) )
    } else {
        None
    }
}

/// three phase speed profile (accelerate, constant, accelerate) that covers `dist` in `rta` seconds and ends at
/// `gs_out`. Returns the phase durations (t1,t2,t3) and (a1, intermediate ground speed, a2)
pub fn gs_accel_to_rtav (gs_in: f64, dist: f64, rta: f64, gs_out: f64, gs_accel: f64)->Result<((f64,f64,f64),(f64,f64,f64))> {
    let gs_accel = accel_magnitude( gs_accel, "gs_accel_to_rtav");
    for (a1,a2) in [(gs_accel,gs_accel), (-gs_accel,gs_accel), (gs_accel,-gs_accel), (-gs_accel,-gs_accel)] {
        if let Some((t1,t3)) = gs_accel_to_rtav_phases( gs_in, gs_out, dist, rta, a1, a2) {
            let t2 = rta - t1 - t3;
            let gs2 = gs_in + a1*t1;
            if gs2 >= 0.0 {
                return Ok( ((t1,t2,t3), (a1,gs2,a2)) )
            }
        }
    }
    Err( infeasible("no speed profile meets rta and final speed"))
}

/// all consistent (t1, t3, a1, a2) profiles that go from `gs1` through `gs2` to `gs3` covering `d` in `t` seconds.
/// The accelerations are derived, not given
pub fn gs_accel_to_rta_vvv (gs1: f64, gs2: f64, gs3: f64, d: f64, t: f64)->Vec<(f64,f64,f64,f64)> {
    let mut profiles = Vec::new();
    if gs1 < 0.0 || gs2 < 0.0 || gs3 < 0.0 || d < 0.0 || t < 0.0 { return profiles }

    let x01 = gs2 - gs1;
    let x03 = gs1 + 0.5*x01;
    let x04 = gs3 - gs2;
    let x05 = x04/x01;
    let x07 = gs2*t;
    let x08 = (1.0 + x05)*gs2;
    let x09 = gs2*x05;
    let x10 = 0.5*x01*x05*x05;

    let x11 = gs1 - gs2;
    let x12 = x04/x11;
    let x14 = (1.0 + x12)*gs2;
    let x15 = gs2*x12;
    let x16 = 0.5*x11*x12*x12;
    let x18 = gs1 + 0.5*x11;

    // (denominator, speed change of first phase, ratio t3/t1, a2 has same sign as a1, speed order ok)
    let cases = [
        (x03 - x08 + x09 + x10, x01, x05, true,  gs1 <= gs2 && gs2 <= gs3),
        (x03 - x14 + x15 + x16, x01, x12, false, gs1 <= gs2 && gs2 >= gs3),
        (x18 - x08 + x09 + x10, x11, x05, false, gs1 >= gs2 && gs2 <= gs3),
        (x18 - x14 + x15 + x16, x11, x12, true,  gs1 >= gs2 && gs2 >= gs3),
    ];

    for (denom, dv, ratio, same_sign, ordered) in cases {
        let t1 = (d - x07) / denom;
        let a1 = dv / t1;
        let a2 = if same_sign { a1 } else { -a1 };
        let t3 = ratio * t1;
        let t2 = t - t1 - t3;
        let d1 = gs1*t1 + 0.5*a1*t1*t1;
        let d2 = gs2*t2;
        let d3 = gs2*t3 + 0.5*a2*t3*t3;

        if ordered && t1 >= 0.0 && t3 >= 0.0 && t1 + t3 <= t && d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0 {
            profiles.push( (t1,t3,a1,a2));
        }
    }
    profiles
}

/// speed at and time to cover `dist` with (signed) acceleration `gs_accel`. Fails for negative inputs
/// and when a deceleration stops the vehicle before `dist` is covered
pub fn gs_accel_to_dist (gs_in: f64, dist: f64, gs_accel: f64)->Result<(f64,f64)> {
    if gs_in < 0.0 || dist < 0.0 { return Err( infeasible("negative speed or distance")) }
    if gs_accel == 0.0 {
        return if gs_in > 0.0 { Ok( (gs_in, dist / gs_in)) } else { Err( infeasible("zero speed and acceleration")) }
    }

    let aa = 0.5*gs_accel;
    let bb = gs_in;
    let cc = -dist;
    let d = (bb*bb - 4.0*aa*cc).sqrt();
    let ta = (-bb + d) / (2.0*aa);
    let tb = (-bb - d) / (2.0*aa);

    let t = if ta >= 0.0 { ta } else if tb >= 0.0 { tb } else { return Err( infeasible("distance not reachable")) };
    if gs_in + gs_accel*t < 0.0 {
        return Err( infeasible("deceleration stops before distance"))
    }

    Ok( (gs_in + gs_accel*t, t) )
}

/* #endregion RTA solvers */

/* #region distance helpers **************************************************************************************/

/// smallest non-negative time to cover `dist` with (signed) acceleration `gs_accel`
pub fn distance_to_gs_accel_time (gs: f64, gs_accel: f64, dist: f64)->Option<f64> {
    let t1 = root( 0.5*gs_accel, gs, -dist, 1).filter( |t| *t >= 0.0);
    let t2 = root( 0.5*gs_accel, gs, -dist, -1).filter( |t| *t >= 0.0);
    match (t1,t2) {
        (Some(t1), Some(t2)) => Some( t1.min(t2)),
        (t1, t2) => t1.or(t2)
    }
}

/// distance covered in `dt` seconds and final ground speed when accelerating towards `gs_target`
pub fn distance_with_gs_accel (gs0: f64, gs_target: f64, gs_accel: f64, dt: f64)->(f64,f64) {
    if almost_equals( gs_accel, 0.0) { return (gs0*dt, gs0) }

    let delta_gs = gs_target - gs0;
    let t0 = (delta_gs/gs_accel).abs();
    let a = sign( delta_gs) as f64 * gs_accel;

    if dt < t0 {
        (gs0*dt + 0.5*a*dt*dt, gs0 + a*dt)
    } else {
        (gs0*t0 + 0.5*a*t0*t0 + (dt - t0)*gs_target, gs_target)
    }
}

pub fn needed_dist_gs_accel (gs_in: f64, gs_target: f64, gs_accel: f64)->f64 {
    let accel_time = ((gs_in - gs_target) / gs_accel).abs();
    accel_time * (gs_in + gs_target) / 2.0
}

/// distance needed to change ground speed from `gs1` to `gs2` with acceleration magnitude `a`
pub fn gs_accel_dist (gs1: f64, gs2: f64, a: f64)->f64 {
    if gs1 == gs2 || a == 0.0 { return 0.0 }

    let delta_gs = gs2 - gs1;
    let sgn = sign( delta_gs) as f64;
    let t = delta_gs / (sgn*a);
    gs1*t + sgn*0.5*a*t*t
}

#[inline] pub fn elevation_angle (v: &Velocity)->f64 { atan2_safe( v.vs(), v.gs()) }

/// constant acceleration needed to go from `gs0` to `gs1` over distance `d` in time `t`. Warns if the
/// distance does not match the time
pub fn calc_linear_accel (gs0: f64, gs1: f64, d: f64, t: f64)->f64 {
    let a1 = (gs1 - gs0) / t;
    let a2 = (gs1*gs1 - gs0*gs0) / (2.0*d);
    if !almost_equals( a1, a2) {
        warn!("calc_linear_accel: inconsistent accelerations {} (time) and {} (distance)", a1, a2);
    }
    a1
}

/* #endregion distance helpers */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtav_phases_constant_speed() {
        // no speed change needed: both phases collapse
        let (t1,t3) = gs_accel_to_rtav_phases( 100.0, 100.0, 10_000.0, 100.0, 1.0, 1.0).unwrap();
        assert!( t1.abs() < 1e-9 && t3.abs() < 1e-9);
    }

    #[test]
    fn test_calc_linear_accel() {
        // 100 -> 110 m/s in 10s covers 1050m
        let a = calc_linear_accel( 100.0, 110.0, 1050.0, 10.0);
        assert!( (a - 1.0).abs() < 1e-9);

        // same speeds, same distance: zero acceleration
        let a = calc_linear_accel( 100.0, 100.0, 1000.0, 10.0);
        assert!( a.abs() < 1e-9);
    }
}
