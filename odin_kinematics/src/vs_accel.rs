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

//! vertical speed acceleration, optionally with a linear ramp up of the acceleration

use odin_common::numeric::{almost_equals, almost_greater_prec, almost_geq_prec, Precision};
use odin_common::vect::Vect3;
use crate::velocity::Velocity;
use crate::turn::linear;
use crate::kinematics::accel_magnitude;

/// time step of the iterative acceleration rate integration
pub const ACCEL_RATE_TIME_STEP: f64 = 0.1;

pub fn vs_accel_pos (so3: &Vect3, vo3: &Velocity, t: f64, a: f64)->Vect3 {
    Vect3::new( so3.x + t*vo3.x(), so3.y + t*vo3.y(), so3.z + vo3.z()*t + 0.5*a*t*t)
}

/// position and velocity after changing the vertical speed with (signed) acceleration `a` for `t` seconds
pub fn vs_accel (so3: &Vect3, vo3: &Velocity, t: f64, a: f64)->(Vect3,Velocity) {
    let nvo = vo3.with_vs( vo3.vs() + a*t);
    (vs_accel_pos( so3, vo3, t, a), nvo)
}

/// time to reach `goal_vs`. Zero acceleration gives an infinite time unless no change is needed
pub fn vs_accel_time (vs: f64, goal_vs: f64, vs_accel: f64)->f64 {
    let vs_accel = accel_magnitude( vs_accel, "vs_accel_time");
    let delta_vs = vs - goal_vs;
    if delta_vs == 0.0 { 0.0 } else { delta_vs.abs() / vs_accel }
}

#[inline] pub fn vs_accel_time_vel (vo: &Velocity, goal_vs: f64, vs_accel: f64)->f64 { vs_accel_time( vo.vs(), goal_vs, vs_accel) }

/// position, velocity and time at which `goal_vs` is reached
pub fn vs_accel_goal (so: &Vect3, vo: &Velocity, goal_vs: f64, vs_accel: f64)->(Vect3,Velocity,f64) {
    let vs_accel = accel_magnitude( vs_accel, "vs_accel_goal");
    let sgn = if goal_vs < vo.vs() { -1.0 } else { 1.0 };
    let accel_time = vs_accel_time_vel( vo, goal_vs, vs_accel);
    let nso = vs_accel_pos( so, vo, accel_time, sgn * vs_accel);
    (nso, Velocity::from_xyz( vo.x(), vo.y(), goal_vs), accel_time)
}

/// accelerate vertically towards `goal_vs`, then continue with constant vertical speed
pub fn vs_accel_until (so: &Vect3, vo: &Velocity, t: f64, goal_vs: f64, vs_accel: f64)->(Vect3,Velocity) {
    let vs_accel = accel_magnitude( vs_accel, "vs_accel_until");
    let accel_time = vs_accel_time_vel( vo, goal_vs, vs_accel);
    let a = if goal_vs < vo.vs() { -vs_accel } else { vs_accel };

    if t <= accel_time {
        self::vs_accel( so, vo, t, a)
    } else {
        let pos_end = vs_accel_pos( so, vo, accel_time, a);
        let nvo = Velocity::from_xyz( vo.x(), vo.y(), goal_vs);
        linear( &pos_end, &nvo, t - accel_time)
    }
}

/// time for a flight level change of `delta_z` at `vs_flc`, optionally including the time to reach that speed
pub fn time_needed_for_flc (delta_z: f64, vs_flc: f64, vs_accel: f64, kinematic: bool)->f64 {
    if kinematic {
        (delta_z / vs_flc).abs() + (vs_flc / vs_accel).abs()
    } else {
        (delta_z / vs_flc).abs()
    }
}

// altitude change while the acceleration ramps up linearly from 0 to alpha over t_ramp
fn gamma (voz: f64, alpha: f64, t_ramp: f64, t: f64)->f64 {
    if t_ramp == 0.0 { 0.0 } else { voz*t + (1.0/6.0)*alpha*t*t*t/t_ramp }
}

fn rho (voz: f64, alpha: f64, t_ramp: f64, t: f64)->f64 {
    voz*t + 0.5*alpha*t*(t - t_ramp)
}

/// vertical acceleration towards `goal_vs` where the acceleration ramps up linearly over `t_ramp` seconds.
/// The goal speed can be reached while still ramping up
pub fn vs_accel_until_with_ramp_up (so: &Vect3, vo: &Velocity, t: f64, goal_vs: f64, vs_accel: f64, t_ramp: f64)->(Vect3,Velocity) {
    let vs_accel = accel_magnitude( vs_accel, "vs_accel_until_with_ramp_up");
    if almost_equals( t_ramp, 0.0) { return vs_accel_until( so, vo, t, goal_vs, vs_accel) }

    let hs = so.linear( &vo.vect3(), t);
    let a = if goal_vs < vo.vs() { -vs_accel } else { vs_accel };
    let voz = vo.z();
    let delta_v = (goal_vs - vo.vs()).abs();

    let (nz, nvz) = if delta_v < 0.5*vs_accel*t_ramp { // goal reached before ramp up completes
        let t_max = (2.0*t_ramp*(goal_vs - vo.vs())/a).sqrt();
        if t <= t_max {
            (so.z + gamma( voz, a, t_ramp, t), voz + 0.5*a*t*t/t_ramp)
        } else {
            (so.z + gamma( voz, a, t_ramp, t_max) + goal_vs*(t - t_max), goal_vs)
        }
    } else {
        let t_max = (goal_vs - vo.vs() + 0.5*a*t_ramp)/a;
        if t < t_ramp {
            (so.z + gamma( voz, a, t_ramp, t), voz + 0.5*a*t*t/t_ramp)
        } else if t < t_max {
            (so.z + gamma( voz, a, t_ramp, t_ramp) + rho( voz, a, t_ramp, t) - rho( voz, a, t_ramp, t_ramp),
             voz + a*t - 0.5*a*t_ramp)
        } else {
            (so.z + gamma( voz, a, t_ramp, t_ramp) + rho( voz, a, t_ramp, t_max) - rho( voz, a, t_ramp, t_ramp) + goal_vs*(t - t_max),
             goal_vs)
        }
    };

    (Vect3::new( hs.x, hs.y, nz), vo.with_vs( nvz))
}

/// approximates the ramp by flying straight for half the ramp time before accelerating with `vs_accel`
pub fn approx_vs_accel_with_ramp_up (so: &Vect3, vo: &Velocity, t: f64, vs_accel: f64, t_ramp: f64)->(Vect3,Velocity) {
    let t1 = t.min( t_ramp / 2.0);
    let (s,v) = linear( so, vo, t1);
    self::vs_accel( &s, &v, t - t1, vs_accel)
}

/// step integration of a vertical speed change where the acceleration itself changes at a rate of
/// `max_accel/t_ramp` up to `max_accel`, symmetric around the half way speed
pub fn vs_accel_until_accel_rate_iter (so: &Vect3, vo: &Velocity, t: f64, goal_vs: f64, max_accel: f64, t_ramp: f64)->(Vect3,Velocity) {
    let max_accel = max_accel.abs();
    let t_ramp = t_ramp.abs();
    let accel_rate = max_accel / t_ramp;
    let dt = ACCEL_RATE_TIME_STEP;
    let prec = Precision::P5;

    let mut s = *so;
    let mut v = *vo;
    if t < dt { return (s,v) }

    let sgn = if v.vs() > goal_vs { -1.0 } else { 1.0 };
    let half_goal = (goal_vs + v.vs()) / 2.0;
    let mut delta = (half_goal - v.vs()).abs();
    let mut cur_accel = 0.0;
    let mut ramp_up_time = 0.0;
    let mut half_time = 0.0;
    let mut cur_time = 0.0;

    macro_rules! step { () => {
        v = v.with_vs( v.vs() + cur_accel*dt);
        s = s.add_scal( dt, &v.vect3());
        if almost_geq_prec( cur_time, t, prec) { return (s,v) }
    }}

    while cur_accel < max_accel && almost_greater_prec( delta, 0.0, prec) { // ramp up
        ramp_up_time += dt;
        half_time += dt;
        cur_time += dt;
        cur_accel += accel_rate * sgn * dt;
        delta -= cur_accel.abs() * dt;
        step!();
    }
    while almost_greater_prec( delta, 0.0, prec) { // constant accel to half way
        half_time += dt;
        cur_time += dt;
        delta -= cur_accel.abs() * dt;
        step!();
    }
    while half_time > ramp_up_time { // constant accel past half way
        half_time -= dt;
        cur_time += dt;
        step!();
    }
    while almost_greater_prec( cur_accel.abs(), 0.0, prec) { // ramp down
        cur_time += dt;
        cur_accel -= accel_rate * sgn * dt;
        step!();
    }

    if cur_time < t {
        s = s.add_scal( t - cur_time, &v.vect3());
    }
    (s,v)
}
