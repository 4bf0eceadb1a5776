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

//! level-out maneuvers: reach a target altitude with zero vertical speed using at most two constant
//! vertical acceleration phases separated by a constant climb (or descent) rate phase.
//!
//! Accelerations are signed here: `accel_up` is positive and `accel_down` negative, and the single
//! acceleration variants take a magnitude `a` and use `(a, -a)`.

use serde::{Serialize,Deserialize};
use odin_common::sign;
use odin_common::numeric::{almost_equals, root};
use odin_common::vect::Vect3;
use odin_common::{debug, warn};
use crate::velocity::Velocity;
use crate::state_vector::StateVector;
use crate::vs_accel::{vs_accel_pos, vs_accel_time, vs_accel_time_vel, vs_accel_until};
use crate::kinematics::accel_magnitude;
use crate::errors::{Result, infeasible};

/// phase end times and the accelerations of a level-out maneuver. Phase 1 accelerates with `a1` until `t1`,
/// phase 2 holds the climb rate until `t2` and phase 3 decelerates with `a2` to zero vertical speed at `t3`
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct LevelOutTimes {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
    pub a1: f64,
    pub a2: f64,
}

impl LevelOutTimes {
    fn shifted (&self, dt: f64)->Self {
        LevelOutTimes { t1: self.t1 + dt, t2: self.t2 + dt, t3: self.t3 + dt, ..*self }
    }
}

#[inline] fn v1 (voz: f64, a1: f64, t: f64)->f64 { voz + a1*t }
#[inline] fn s1 (voz: f64, a1: f64, t: f64)->f64 { voz*t + 0.5*a1*t*t }
#[inline] fn t3 (voz: f64, a1: f64)->f64 { -voz/a1 }
#[inline] fn s3 (voz: f64, a1: f64)->f64 { s1( voz, a1, t3( voz, a1)) }

// level-out where the initial vertical speed does not point away from the target altitude
fn vs_level_out_times_ad1 (s0z: f64, v0z: f64, climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<LevelOutTimes> {
    let alt_dir = if target_alt >= s0z { 1.0 } else { -1.0 };
    let climb_rate = if allow_climb_rate_change {
        alt_dir * climb_rate.abs().max( v0z.abs())
    } else {
        alt_dir * climb_rate.abs()
    };

    let s = target_alt - s0z;
    let a1 = if climb_rate >= v0z { accel_up } else { accel_down };
    let a2 = if target_alt >= s0z { accel_down } else { accel_up };
    let t1 = (climb_rate - v0z) / a1;

    if s.abs() >= (s1( v0z, a1, t1) + s3( v1( v0z, a1, t1), a2)).abs() {
        let t2 = (s - s1( v0z, a1, t1) - s3( v1( v0z, a1, t1), a2)) / climb_rate;
        Ok( LevelOutTimes { t1, t2: t1 + t2, t3: t1 + t2 + t3( climb_rate, a2), a1, a2 } )

    } else { // no room to reach the climb rate
        let aa = 0.5*a1*(1.0 - a1/a2);
        let bb = v0z*(1.0 - a1/a2);
        let cc = -v0z*v0z/(2.0*a2) - s;

        let r1 = root( aa, bb, cc, 1).filter( |t| *t >= 0.0);
        let r2 = root( aa, bb, cc, -1).filter( |t| *t >= 0.0);
        let t1 = match (r1,r2) {
            (Some(r1), Some(r2)) => r1.min(r2),
            (Some(r), None) | (None, Some(r)) => r,
            (None, None) => {
                debug!("no level-out to {:.1} from z={:.1} vz={:.2}", target_alt, s0z, v0z);
                return Err( infeasible("no level-out solution"))
            }
        };
        Ok( LevelOutTimes { t1, t2: t1, t3: t1 + t3( v1( v0z, a1, t1), a2), a1, a2 } )
    }
}

/// phase times of a level-out from altitude `s0z` with vertical speed `v0z` to `target_alt`
pub fn vs_level_out_times (s0z: f64, v0z: f64, climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<LevelOutTimes> {
    let sgnv = if v0z >= 0.0 { 1 } else { -1 };
    let alt_dir = if target_alt >= s0z { 1 } else { -1 };
    let s = target_alt - s0z;
    let a1 = if target_alt >= s0z { accel_up } else { accel_down };
    let a2 = if target_alt >= s0z { accel_down } else { accel_up };

    if sgnv == alt_dir || almost_equals( v0z, 0.0) {
        if s.abs() >= s3( v0z, a2).abs() {
            vs_level_out_times_ad1( s0z, v0z, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)
        } else { // we would overshoot: first stop, then come back
            let ot = vs_level_out_times_ad1( s0z + s3( v0z, a2), 0.0, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)?;
            Ok( ot.shifted( -v0z/a2) )
        }
    } else { // moving away from target altitude: first stop
        let ot = vs_level_out_times_ad1( s0z + s3( v0z, a1), 0.0, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)?;
        Ok( ot.shifted( -v0z/a1) )
    }
}

#[inline] pub fn vs_level_out_times_sv (sv0: &(Vect3,Velocity), climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<LevelOutTimes> {
    vs_level_out_times( sv0.0.z, sv0.1.z(), climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)
}

/// altitude and vertical speed at time `t` of a level-out with the given phases
pub fn vs_level_out_calc (soz: f64, voz: f64, target_alt: f64, lt: &LevelOutTimes, t: f64)->(f64,f64) {
    let LevelOutTimes { t1, t2, t3, a1, a2 } = *lt;

    if t <= t1 {
        (soz + s1( voz, a1, t), voz + a1*t)
    } else if t <= t2 {
        (soz + s1( voz, a1, t1) + v1( voz, a1, t1)*(t - t1), voz + a1*t1)
    } else if t <= t3 {
        (soz + s1( voz, a1, t1) + v1( voz, a1, t1)*(t2 - t1) + s1( v1( voz, a1, t1), a2, t - t2),
         voz + a1*t1 + a2*(t - t2))
    } else {
        (target_alt, 0.0)
    }
}

/// position and velocity at time `t` of a level-out with the given phases. Horizontal motion is linear
pub fn vs_level_out_calculation (sv0: &(Vect3,Velocity), target_alt: f64, lt: &LevelOutTimes, t: f64)->(Vect3,Velocity) {
    let (s0,v0) = sv0;
    let (nz, nvs) = vs_level_out_calc( s0.z, v0.z(), target_alt, lt, t);
    (s0.linear( &v0.vect3(), t).with_z( nz), v0.with_vs( nvs))
}

/// position and velocity at time `t` of a level-out to `target_alt`
pub fn vs_level_out (sv0: &(Vect3,Velocity), t: f64, climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<(Vect3,Velocity)> {
    let lt = vs_level_out_times_sv( sv0, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)?;
    Ok( vs_level_out_calculation( sv0, target_alt, &lt, t) )
}

/// end state of a level-out (with symmetric acceleration `a`), at the time the target altitude is reached
pub fn vs_level_out_final (sv0: &(Vect3,Velocity), climb_rate: f64, target_alt: f64, a: f64, allow_climb_rate_change: bool)->Result<StateVector> {
    let a = accel_magnitude( a, "vs_level_out_final");
    let lt = vs_level_out_times_sv( sv0, climb_rate, target_alt, a, -a, allow_climb_rate_change)?;
    if lt.t1 < 0.0 { return Err( infeasible("level-out overshoots target altitude")) }

    Ok( StateVector::from_pair( vs_level_out_calculation( sv0, target_alt, &lt, lt.t3), lt.t3) )
}

/// time at which a level-out (with symmetric acceleration `a`) reaches the target altitude
pub fn vs_level_out_time (sv0: &(Vect3,Velocity), climb_rate: f64, target_alt: f64, a: f64, allow_climb_rate_change: bool)->Result<f64> {
    let a = accel_magnitude( a, "vs_level_out_time");
    let lt = vs_level_out_times_sv( sv0, climb_rate, target_alt, a, -a, allow_climb_rate_change)?;
    if lt.t1 < 0.0 { Err( infeasible("level-out overshoots target altitude")) } else { Ok( lt.t3) }
}

/// vertical speed at the end of the first level-out phase
pub fn vs_level_out_climb_rate (sv0: &(Vect3,Velocity), climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<f64> {
    let lt = vs_level_out_times_sv( sv0, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)?;
    Ok( vs_level_out_calculation( sv0, target_alt, &lt, lt.t1).1.z() )
}

/// does the current vertical speed carry us past `target_alt` even when decelerating right away
pub fn overshoot (sv0: &(Vect3,Velocity), climb_rate: f64, target_alt: f64, accel_up: f64, accel_down: f64, allow_climb_rate_change: bool)->Result<bool> {
    let a2 = vs_level_out_times_sv( sv0, climb_rate, target_alt, accel_up, accel_down, allow_climb_rate_change)?.a2;
    let (s0,v0) = sv0;
    let sgnv = if v0.z() >= 0.0 { 1 } else { -1 };
    let alt_dir = if target_alt - s0.z >= 0.0 { 1 } else { -1 };

    Ok( sgnv == alt_dir && (target_alt - s0.z).abs() < s3( v0.z(), a2).abs() )
}

/* #region flight level changes **********************************************************************************/

/// end times of the acceleration, constant climb and deceleration segments of a climb (or descent) to `goal_alt`
/// with climb rate `goal_climb` and acceleration magnitude `vs_accel`
pub fn climb_segment_ends (s: &Vect3, v: &Velocity, goal_alt: f64, goal_climb: f64, vs_accel: f64)->Result<(f64,f64,f64)> {
    let dz = goal_alt - s.z;
    if dz == 0.0 && v.z() == 0.0 { return Ok( (0.0, 0.0, 0.0)) }

    let goal_climb = if dz < 0.0 { -goal_climb.abs() } else { goal_climb.abs() };
    if sign( goal_climb) != sign( dz) {
        warn!("climb rate {} in wrong direction for altitude change {}", goal_climb, dz);
        return Err( infeasible("climb rate in wrong direction"))
    }

    let a = vs_accel.abs();
    let dir1 = sign( goal_climb - v.z());
    let dir2 = if sign( v.z()) == sign( goal_climb) && v.z().abs() > goal_climb.abs() { dir1 } else { -dir1 };
    let a1 = a * dir1 as f64;
    let a2 = a * dir2 as f64;

    let t1 = vs_accel_time_vel( v, goal_climb, a);
    let t2 = vs_accel_time( goal_climb, 0.0, a);
    let dz1 = vs_accel_pos( &Vect3::ZERO, v, t1, a1).z;
    let dz2 = vs_accel_pos( &Vect3::ZERO, &v.with_vs( goal_climb), t2, a2).z;
    let remainder = dz - (dz2 + dz1);

    if sign( dz) as f64 * remainder >= 0.0 {
        let t_climb = t1 + remainder/goal_climb;
        return Ok( (t1, t_climb, t_climb + t2) )
    }

    // no constant climb segment
    let aa = 0.5*a1 - 0.5*a1*a1/a2;
    let bb = (1.0 - a1/a2)*v.z();
    let cc = s.z - goal_alt - 0.5*v.z()*v.z()/a2;
    if bb*bb - 4.0*aa*cc >= 0.0 {
        for eps in [1,-1] {
            if let Some(t1) = root( aa, bb, cc, eps).filter( |t| *t >= 0.0) {
                return Ok( (t1, t1, v.z()/vs_accel + 2.0*t1) )
            }
        }
    }

    debug!("no climb path to altitude {:.1}m", goal_alt);
    Err( infeasible("no climb path to target altitude"))
}

pub fn time_to_flight_level (s: &Vect3, v: &Velocity, goal_alt: f64, goal_climb: f64, vs_accel: f64)->Result<f64> {
    Ok( climb_segment_ends( s, v, goal_alt, goal_climb, vs_accel)?.2 )
}

/// accelerate to `goal_climb`, climb and then level out at `goal_alt`
pub fn vs_accel_to_flight_level (s: &Vect3, v: &Velocity, t: f64, goal_alt: f64, goal_climb: f64, vs_accel: f64)->Result<(Vect3,Velocity)> {
    let (_,t_climb,_) = climb_segment_ends( s, v, goal_alt, goal_climb, vs_accel)?;
    if t <= t_climb {
        Ok( vs_accel_until( s, v, t, goal_climb, vs_accel) )
    } else {
        let (ps,pv) = vs_accel_until( s, v, t_climb, goal_climb, vs_accel);
        Ok( vs_accel_until( &ps, &pv, t - t_climb, 0.0, vs_accel) )
    }
}

/* #endregion flight level changes */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_stops() {
        // 10 m/s with -2 m/s² stops after 5 s and 25 m
        assert!( (t3( 10.0, -2.0) - 5.0).abs() < 1e-12);
        assert!( (s3( 10.0, -2.0) - 25.0).abs() < 1e-12);
    }
}
