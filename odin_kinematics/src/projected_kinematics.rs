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

//! kinematics for [`Position`] values.
//!
//! Geodesic start positions are projected into an [`AziEquiProjection`] centered at the start position (with zero
//! altitude, i.e. flat z values are altitudes), the euclidean maneuver is computed there and the result is mapped
//! back. This is a small angle approximation that degrades with the distance covered by the maneuver. Flat
//! positions are passed through to the euclidean functions.

use odin_common::{asin_safe, angle};
use odin_common::vect::Vect3;
use crate::position::Position;
use crate::velocity::Velocity;
use crate::projection::AziEquiProjection;
use crate::great_circle;
use crate::kinematics;
use crate::vect_funs;
use crate::errors::Result;

#[inline] fn projection_at (so: &Position)->AziEquiProjection { AziEquiProjection::new( so.lla().zero_alt()) }

/// run a euclidean maneuver `f` for the start state (so,vo) and map the result back into the frame of `so`
fn bridge<F> (so: &Position, vo: &Velocity, f: F)->(Position,Velocity) where F: FnOnce(&Vect3,&Velocity)->(Vect3,Velocity) {
    match so {
        Position::Geodesic(lla) => {
            let proj = projection_at( so);
            let (s,v) = f( &proj.project( lla), vo);
            proj.inverse_state( &s, &v, true)
        }
        Position::Flat(s3) => {
            let (s,v) = f( s3, vo);
            (Position::Flat(s), v)
        }
    }
}

/// map flat positions back through the projection, if there is one
fn to_frame (proj: &Option<AziEquiProjection>, p: &Vect3)->Position {
    match proj {
        Some(proj) => Position::Geodesic( proj.inverse( p)),
        None => Position::Flat( *p)
    }
}

/// project `so` and a second position into the same flat frame
fn project_pair (so: &Position, p: &Position)->(Option<AziEquiProjection>,Vect3,Vect3) {
    if so.is_lat_lon() {
        let proj = projection_at( so);
        let s3 = proj.project_position( so);
        let p3 = proj.project_position( p);
        (Some(proj), s3, p3)
    } else {
        (None, so.vect3(), p.vect3())
    }
}

/* #region turn geometry *****************************************************************************************/

/// turn angle of a turn with radius `r` that connects s1 and s2
pub fn turn_angle (s1: &Position, s2: &Position, r: f64)->f64 {
    let dist_ab = s1.distance_h( s2);
    2.0 * asin_safe( dist_ab / (2.0*r))
}

#[inline] pub fn turn_distance (s1: &Position, s2: &Position, r: f64)->f64 { turn_angle( s1, s2, r) * r }

/// is the shortest turn from v1 at s1 towards s2 a right turn
pub fn clockwise (s1: &Position, v1: &Velocity, s2: &Position)->bool {
    let trk2 = match s1 {
        Position::Geodesic(lla) => great_circle::velocity_initial( lla, &s2.lla(), 1.0).trk(),
        Position::Flat(v) => (s2.vect3() - *v).vect2().trk()
    };
    angle::clockwise( v1.trk(), trk2)
}

/// unsigned turn delta between two tracks at `so`, measured in the projected frame for geodesic positions
pub fn turn_delta (so: &Position, trk1: f64, trk2: f64)->f64 {
    match so {
        Position::Geodesic(lla) => {
            let proj = projection_at( so);
            let alpha = proj.project_velocity( lla, &Velocity::from_trk_gs_vs( trk1, 100.0, 0.0)).trk();
            let beta = proj.project_velocity( lla, &Velocity::from_trk_gs_vs( trk2, 100.0, 0.0)).trk();
            angle::turn_delta( alpha, beta)
        }
        Position::Flat(_) => angle::turn_delta( trk1, trk2)
    }
}

/* #endregion turn geometry */

/* #region maneuvers *********************************************************************************************/

pub fn linear (so: &Position, vo: &Velocity, t: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::linear( s, v, t))
}

pub fn turn (so: &Position, vo: &Velocity, t: f64, r: f64, turn_right: bool)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn( s, v, t, r, turn_right))
}

pub fn turn_omega (so: &Position, vo: &Velocity, t: f64, omega: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn_omega( s, v, t, omega))
}

/// turn with rate `omega` using a given projection, e.g. to evaluate several points of the same turn
pub fn turn_omega_with (so: &Position, vo: &Velocity, t: f64, omega: f64, proj: &AziEquiProjection)->(Position,Velocity) {
    match so {
        Position::Geodesic(lla) => {
            let (s,v) = kinematics::turn_omega( &proj.project( lla), vo, t, omega);
            proj.inverse_state( &s, &v, true)
        }
        Position::Flat(s3) => {
            let (s,v) = kinematics::turn_omega( s3, vo, t, omega);
            (Position::Flat(s), v)
        }
    }
}

pub fn turn_until (so: &Position, vo: &Velocity, t: f64, goal_track: f64, bank: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn_until( s, v, t, goal_track, bank))
}

pub fn turn_until_time (so: &Position, vo: &Velocity, t: f64, turn_time: f64, r: f64, turn_right: bool)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn_until_time_radius( s, v, t, turn_time, r, turn_right))
}

pub fn turn_until_time_omega (so: &Position, vo: &Velocity, t: f64, turn_time: f64, omega: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn_until_time_omega( s, v, t, turn_time, omega))
}

pub fn turn_until_with_roll (so: &Position, vo: &Velocity, t: f64, goal_track: f64, bank: f64, roll_time: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::turn_until_with_roll( s, v, t, goal_track, bank, roll_time))
}

/// ground speed acceleration with signed acceleration `a`
pub fn gs_accel (so: &Position, vo: &Velocity, t: f64, a: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| {
        (kinematics::gs_accel_pos( s, v, t, a), Velocity::from_trk_gs_vs( v.trk(), v.gs() + a*t, v.vs()))
    })
}

pub fn gs_accel_until (so: &Position, vo: &Velocity, t: f64, goal_gs: f64, a: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::gs_accel_until( s, v, t, goal_gs, a))
}

/// vertical speed acceleration with signed acceleration `a`
pub fn vs_accel (so: &Position, vo: &Velocity, t: f64, a: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| {
        (kinematics::vs_accel_pos( s, v, t, a), Velocity::from_xyz( v.x(), v.y(), v.z() + a*t))
    })
}

pub fn vs_accel_until (so: &Position, vo: &Velocity, t: f64, goal_vs: f64, a: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::vs_accel_until( s, v, t, goal_vs, a))
}

pub fn vs_accel_until_with_ramp_up (so: &Position, vo: &Velocity, t: f64, goal_vs: f64, a: f64, t_ramp: f64)->(Position,Velocity) {
    bridge( so, vo, |s,v| kinematics::vs_accel_until_with_ramp_up( s, v, t, goal_vs, a, t_ramp))
}

/* #endregion maneuvers */

/* #region level-out *********************************************************************************************/

/// time to reach `target_alt` with a level-out. Only the altitude matters here so nothing is projected
pub fn vs_level_out_time (so: &Position, vo: &Velocity, climb_rate: f64, target_alt: f64, a: f64)->Result<f64> {
    kinematics::vs_level_out_time( &(Vect3::new( 0.0, 0.0, so.alt()), *vo), climb_rate, target_alt, a, true)
}

/// position and velocity at time `t` of a level-out. Velocities of geodesic positions are projected
pub fn vs_level_out (so: &Position, vo: &Velocity, t: f64, climb_rate: f64, target_alt: f64, a: f64, allow_climb_rate_change: bool)->Result<(Position,Velocity)> {
    let a = kinematics::accel_magnitude( a, "vs_level_out");
    match so {
        Position::Geodesic(lla) => {
            let proj = projection_at( so);
            let sv = proj.project_state( lla, vo);
            let (s,v) = kinematics::vs_level_out( &sv, t, climb_rate, target_alt, a, -a, allow_climb_rate_change)?;
            Ok( proj.inverse_state( &s, &v, true) )
        }
        Position::Flat(s3) => {
            let (s,v) = kinematics::vs_level_out( &(*s3,*vo), t, climb_rate, target_alt, a, -a, allow_climb_rate_change)?;
            Ok( (Position::Flat(s), v) )
        }
    }
}

/// end position, velocity and time of a level-out. A zero climb rate jumps to the target altitude
pub fn vs_level_out_final (so: &Position, vo: &Velocity, climb_rate: f64, target_alt: f64, a: f64)->Result<(Position,Velocity,f64)> {
    if climb_rate == 0.0 {
        return Ok( (so.with_z( target_alt), vo.with_vs( 0.0), 0.0) )
    }

    match so {
        Position::Geodesic(lla) => {
            let proj = projection_at( so);
            let sv = proj.project_state( lla, vo);
            let fin = kinematics::vs_level_out_final( &sv, climb_rate, target_alt, a, true)?;
            let (p,v) = proj.inverse_state( &fin.s, &fin.v, true);
            Ok( (p, v, fin.t) )
        }
        Position::Flat(s3) => {
            let fin = kinematics::vs_level_out_final( &(*s3,*vo), climb_rate, target_alt, a, true)?;
            Ok( (Position::Flat( fin.s), fin.v, fin.t) )
        }
    }
}

/* #endregion level-out */

/* #region intersections and direct-to ***************************************************************************/

/// intersection of the two tracks and the time for `so` to get there. Both positions are projected relative to `so`
pub fn intersection (so: &Position, vo: &Velocity, si: &Position, vi: &Velocity)->Option<(Position,f64)> {
    let (proj, so3, si3) = project_pair( so, si);
    vect_funs::intersection( &so3, vo, &si3, vi).map( |(p,t)| (to_frame( &proj, &p), t))
}

pub fn time_of_intersection (so: &Position, vo: &Velocity, si: &Position, vi: &Velocity)->Option<f64> {
    let (_, so3, si3) = project_pair( so, si);
    vect_funs::time_of_intersection( &so3, vo, &si3, vi)
}

/// end of turn position, velocity, turn time and direction of a turn with radius `r` that points towards `wp`
pub fn direct_to_point (so: &Position, vo: &Velocity, wp: &Position, r: f64)->Result<(Position,Velocity,f64,i32)> {
    let (proj, s3, g3) = project_pair( so, wp);
    let (s,v,t,dir) = kinematics::direct_to_point( &s3, vo, &g3, r)?;

    let (p,v) = match proj {
        Some(proj) => proj.inverse_state( &s, &v, true),
        None => (Position::Flat(s), v)
    };
    Ok( (p, v, t, dir) )
}

pub fn gen_direct_to_vertex (so: &Position, vo: &Velocity, wp: &Position, bank: f64, time_before_turn: f64)->Result<(Position,f64,f64)> {
    let (proj, s3, g3) = project_pair( so, wp);
    let (vertex, t_vertex, t_turn) = kinematics::gen_direct_to_vertex( &s3, vo, &g3, bank, time_before_turn)?;
    Ok( (to_frame( &proj, &vertex), t_vertex, t_turn) )
}

pub fn gen_direct_to_vertex_list (so: &Position, vo: &Velocity, wp: &Position, bank: f64, time_before_turn: f64, time_between_pieces: f64)->Result<Vec<(Position,f64)>> {
    let (proj, s3, g3) = project_pair( so, wp);
    let vertices = kinematics::gen_direct_to_vertex_list( &s3, vo, &g3, bank, time_before_turn, time_between_pieces)?;
    Ok( vertices.iter().map( |(p,t)| (to_frame( &proj, p), *t)).collect() )
}

/* #endregion intersections and direct-to */
