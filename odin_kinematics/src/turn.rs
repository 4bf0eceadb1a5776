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

//! constant bank (coordinated) turns in a euclidean frame.
//!
//! Positions are in meters (x east, y north, z up), tracks are compass angles in radians and bank angles are
//! positive for right turns. A turn rate `omega` is positive for clockwise (right) turns.

use odin_common::{PI, HALF_PI, TWO_PI, atan2_safe, sign, sign_of};
use odin_common::numeric::almost_equals;
use odin_common::angle::{clockwise, turn_delta, signed_turn_delta, turn_delta_dir, turn_delta_sgn};
use odin_common::geo_constants::GRAVITY;
use odin_common::vect::{Vect2, Vect3};
use crate::velocity::Velocity;

/// fixed time step used to approximate bank angle ramps
pub const ROLL_TIME_STEP: f64 = 1.0;

/// roll times below this are not worth modeling and are treated as instantaneous
pub const MIN_ROLL_TIME: f64 = 0.1;

/// bank angle used to finish a turn with roll that came up short of the goal track
pub const LAST_BANK: f64 = 5.0 * PI / 180.0;

#[inline] fn dir_sign (turn_right: bool)->f64 { if turn_right { 1.0 } else { -1.0 } }

/* #region turn geometry *****************************************************************************************/

/// radius of a coordinated turn. Non-positive gravity is replaced by standard gravity. Bank angles of 90° or more
/// give a zero radius, a zero bank angle gives f64::MAX
pub fn turn_radius_g (speed: f64, bank: f64, g: f64)->f64 {
    let abank = bank.abs();
    let g = if g <= 0.0 { GRAVITY } else { g };

    if abank >= HALF_PI { return 0.0 }
    if abank == 0.0 { return f64::MAX }

    speed*speed / (g * abank.tan())
}

#[inline] pub fn turn_radius (speed: f64, bank: f64)->f64 { turn_radius_g( speed, bank, GRAVITY) }

pub fn turn_radius_by_rate (speed: f64, omega: f64)->f64 {
    if almost_equals( omega, 0.0) { f64::MAX } else { (speed/omega).abs() }
}

/// ground speed at which a turn with the given bank angle has radius `r`. None for bank angles of 90° or more
pub fn speed_of_turn (r: f64, bank: f64)->Option<f64> {
    let abank = bank.abs();
    if abank >= HALF_PI { None } else { Some( (GRAVITY * abank.tan() * r).sqrt()) }
}

pub fn turn_rate_radius (speed: f64, r: f64)->f64 {
    if almost_equals( r, 0.0) { f64::MAX } else { speed / r }
}

/// signed turn rate (rad/s) for the given ground speed and (signed) bank angle
pub fn turn_rate (speed: f64, bank: f64)->f64 {
    if almost_equals( bank, 0.0) { 0.0 } else { GRAVITY * bank.tan() / speed }
}

/// unsigned bank angle of a turn with radius `r`
pub fn bank_angle_radius (speed: f64, r: f64)->f64 {
    if r <= 0.0 { 0.0 } else { atan2_safe( speed*speed, r * GRAVITY) }
}

#[inline] pub fn bank_angle_radius_dir (speed: f64, r: f64, turn_right: bool)->f64 { dir_sign(turn_right) * bank_angle_radius( speed, r) }

/// max bank angle with the sign of the shortest turn towards `goal_track`
#[inline] pub fn bank_angle_goal (track: f64, goal_track: f64, max_bank: f64)->f64 { dir_sign( clockwise( track, goal_track)) * max_bank }

#[inline] pub fn bank_angle (speed: f64, turn_rate: f64)->f64 { (turn_rate * speed / GRAVITY).atan() }

pub fn turn_rate_goal (vo: &Velocity, goal_track: f64, max_bank: f64)->f64 {
    turn_rate( vo.gs(), bank_angle_goal( vo.trk(), goal_track, max_bank))
}

/// max distance from a fly-by vertex at which the turn can start, f64::MAX for a full reversal
pub fn max_fly_by_turn_distance (turn_angle: f64, max_dist: f64)->f64 {
    if almost_equals( turn_angle, PI) { return f64::MAX }
    let a = (turn_angle/2.0).sin();
    max_dist * a / (1.0 - a)
}

pub fn max_fly_by_turn_speed (turn_angle: f64, max_bank: f64, max_dist: f64)->Option<f64> {
    speed_of_turn( max_fly_by_turn_distance( turn_angle, max_dist), max_bank)
}

/// did we reach (or pass) the target track when turning in the given direction
pub fn turn_done (current_track: f64, target_track: f64, turn_right: bool)->bool {
    if turn_delta( current_track, target_track) < 0.0001 { return true }
    if turn_right { !clockwise( current_track, target_track) } else { clockwise( current_track, target_track) }
}

/// time to turn by `delta_track` with the given bank angle, f64::MAX if the bank angle is zero
pub fn turn_time (gs: f64, delta_track: f64, bank: f64)->f64 {
    let omega = turn_rate( gs, bank);
    if omega == 0.0 { f64::MAX } else { (delta_track / omega).abs() }
}

pub fn turn_time_omega (delta_track: f64, omega: f64)->f64 {
    if omega == 0.0 { f64::MAX } else { (delta_track / omega).abs() }
}

/// time for the shortest turn from the track of `v0` to `goal_track`
pub fn turn_time_to (v0: &Velocity, goal_track: f64, max_bank: f64)->f64 {
    turn_time( v0.gs(), signed_turn_delta( v0.trk(), goal_track), max_bank)
}

/// time for the turn from the track of `v0` to `goal_track` in the given direction
pub fn turn_time_dir (v0: &Velocity, goal_track: f64, max_bank: f64, turn_right: bool)->f64 {
    turn_time( v0.gs(), turn_delta_dir( v0.trk(), goal_track, turn_right), max_bank)
}

#[inline] pub fn turn_right (vo: &Velocity, goal_track: f64)->bool { clockwise( vo.trk(), goal_track) }

/* #endregion turn geometry */

/* #region turn motion *******************************************************************************************/

pub fn linear (s0: &Vect3, v0: &Velocity, t: f64)->(Vect3,Velocity) {
    (s0.linear( &v0.vect3(), t), *v0)
}

/// position and velocity after turning with rate `omega` for `t` seconds. Vertical speed is kept constant,
/// a zero turn rate is straight line motion
pub fn turn_omega (s0: &Vect3, v0: &Velocity, t: f64, omega: f64)->(Vect3,Velocity) {
    if almost_equals( omega, 0.0) { return linear( s0, v0, t) }

    let nv = v0.with_added_trk( omega * t);
    let x = s0.x + (v0.y() - nv.y()) / omega;
    let y = s0.y + (-v0.x() + nv.x()) / omega;
    let z = s0.z + v0.z() * t;
    (Vect3::new( x, y, z), nv)
}

/// center of a turn with rate `omega`
pub fn center (s0: &Vect3, v0: &Velocity, omega: f64)->Vect2 {
    let r = v0.gs() / omega;
    let trk = v0.trk();
    Vect2::new( s0.x + r * trk.cos(), s0.y - r * trk.sin())
}

/// turn with radius `r` in the given direction. A zero radius does not move
pub fn turn (s0: &Vect3, v0: &Velocity, t: f64, r: f64, turn_right: bool)->(Vect3,Velocity) {
    if almost_equals( r, 0.0) { return (*s0, *v0) }
    let omega = dir_sign( turn_right) * v0.gs() / r;
    turn_omega( s0, v0, t, omega)
}

/// turn with a signed bank angle (positive is right)
pub fn turn_bank (s0: &Vect3, v0: &Velocity, t: f64, bank: f64)->(Vect3,Velocity) {
    if almost_equals( bank, 0.0) {
        linear( s0, v0, t)
    } else {
        turn( s0, v0, t, turn_radius( v0.gs(), bank), bank >= 0.0)
    }
}

/// horizontal position (at zero altitude) and velocity after moving distance `d` around `center` in direction `dir`
pub fn turn_by_dist_2d (so: &Vect3, center: &Vect3, dir: i32, d: f64, gs_at_d: f64)->(Vect3,Velocity) {
    let r = so.distance_h( center);
    if r == 0.0 { return (*so, Velocity::INVALID) }

    let alpha = dir as f64 * d / r;
    let trk = Velocity::track( center, so) + alpha;
    let sn = center.linear_by_dist_2d( trk, r).with_z( 0.0);
    let final_trk = trk + dir as f64 * HALF_PI;
    (sn, Velocity::from_trk_gs_vs( final_trk, gs_at_d, 0.0))
}

/// horizontal position (at zero altitude) after rotating `so` around `center` by `alpha`
pub fn turn_by_angle_2d (so: &Vect3, center: &Vect3, alpha: f64)->Vect3 {
    let r = so.distance_h( center);
    let trk = Velocity::track( center, so) + alpha;
    center.linear_by_dist_2d( trk, r).with_z( 0.0)
}

/// turn with a linear delay of half the roll time to approximate roll in
pub fn approx_turn_omega_with_roll (s0: &Vect3, v0: &Velocity, t: f64, omega: f64, roll_time: f64)->(Vect3,Velocity) {
    let t1 = t.min( roll_time / 2.0);
    let (s,v) = linear( s0, v0, t1);
    turn_omega( &s, &v, t - t1, omega)
}

pub fn turn_until_time_radius (so: &Vect3, vo: &Velocity, t: f64, turn_time: f64, r: f64, turn_right: bool)->(Vect3,Velocity) {
    if t <= turn_time {
        turn( so, vo, t, r, turn_right)
    } else {
        let (s,v) = turn( so, vo, turn_time, r, turn_right);
        linear( &s, &v, t - turn_time)
    }
}

/// turn with rate `omega` for `turn_time` seconds, then continue straight
pub fn turn_until_time_omega (so: &Vect3, vo: &Velocity, t: f64, turn_time: f64, omega: f64)->(Vect3,Velocity) {
    if t <= turn_time {
        turn_omega( so, vo, t, omega)
    } else {
        let (s,v) = turn_omega( so, vo, turn_time, omega);
        linear( &s, &v, t - turn_time)
    }
}

/// shortest turn towards `goal_track` with `max_bank`, then straight line
pub fn turn_until (so: &Vect3, vo: &Velocity, t: f64, goal_track: f64, max_bank: f64)->(Vect3,Velocity) {
    let omega = turn_rate_goal( vo, goal_track, max_bank);
    let turn_time = turn_time_to( vo, goal_track, max_bank);
    turn_until_time_omega( so, vo, t, turn_time, omega)
}

pub fn position_after_turn (so: &Vect3, vo: &Velocity, goal_track: f64, max_bank: f64)->Vect3 {
    let omega = turn_rate_goal( vo, goal_track, max_bank);
    let turn_time = turn_time_to( vo, goal_track, max_bank);
    turn_omega( so, vo, turn_time, omega).0
}

/* #endregion turn motion */

/* #region turns with roll ***************************************************************************************/

/// step through a linear bank ramp (up if `roll_out`, otherwise down) for `iter_t` seconds
fn roll_in_out (so: &Vect3, vo: &Velocity, iter_t: f64, max_bank: f64, turn_right: bool, roll_time: f64, roll_out: bool)->(Vect3,Velocity) {
    if almost_equals( roll_time, 0.0) { return (*so, *vo) }

    let n_steps = (iter_t / ROLL_TIME_STEP) as i32;
    let mut incr = (max_bank / (roll_time / ROLL_TIME_STEP)).min( max_bank);
    let mut bank = incr / 2.0;
    if !roll_out {
        bank = max_bank;
        incr = -incr;
    }

    let gs = vo.gs();
    let mut sv = (*so, *vo);

    if iter_t >= ROLL_TIME_STEP {
        for _ in 0..n_steps {
            let r = turn_radius( gs, bank);
            sv = turn( &sv.0, &sv.1, ROLL_TIME_STEP, r, turn_right);
            bank += incr;
        }
    }

    let tm_done = n_steps as f64 * ROLL_TIME_STEP;
    if iter_t - tm_done > 0.0 { // remaining fraction of a step
        let r = turn_radius( gs, bank);
        sv = turn( &sv.0, &sv.1, iter_t - tm_done, r, turn_right);
    }

    sv
}

/// turn towards `goal_track` with a bank angle that ramps up over `roll_time`, holds `max_bank` and then ramps
/// down again. The hold phase vanishes if the whole turn is shorter than twice the roll time
pub fn turn_until_with_roll (s0: &Vect3, v0: &Velocity, t: f64, goal_track: f64, max_bank: f64, roll_time: f64)->(Vect3,Velocity) {
    if almost_equals( max_bank, 0.0) { return linear( s0, v0, t) }

    let turn_right = clockwise( v0.trk(), goal_track);
    let turn_tm = turn_time_dir( v0, goal_track, max_bank, turn_right);
    if roll_time < MIN_ROLL_TIME {
        return turn_until( s0, v0, t, goal_track, max_bank)
    }

    let roll_time = if turn_tm < 2.0 * roll_time { turn_tm / 2.0 } else { roll_time };
    let turn_time = turn_tm.trunc() - roll_time;
    let iter_t = t.min( roll_time);

    let mut sv = roll_in_out( s0, v0, iter_t, max_bank, turn_right, roll_time, true);
    let roll_in_start = turn_time + roll_time;

    if t > roll_time { // constant bank
        let r = turn_radius( v0.gs(), max_bank);
        let tm_turning = (t - roll_time).min( turn_time);
        sv = turn( &sv.0, &sv.1, tm_turning, r, turn_right);
    }

    if t > roll_in_start {
        let delta = t - roll_in_start;
        let iter_tm = delta.min( roll_time);
        sv = roll_in_out( &sv.0, &sv.1, iter_tm, max_bank, turn_right, roll_time, false);

        let mut turn_remaining = 0.0;
        if t > roll_in_start + roll_time { // we usually come up a little short
            let trn_tm = turn_time_dir( &sv.1, goal_track, LAST_BANK, turn_right);
            if trn_tm < roll_time {
                turn_remaining = (delta - roll_time).min( trn_tm);
                let r_last = turn_radius( v0.gs(), LAST_BANK);
                sv = turn( &sv.0, &sv.1, turn_remaining, r_last, turn_right);
            }
        }

        if delta > roll_time - turn_remaining {
            let target_velocity = v0.with_trk( goal_track);
            sv = linear( &sv.0, &target_velocity, delta - roll_time - turn_remaining);
        }
    }

    sv
}

/// approximates roll by flying straight for half the roll time before and after a constant bank turn
pub fn turn_until_with_roll_approx (s0: &Vect3, v0: &Velocity, t: f64, goal_track: f64, max_bank: f64, roll_time: f64)->(Vect3,Velocity) {
    let turn_right = clockwise( v0.trk(), goal_track);
    let turn_tm = turn_time_dir( v0, goal_track, max_bank, turn_right);
    if roll_time < MIN_ROLL_TIME {
        return turn_until( s0, v0, t, goal_track, max_bank)
    }

    let roll_time = if turn_tm < 2.0 * roll_time { turn_tm / 2.0 } else { roll_time };
    let delay = roll_time / 2.0;
    let mut sv = linear( s0, v0, t.min( delay));
    let turn_time = turn_tm.trunc();

    if t > delay {
        let t2 = (t - delay).min( turn_time);
        let r = turn_radius( v0.gs(), max_bank);
        sv = turn( &sv.0, &sv.1, t2, r, turn_right);
    }
    if t > turn_time - delay {
        sv = linear( &sv.0, &sv.1, t - (turn_time - delay));
    }
    sv
}

/// turn for a known `turn_time` with bank ramps of `roll_time` at both ends
pub fn turn_time_with_roll (so: &Vect3, vo: &Velocity, t: f64, turn_time: f64, max_bank: f64, turn_right: bool, roll_time: f64)->(Vect3,Velocity) {
    let roll_time = if turn_time < 2.0 * roll_time { turn_time / 2.0 } else { roll_time };
    let r = turn_radius( vo.gs(), max_bank);

    let mut sv = roll_in_out( so, vo, t.min( roll_time), max_bank, turn_right, roll_time, true);
    if t > roll_time {
        let t_mid = (t - roll_time).min( turn_time - 2.0*roll_time);
        sv = turn( &sv.0, &sv.1, t_mid, r, turn_right);

        if t > turn_time - roll_time {
            let t_in = (t - (turn_time - roll_time)).min( roll_time);
            sv = roll_in_out( &sv.0, &sv.1, t_in, max_bank, turn_right, roll_time, false);
        }
        if t > turn_time {
            sv = linear( &sv.0, &sv.1, t - turn_time);
        }
    }
    sv
}

pub fn turn_time_with_roll_approx (s0: &Vect3, v0: &Velocity, t: f64, turn_time: f64, max_bank: f64, turn_right: bool, roll_time: f64)->(Vect3,Velocity) {
    let delay = roll_time / 2.0;
    let mut sv = linear( s0, v0, t.min( delay));

    if t > delay {
        let t2 = (t - delay).min( turn_time - 2.0*delay);
        let r = turn_radius( v0.gs(), max_bank);
        sv = turn( &sv.0, &sv.1, t2, r, turn_right);
    }
    if t > turn_time - delay {
        sv = linear( &sv.0, &sv.1, t - (turn_time - delay));
    }
    sv
}

/* #endregion turns with roll */

/* #region closest points on turns *******************************************************************************/

/// center of a turn with radius `r` (dir > 0 is a right turn)
pub fn center_of_turn (so: &Vect2, vo: &Vect2, r: f64, dir: i32)->Vect2 {
    let vperp = if dir > 0 { vo.perp_r().hat() } else { vo.perp_l().hat() };
    so.add_scal( r, &vperp)
}

pub fn center_of_turn_bank (so: &Vect2, vo: &Vect2, bank: f64, turn_right: bool)->Vect2 {
    let r = turn_radius( vo.norm(), bank);
    center_of_turn( so, vo, r, sign_of( turn_right))
}

/// time at which a turn with rate `omega` gets closest to x, clamped to [0,end_time] if `end_time` is positive.
/// None if x is the center of the turn
pub fn closest_time_on_turn (s0: &Vect3, v0: &Velocity, omega: f64, x: &Vect3, end_time: f64)->Option<f64> {
    let c = center( s0, v0, omega);
    if x.vect2().almost_equals( &c) { return None }

    let trk1 = (s0.vect2() - c).trk();
    let trk2 = (x.vect2() - c).trk();
    let delta = turn_delta_sgn( trk1, trk2, sign( omega));
    let t = (delta / omega).abs();

    if end_time > 0.0 && (t < 0.0 || t > end_time) {
        let max_time = TWO_PI / omega.abs();
        Some( if t > (max_time + end_time) / 2.0 { 0.0 } else { end_time })
    } else {
        Some(t)
    }
}

/// distance along a turn with radius `r` at which it gets closest to x, clamped to [0,max_dist] if `max_dist`
/// is positive. None if x is the center of the turn
pub fn closest_dist_on_turn (s0: &Vect3, v0: &Velocity, r: f64, dir: i32, x: &Vect3, max_dist: f64)->Option<f64> {
    let c = center_of_turn( &s0.vect2(), &v0.vect2(), r, dir);
    if x.vect2().almost_equals( &c) { return None }

    let trk1 = (s0.vect2() - c).trk();
    let trk2 = (x.vect2() - c).trk();
    let d = turn_delta_sgn( trk1, trk2, dir) * r;

    if max_dist > 0.0 && (d < 0.0 || d > max_dist) {
        let max_d = TWO_PI * r;
        Some( if d > (max_d + max_dist) / 2.0 { 0.0 } else { max_dist })
    } else {
        Some(d)
    }
}

/* #endregion closest points on turns */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_in_out_zero_roll_time() {
        let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
        let (s,nv) = roll_in_out( &Vect3::ZERO, &v, 5.0, 0.5, true, 0.0, true);
        assert_eq!( s, Vect3::ZERO);
        assert_eq!( nv, v);
    }

    #[test]
    fn test_zero_omega_is_linear() {
        let v = Velocity::from_trk_gs_vs( HALF_PI, 10.0, 1.0);
        let (s,_) = turn_omega( &Vect3::ZERO, &v, 10.0, 0.0);
        assert!( (s.x - 100.0).abs() < 1e-9 && (s.z - 10.0).abs() < 1e-9);
    }
}
