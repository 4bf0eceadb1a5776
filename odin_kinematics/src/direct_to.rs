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

//! turns that point the vehicle directly at a goal position, and the vertices that approximate such turns

use odin_common::{HALF_PI, sign_of};
use odin_common::angle::turn_delta_dir;
use odin_common::vect::{Vect2, Vect3};
use odin_common::debug;
use crate::velocity::Velocity;
use crate::vect_funs::{self, q_tangent};
use crate::turn::{turn, turn_omega, turn_radius, turn_time};
use crate::errors::{Result, OdinKinematicsError, infeasible};

#[inline] fn is_left_turn (from: &Vect2, to: &Vect2)->bool { to.det( from) < 0.0 }

/// point on the circle with the given center and radius where the tangent passes through `v`.
/// `eps` selects one of the two tangents. None if `v` is inside the circle
pub fn tangent_to_circle (v: &Vect2, center: &Vect2, radius: f64, eps: i32)->Option<Vect2> {
    let s = *v - *center;
    q_tangent( &s, radius, eps).map( |rop| rop + *center)
}

/// tangent points on the first circle of the two outer tangents between two circles. None if the circles overlap
pub fn tangent_points_between_two_circles (c1: &Vect2, r1: f64, c2: &Vect2, r2: f64)->Option<(Vect2,Vect2)> {
    if c1.distance( c2) < r1 + r2 { return None }

    let t1 = tangent_to_circle( c2, c1, r1 + r2, -1)?;
    let t2 = tangent_to_circle( c2, c1, r1 + r2, 1)?;
    let v1 = t1 - *c2;
    let v2 = t2 - *c2;

    Some(( t1 + v1.hat().perp_l().scal( r2), t2 + v2.hat().perp_r().scal( r2) ))
}

/// end of turn and turn center of a turn with radius `r` that leaves the vehicle at `bot` heading
/// towards `goal`. None if `goal` is inside the turn circle
pub fn direct_to (bot: &Vect2, v0: &Vect2, goal: &Vect2, r: f64)->Option<(Vect2,Vect2)> {
    let new_v = *goal - *bot;
    let eps = sign_of( is_left_turn( v0, &new_v)); // 1: left turn
    let vperp = if eps > 0 { v0.perp_l().hat() } else { v0.perp_r().hat() };

    let center = bot.add_scal( r, &vperp);
    let s = *goal - center;
    q_tangent( &s, r, eps).map( |rop| (rop + center, center))
}

/// end of turn position, velocity at end of turn, turn time and turn direction (+1 right) of the turn
/// with radius `r` that points the vehicle at `wp`. The turn can be more than 180°
pub fn direct_to_point (so: &Vect3, vo: &Velocity, wp: &Vect3, r: f64)->Result<(Vect3,Velocity,f64,i32)> {
    let Some((eot,_)) = direct_to( &so.vect2(), &vo.vect2(), &wp.vect2(), r) else {
        debug!("direct-to goal {} is inside turn circle of radius {:.1}", wp, r);
        return Err( infeasible("direct-to goal inside turn circle"))
    };

    let final_track = (wp.vect2() - eot).trk();
    let turn_dir = sign_of( !is_left_turn( &vo.vect2(), &(*wp - *so).vect2()));
    let delta = turn_delta_dir( vo.trk(), final_track, turn_dir > 0);
    let omega = turn_dir as f64 * vo.gs() / r;
    let turn_time = (delta / omega).abs();

    let (s,v) = turn_omega( so, vo, turn_time, omega);
    Ok( (s, v, turn_time, turn_dir) )
}

/// vertex (intersection of the current track and the track after a direct-to turn), time to reach the
/// vertex and time to complete the turn. The turn starts after `time_before_turn`
pub fn gen_direct_to_vertex (so: &Vect3, vo: &Velocity, wp: &Vect3, bank: f64, time_before_turn: f64)->Result<(Vect3,f64,f64)> {
    let so = so.linear( &vo.vect3(), time_before_turn);
    let r = turn_radius( vo.gs(), bank);
    let (si,vi,turn_tm,_) = direct_to_point( &so, vo, wp, r)?;

    let (ip,dt) = vect_funs::intersection( &so, vo, &si, &vi).ok_or( infeasible("no vertex for direct-to turn"))?;
    Ok( (ip, dt + time_before_turn, turn_tm + time_before_turn) )
}

/// vertices with times that approximate a direct-to turn by straight segments, each covering at most
/// 90° of turn. Pieces are separated by `time_between_pieces` of straight flight
pub fn gen_direct_to_vertex_list (so: &Vect3, vo: &Velocity, wp: &Vect3, bank: f64, time_before_turn: f64, time_between_pieces: f64)->Result<Vec<(Vect3,f64)>> {
    let r = turn_radius( vo.gs(), bank);
    let s_start = so.linear( &vo.vect3(), time_before_turn);
    let (_,_,turn_tm,dir) = direct_to_point( &s_start, vo, wp, r)?;

    let t90 = turn_time( vo.gs(), HALF_PI, bank);
    let mut segments = (turn_tm / t90).ceil() as i32;
    let seg_time = turn_tm / segments as f64;

    let mut vertices: Vec<(Vect3,f64)> = Vec::with_capacity( segments.max(1) as usize);
    let mut p1 = (s_start, *vo);
    let mut t = time_before_turn;

    while segments > 1 {
        let (s2,v2) = turn( &p1.0, &p1.1, seg_time, r, dir > 0);
        let (ip,dt) = vect_funs::intersection( &p1.0, &p1.1, &s2, &v2).ok_or( infeasible("no vertex for turn segment"))?;
        t += dt;
        vertices.push( (ip,t));
        p1 = (s2.linear( &v2.vect3(), time_between_pieces), v2);
        segments -= 1;
    }

    let (ip,dt,_) = gen_direct_to_vertex( &p1.0, &p1.1, wp, bank, 0.0)?;
    vertices.push( (ip, dt + t));
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_turn() {
        let north = Vect2::new( 0.0, 1.0);
        assert!( is_left_turn( &north, &Vect2::new( -1.0, 1.0)));
        assert!( !is_left_turn( &north, &Vect2::new( 1.0, 1.0)));
    }
}
