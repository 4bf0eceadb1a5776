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

use odin_common::{assert_within, PI, HALF_PI};
use odin_common::angle::turn_delta;
use odin_common::geo_constants::GRAVITY;
use odin_common::vect::{Vect2, Vect3};
use odin_kinematics::{Velocity, OdinKinematicsError};
use odin_kinematics::kinematics::*;

// run with "cargo test test_turn_radius -- --nocapture"

#[test]
fn test_turn_radius() {
    let r = turn_radius( 100.0, 45.0_f64.to_radians());
    println!("turn radius at 100m/s and 45° bank: {:.3}m", r);
    assert_within!( r, 100.0*100.0 / GRAVITY, 1e-9);
    assert_within!( r, 1019.7, 0.1);

    // straight flight has "infinite" radius, a vertical bank none
    assert_eq!( turn_radius( 100.0, 0.0), f64::MAX);
    assert_eq!( turn_radius( 100.0, HALF_PI), 0.0);
}

#[test]
fn test_turn_parameterizations() {
    for gs in [50.0, 120.0, 250.0] {
        for bank_deg in [5.0, 15.0, 30.0, 45.0, 60.0] {
            let bank = f64::to_radians( bank_deg);
            let r = turn_radius( gs, bank);
            let omega = turn_rate( gs, bank);
            assert_within!( omega, gs / r, 1e-12);
            assert_within!( bank_angle_radius( gs, r), bank, 1e-12);
        }
    }
    // left turns have negative rates
    assert!( turn_rate( 100.0, -0.3) < 0.0);
}

#[test]
fn test_turn_to_goal_track() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
    let bank = 30.0_f64.to_radians();

    let t = turn_time_to( &v, HALF_PI, bank);
    let r = turn_radius( v.gs(), bank);
    let (s1,v1) = turn( &s, &v, t, r, true);
    println!("after {:.3}s: s={} v={}", t, s1, v1);

    assert_within!( v1.trk(), HALF_PI, 1e-6);
    assert_within!( v1.gs(), 100.0, 1e-9);
    // a quarter circle to the right ends at (r,r)
    assert_within!( s1.x, r, 1e-6);
    assert_within!( s1.y, r, 1e-6);
}

#[test]
fn test_turn_round_trip() {
    let s = Vect3::new( 1000.0, -500.0, 3000.0);
    let v = Velocity::from_trk_gs_vs( 0.7, 150.0, 2.0);
    let r = 2500.0;
    let t = 42.0;

    for turn_right in [true, false] {
        let (s1,v1) = turn( &s, &v, t, r, turn_right);

        // running time backwards on the same circle
        let (s2,v2) = turn( &s1, &v1, -t, r, turn_right);
        assert!( s2.almost_equals_2d( &s, 1e-6), "{s2} != {s}");
        assert_within!( s2.z, s.z, 1e-9);
        assert_within!( turn_delta( v2.trk(), v.trk()), 0.0, 1e-9);

        // flying back along the arc with reversed velocity means turning the other way
        let (s3,v3) = turn( &s1, &-v1, t, r, !turn_right);
        assert!( s3.almost_equals_2d( &s, 1e-6), "{s3} != {s}");
        assert_within!( turn_delta( v3.trk(), v.trk() + PI), 0.0, 1e-9);
    }
}

#[test]
fn test_zero_rate_turn_is_linear() {
    let s = Vect3::new( 0.0, 0.0, 100.0);
    let v = Velocity::from_trk_gs_vs( 1.0, 80.0, -3.0);
    let (s1,v1) = turn_omega( &s, &v, 30.0, 0.0);
    let (s2,v2) = linear( &s, &v, 30.0);
    assert_eq!( s1, s2);
    assert_eq!( v1, v2);

    // zero radius does not move at all
    let (s3,_) = turn( &s, &v, 30.0, 0.0, true);
    assert_eq!( s3, s);
}

#[test]
fn test_turn_until() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 10.0_f64.to_radians(), 120.0, 0.0);
    let goal = 350.0_f64.to_radians();
    let bank = 25.0_f64.to_radians();

    // the shortest turn is to the left
    assert!( !turn_right( &v, goal));

    let t_turn = turn_time_to( &v, goal, bank);
    let (s1,v1) = turn_until( &s, &v, t_turn + 60.0, goal, bank);
    println!("turn time {:.2}s, end: s={} v={}", t_turn, s1, v1);
    assert_within!( turn_delta( v1.trk(), goal), 0.0, 1e-9);
    assert!( s1.x < 0.0);

    // straight after the turn
    let (s_end,_) = turn_until( &s, &v, t_turn, goal, bank);
    assert!( s1.almost_equals_2d( &s_end.linear( &v1.vect3(), 60.0), 1e-6));
}

#[test]
fn test_turn_until_with_roll() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
    let goal = 120.0_f64.to_radians();
    let bank = 30.0_f64.to_radians();

    let t_turn = turn_time_to( &v, goal, bank);
    let (s1,v1) = turn_until_with_roll( &s, &v, t_turn + 30.0, goal, bank, 5.0);
    let (s2,v2) = turn_until( &s, &v, t_turn + 30.0, goal, bank);
    println!("with roll: s={} v={}\nwithout roll: s={} v={}", s1, v1, s2, v2);

    assert_within!( turn_delta( v1.trk(), goal), 0.0, 1e-9);
    // rolling makes the turn wider but it should still end up close
    assert!( s1.distance_h( &s2) < 1000.0);

    // short roll times fall back to the instantaneous turn
    let (s3,v3) = turn_until_with_roll( &s, &v, 40.0, goal, bank, 0.05);
    let (s4,v4) = turn_until( &s, &v, 40.0, goal, bank);
    assert_eq!( s3, s4);
}

#[test]
fn test_direct_to() {
    let bot = Vect2::new( 0.0, 0.0);
    let v0 = Vect2::new( 0.0, 100.0);
    let r = 1000.0;

    // goal at the turn center can not be reached
    let center = Vect2::new( r, 0.0);
    assert!( direct_to( &bot, &v0, &center, r).is_none());
    // neither can any other point inside of the turn circle
    assert!( direct_to( &bot, &v0, &Vect2::new( 1200.0, 300.0), r).is_none());

    let goal = Vect2::new( 5000.0, 5000.0);
    let (eot, c) = direct_to( &bot, &v0, &goal, r).unwrap();
    println!("end of turn: {}, center: {}", eot, c);
    assert_within!( c.x, r, 1e-9);
    assert_within!( (eot - c).norm(), r, 1e-6);
    assert_within!( (goal - eot).dot( &(eot - c)), 0.0, 1e-3); // tangent

    let so = Vect3::from_vect2( bot, 0.0);
    let vo = Velocity::from_vect2( v0);
    let (s,v,t,dir) = direct_to_point( &so, &vo, &Vect3::from_vect2( goal, 0.0), r).unwrap();
    println!("direct to: s={} v={} t={:.3} dir={}", s, v, t, dir);
    assert_eq!( dir, 1);
    assert!( (s.vect2() - eot).norm() < 1e-6);
    assert_within!( turn_delta( v.trk(), (goal - s.vect2()).trk()), 0.0, 1e-6);

    let res = direct_to_point( &so, &vo, &Vect3::from_vect2( center, 0.0), r);
    assert!( matches!( res, Err(OdinKinematicsError::Infeasible(_))));
}

#[test]
fn test_gs_accel_until_clamps() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( HALF_PI, 100.0, 0.0);

    let (s1,v1) = gs_accel_until( &s, &v, 100.0, 150.0, 2.0);
    println!("s={} v={}", s1, v1);
    assert_eq!( v1.gs(), 150.0);
    assert_within!( s1.x, 100.0*25.0 + 0.5*2.0*25.0*25.0 + 150.0*75.0, 1e-6);
    assert_within!( s1.y, 0.0, 1e-6);

    // deceleration also stops at the goal speed, and negative magnitudes are corrected
    let (_,v2) = gs_accel_until( &s, &v, 100.0, 60.0, -2.0);
    assert_eq!( v2.gs(), 60.0);

    // before reaching the goal speed
    let (_,v3) = gs_accel_until( &s, &v, 10.0, 150.0, 2.0);
    assert_within!( v3.gs(), 120.0, 1e-9);
}

#[test]
fn test_gs_accel_to_dist() {
    let (gs,t) = gs_accel_to_dist( 10.0, 100.0, 1.0).unwrap();
    println!("gs={:.4} t={:.4}", gs, t);
    assert_within!( t, -10.0 + 300.0_f64.sqrt(), 1e-9);
    assert_within!( gs, 10.0 + t, 1e-9);

    assert_within!( gs_accel_to_dist( 20.0, 100.0, 0.0).unwrap().1, 5.0, 1e-12);

    // we stop after 50m
    assert!( gs_accel_to_dist( 10.0, 100.0, -1.0).is_err());
    assert!( gs_accel_to_dist( -1.0, 100.0, 1.0).is_err());

    // deceleration that covers the distance before stopping (stopping distance is 12.5m)
    let (gs,t) = gs_accel_to_dist( 0.5, 5.0, -0.01).unwrap();
    println!("decelerating: gs={:.4} t={:.4}", gs, t);
    assert_within!( t, 11.27, 0.01);
    assert_within!( gs, 0.15_f64.sqrt(), 1e-9);
    assert_within!( 0.5*t - 0.005*t*t, 5.0, 1e-9);
}

#[test]
fn test_gs_accel_to_rta() {
    let (gs,t) = gs_accel_to_rta( 100.0, 12_000.0, 100.0, 1.0).unwrap();
    println!("accelerate for {:.3}s to {:.3}m/s", t, gs);
    assert_within!( t, 100.0 - 6000.0_f64.sqrt(), 1e-9);
    let d = 100.0*t + 0.5*t*t + gs*(100.0 - t);
    assert_within!( d, 12_000.0, 1e-6);

    assert!( gs_accel_to_rta( 100.0, 12_000.0, 100.0, 0.01).is_err());

    let ((t1,t2,t3),(a1,gs2,a2)) = gs_accel_to_rtav( 100.0, 12_000.0, 100.0, 100.0, 1.0).unwrap();
    println!("rtav: t1={:.3} t2={:.3} t3={:.3} a1={} gs2={:.3} a2={}", t1, t2, t3, a1, gs2, a2);
    assert_within!( t1 + t2 + t3, 100.0, 1e-9);
    assert_within!( gs2 + a2*t3, 100.0, 1e-6);
    let d = 100.0*t1 + 0.5*a1*t1*t1 + gs2*t2 + gs2*t3 + 0.5*a2*t3*t3;
    assert_within!( d, 12_000.0, 1e-6);
}

#[test]
fn test_gs_accel_to_rta_magnitude() {
    // negative magnitudes give the same profile as positive ones
    let (gs,t) = gs_accel_to_rta( 100.0, 11_000.0, 100.0, 1.0).unwrap();
    let (gs_neg,t_neg) = gs_accel_to_rta( 100.0, 11_000.0, 100.0, -1.0).unwrap();
    println!("accelerate for {:.3}s to {:.3}m/s", t, gs);
    assert_within!( t, 100.0 - 8000.0_f64.sqrt(), 1e-9);
    assert_within!( gs, 100.0 + t, 1e-9);
    assert_eq!( (gs,t), (gs_neg,t_neg));

    let (gs,t) = gs_accel_to_rta_ad( 100.0, 11_000.0, 100.0, 1.0).unwrap();
    let (gs_neg,t_neg) = gs_accel_to_rta_ad( 100.0, 11_000.0, 100.0, -1.0).unwrap();
    assert_within!( t, 100.0 - 8000.0_f64.sqrt(), 1e-9);
    assert_eq!( (gs,t), (gs_neg,t_neg));

    // deceleration profile
    let (gs,t) = gs_accel_to_rta( 100.0, 9_000.0, 100.0, -1.0).unwrap();
    println!("decelerate for {:.3}s to {:.3}m/s", t, gs);
    assert_within!( 100.0*t - 0.5*t*t + gs*(100.0 - t), 9_000.0, 1e-6);
    assert!( gs < 100.0);
}

#[test]
fn test_gs_accel_to_rta_on_time() {
    // already on schedule: no acceleration needed
    let (gs,t) = gs_accel_to_rta( 100.0, 10_000.0, 100.0, 1.0).unwrap();
    println!("gs={} t={}", gs, t);
    assert_within!( gs, 100.0, 1e-9);
    assert_within!( t, 0.0, 1e-9);
}

#[test]
fn test_vs_accel_until() {
    let s = Vect3::new( 0.0, 0.0, 1000.0);
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);

    let (s1,v1) = vs_accel_until( &s, &v, 20.0, 10.0, 2.0);
    println!("s={} v={}", s1, v1);
    assert_eq!( v1.vs(), 10.0);
    assert_within!( s1.z, 1000.0 + 25.0 + 150.0, 1e-9);
    assert_within!( s1.y, 2000.0, 1e-9);
    assert_within!( vs_accel_time( 0.0, 10.0, 2.0), 5.0, 1e-12);
}

#[test]
fn test_vs_accel_goal() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);

    let (s1,v1,t1) = vs_accel_goal( &s, &v, 10.0, 2.0);
    println!("s={} v={} t={}", s1, v1, t1);
    assert_within!( t1, 5.0, 1e-12);
    assert_within!( s1.z, 25.0, 1e-9);
    assert_eq!( v1.vs(), 10.0);

    // a negative magnitude still climbs towards the goal
    let (s2,v2,t2) = vs_accel_goal( &s, &v, 10.0, -2.0);
    assert_within!( t2, 5.0, 1e-12);
    assert_within!( s2.z, 25.0, 1e-9);
    assert_eq!( v2.vs(), 10.0);
    assert_within!( vs_accel_time( 0.0, 10.0, -2.0), 5.0, 1e-12);
}

#[test]
fn test_los_probes() {
    // intruder on reciprocal course at same altitude
    let so = Vect3::ZERO;
    let vo = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);
    let si = Vect3::new( 0.0, 20_000.0, 0.0);
    let vi = Velocity::from_trk_gs_vs( PI, 100.0, 0.0);

    // staying on course is a loss of separation
    assert!( test_los_trk( &so, &vo, &vo, &si, &vi, 0.5, 150.0, 1000.0, 100.0));
    // turning right by 90° early enough is not
    let nvo = vo.with_trk( HALF_PI);
    assert!( !test_los_trk( &so, &vo, &nvo, &si, &vi, 0.5, 150.0, 1000.0, 100.0));
}
