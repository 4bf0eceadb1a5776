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

use odin_common::assert_within;
use odin_common::vect::Vect3;
use odin_kinematics::{Velocity, LevelOutTimes};
use odin_kinematics::kinematics::*;

// run with "cargo test test_level_out_terminal -- --nocapture"

fn check_terminal (z0: f64, vz0: f64, climb_rate: f64, target_alt: f64, a: f64) {
    let sv = (Vect3::new( 0.0, 0.0, z0), Velocity::from_trk_gs_vs( 0.0, 100.0, vz0));

    let lt = vs_level_out_times_sv( &sv, climb_rate, target_alt, a, -a, true).unwrap();
    println!("z0={} vz0={} -> {}: {:?}", z0, vz0, target_alt, lt);
    assert!( lt.t1 <= lt.t2 && lt.t2 <= lt.t3);

    let (s,v) = vs_level_out( &sv, lt.t3, climb_rate, target_alt, a, -a, true).unwrap();
    println!("   at t3={:.3}: z={:.6} vz={:.6}", lt.t3, s.z, v.vs());
    assert_within!( s.z, target_alt, 1e-6);
    assert_within!( v.vs(), 0.0, 1e-9);

    // afterwards we stay level
    let (s,v) = vs_level_out( &sv, lt.t3 + 100.0, climb_rate, target_alt, a, -a, true).unwrap();
    assert_eq!( s.z, target_alt);
    assert_eq!( v.vs(), 0.0);
    assert_within!( s.y, 100.0 * (lt.t3 + 100.0), 1e-6);
}

#[test]
fn test_level_out_terminal() {
    check_terminal( 0.0, 0.0, 10.0, 1000.0, 2.0);       // climb with cruise segment
    check_terminal( 1000.0, 0.0, 10.0, 0.0, 2.0);       // descent with cruise segment
    check_terminal( 0.0, 5.0, 10.0, 1000.0, 2.0);       // already climbing
    check_terminal( 1000.0, 5.0, 10.0, 0.0, 2.0);       // moving away from target first
    check_terminal( 0.0, 0.0, 10.0, 30.0, 2.0);         // not enough room to reach the climb rate
    check_terminal( 0.0, 15.0, 10.0, 1000.0, 2.0);      // faster than requested climb rate
}

#[test]
fn test_level_out_phases() {
    let sv = (Vect3::ZERO, Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0));
    let lt = vs_level_out_times_sv( &sv, 10.0, 1000.0, 2.0, -2.0, true).unwrap();

    // 5s to reach 10m/s (25m), 95s climb, 5s to level out (25m)
    assert_within!( lt.t1, 5.0, 1e-9);
    assert_within!( lt.t2, 100.0, 1e-9);
    assert_within!( lt.t3, 105.0, 1e-9);
    assert_eq!( lt.a1, 2.0);
    assert_eq!( lt.a2, -2.0);

    let (s,v) = vs_level_out( &sv, 50.0, 10.0, 1000.0, 2.0, -2.0, true).unwrap();
    assert_within!( s.z, 25.0 + 450.0, 1e-9);
    assert_within!( v.vs(), 10.0, 1e-9);

    assert_within!( vs_level_out_climb_rate( &sv, 10.0, 1000.0, 2.0, -2.0, true).unwrap(), 10.0, 1e-9);
}

#[test]
fn test_level_out_final() {
    let sv = (Vect3::new( 0.0, 0.0, 3000.0), Velocity::from_trk_gs_vs( 0.0, 150.0, -8.0));

    let fin = vs_level_out_final( &sv, 12.0, 1500.0, 1.5, true).unwrap();
    println!("final state: {}", fin);
    assert_within!( fin.s.z, 1500.0, 1e-6);
    assert_within!( fin.v.vs(), 0.0, 1e-9);
    assert_within!( vs_level_out_time( &sv, 12.0, 1500.0, 1.5, true).unwrap(), fin.t, 1e-12);

    // negative magnitudes are corrected
    let fin_neg = vs_level_out_final( &sv, 12.0, 1500.0, -1.5, true).unwrap();
    println!("final state (negative magnitude): {}", fin_neg);
    assert_within!( fin_neg.s.z, 1500.0, 1e-6);
    assert_within!( fin_neg.v.vs(), 0.0, 1e-9);
    assert_within!( fin_neg.t, fin.t, 1e-12);
    assert_within!( vs_level_out_time( &sv, 12.0, 1500.0, -1.5, true).unwrap(), fin.t, 1e-12);

    // we can't stop in 10m when descending at 8m/s with 1.5m/s²
    assert!( overshoot( &sv, 12.0, 2990.0, 1.5, -1.5, true).unwrap());
    assert!( !overshoot( &sv, 12.0, 1500.0, 1.5, -1.5, true).unwrap());
}

#[test]
fn test_climb_segments() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);

    let (t1,t2,t3) = climb_segment_ends( &s, &v, 1000.0, 10.0, 2.0).unwrap();
    println!("climb segments end at {:.3}, {:.3}, {:.3}", t1, t2, t3);
    assert_within!( t1, 5.0, 1e-9);
    assert_within!( t2, 100.0, 1e-9);
    assert_within!( t3, 105.0, 1e-9);

    let (s1,v1) = vs_accel_to_flight_level( &s, &v, t3 + 10.0, 1000.0, 10.0, 2.0).unwrap();
    assert_within!( s1.z, 1000.0, 1e-6);
    assert_within!( v1.vs(), 0.0, 1e-9);

    // the climb rate is taken in the direction of the altitude change
    assert_within!( time_to_flight_level( &Vect3::new( 0.0, 0.0, 1000.0), &v, 0.0, 10.0, 2.0).unwrap(), 105.0, 1e-9);
    // but a zero climb rate can't get us anywhere
    assert!( climb_segment_ends( &Vect3::new( 0.0, 0.0, 1000.0), &v, 0.0, 0.0, 2.0).is_err());
}

#[test]
fn test_accel_rate_iter() {
    let s = Vect3::ZERO;
    let v = Velocity::from_trk_gs_vs( 0.0, 100.0, 0.0);

    let (s1,v1) = vs_accel_until_accel_rate_iter( &s, &v, 60.0, 10.0, 2.0, 2.0);
    println!("s={} v={}", s1, v1);
    assert_within!( v1.vs(), 10.0, 0.5);
    assert!( s1.z > 0.0);
    assert_within!( s1.y, 6000.0, 1e-6);
}
