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

use odin_common::{assert_within, PI, HALF_PI, TWO_PI};
use odin_common::angle::*;
use odin_common::numeric::{almost_equals, root};
use odin_common::config::config_from_str;
use serde::Deserialize;

// run with "cargo test test_normalized_angles -- --nocapture"

#[test]
fn test_normalized_angles() {
    let lon = Longitude::from_degrees( 200.0);
    println!("display lon = {}", lon);
    println!("debug lon = {:?}", lon);
    assert_within!( lon.degrees(), -160.0, 1e-12);
    assert_within!( lon.radians(), Longitude::from_degrees( -160.0).radians(), 1e-12);

    let lat = Latitude::from_degrees( 100.0); // folds over the pole
    println!("lat = {}", lat);
    assert_within!( lat.degrees(), 80.0, 1e-12);

    let trk = Track::from_degrees( -90.0);
    assert_within!( trk.degrees(), 270.0, 1e-12);
    assert_within!( (trk + Track::from_degrees( 100.0)).degrees(), 10.0, 1e-12);
    assert_within!( (Track::from_degrees( 10.0) - Track::from_degrees( 20.0)).degrees(), 350.0, 1e-12);

    let bank = Bank::from_degrees( 25.0);
    assert_within!( bank.radians(), 25.0_f64.to_radians(), 1e-15);
    assert_within!( f64::from( bank), bank.radians(), 0.0);
}

#[derive(Deserialize,Debug)]
struct Waypoint {
    lat: Latitude,
    lon: Longitude,
    trk: Track,
}

#[test]
fn test_angle_config() {
    let wp: Waypoint = config_from_str( "(lat: 37.5, lon: -122, trk: 270.0)").unwrap();
    println!("{:?}", wp);
    assert_within!( wp.lat.degrees(), 37.5, 1e-12);
    assert_within!( wp.lon.degrees(), -122.0, 1e-12);
    assert_within!( wp.trk.radians(), 1.5 * PI, 1e-12);

    let res: odin_common::Result<Waypoint> = config_from_str( "(lat: 97.5, lon: 0.0, trk: 0.0)");
    println!("out of range: {:?}", res);
    assert!( res.is_err());
}

#[test]
fn test_scalar_normalization() {
    assert_within!( to_2pi( -HALF_PI), 1.5 * PI, 1e-12);
    assert_eq!( to_2pi( TWO_PI), 0.0);
    assert_within!( to_pi( 1.5 * PI), -HALF_PI, 1e-12);
    assert_within!( to_pi( -PI), PI, 1e-12);
    assert_within!( to_pi2_cont( 0.6 * PI), 0.4 * PI, 1e-12);
    assert_within!( to_180( 270.0), -90.0, 1e-12);
    assert_within!( to_360( -30.0), 330.0, 1e-12);
}

// run with "cargo test test_turn_deltas -- --nocapture"

#[test]
fn test_turn_deltas() {
    let (a, b) = (350.0_f64.to_radians(), 10.0_f64.to_radians());

    assert!( clockwise( a, b));
    assert!( !clockwise( b, a));
    assert_eq!( turn_dir( a, b), 1);
    assert_eq!( turn_dir( b, a), -1);

    assert_within!( turn_delta( a, b), 20.0_f64.to_radians(), 1e-12);
    assert_within!( signed_turn_delta( b, a), -20.0_f64.to_radians(), 1e-12);
    assert_within!( turn_delta_dir( a, b, false), 340.0_f64.to_radians(), 1e-12);
    assert_eq!( turn_delta_dir( a, a, true), 0.0);
    assert_within!( turn_delta_sgn( b, a, -1), 20.0_f64.to_radians(), 1e-12);
}

#[test]
fn test_almost_equals() {
    assert!( almost_equals( 0.1 + 0.2, 0.3));
    assert!( !almost_equals( 1.0, 1.0001));
    assert_eq!( root( 2.0, 0.0, -8.0, 1), Some( 2.0));
    assert_eq!( root( 2.0, 0.0, -8.0, -1), Some( -2.0));
}
