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

//! trajectory prediction tool: reads a RON scenario with a geodesic start state and a sequence of maneuvers,
//! and prints the sampled states of each maneuver. Set RUST_LOG=debug to see solver diagnostics.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use uom::si::f64::{Length, Velocity as Speed};
use uom::si::length::{foot, meter};
use uom::si::velocity::{knot, foot_per_minute, meter_per_second};
use odin_common::{define_cli, check_cli, info, warn};
use odin_common::angle::{Latitude, Longitude, Track, Bank};
use odin_common::config::load_config;
use odin_common::tolerance::{set_tolerances, Tolerances};
use odin_kinematics::{LatLonAlt, Position, Velocity};
use odin_kinematics::kinematics::turn_radius;
use odin_kinematics::projected_kinematics as pk;

define_cli! { ARGS [about="sample aircraft trajectories for a sequence of idealized maneuvers"] =
    step: f64 [help="sample time step in seconds", short, long, default_value="10.0"],
    scenario: String [help="pathname of RON scenario file"]
}

#[derive(Deserialize,Debug)]
struct Scenario {
    name: String,
    lat: Latitude,
    lon: Longitude,
    alt_ft: f64,
    trk: Track,
    gs_kn: f64,
    vs_fpm: f64,
    #[serde(default)]
    tolerances: Option<Tolerances>,
    maneuvers: Vec<Maneuver>,
}

#[derive(Deserialize,Debug)]
enum Maneuver {
    Linear { duration: f64 },
    Turn { trk: Track, bank: Bank, #[serde(default)] roll_time: f64, duration: f64 },
    GsAccel { gs_kn: f64, accel: f64, duration: f64 },
    VsAccel { vs_fpm: f64, accel: f64, duration: f64 },
    LevelOut { alt_ft: f64, climb_rate_fpm: f64, accel: f64 },
    DirectTo { lat: Latitude, lon: Longitude, bank: Bank },
}

#[inline] fn ft_to_m (ft: f64)->f64 { Length::new::<foot>(ft).get::<meter>() }
#[inline] fn kn_to_ms (kn: f64)->f64 { Speed::new::<knot>(kn).get::<meter_per_second>() }
#[inline] fn fpm_to_ms (fpm: f64)->f64 { Speed::new::<foot_per_minute>(fpm).get::<meter_per_second>() }

fn print_state (t: f64, p: &Position, v: &Velocity) {
    println!("{:9.1}s  {}  {}", t, p, v);
}

/// sample `f` from 0 to `duration` (inclusive) and return the end state
fn sample<F> (t0: f64, duration: f64, step: f64, f: F)->(Position,Velocity) where F: Fn(f64)->(Position,Velocity) {
    let mut t = step;
    while t < duration {
        let (p,v) = f(t);
        print_state( t0 + t, &p, &v);
        t += step;
    }
    let (p,v) = f(duration);
    print_state( t0 + duration, &p, &v);
    (p,v)
}

fn run_maneuver (m: &Maneuver, so: &Position, vo: &Velocity, step: f64, t0: f64)->Result<(Position,Velocity,f64)> {
    match m {
        Maneuver::Linear { duration } => {
            let (p,v) = sample( t0, *duration, step, |t| pk::linear( so, vo, t));
            Ok( (p, v, *duration) )
        }
        Maneuver::Turn { trk, bank, roll_time, duration } => {
            let (goal, bank) = (trk.radians(), bank.radians());
            let (p,v) = if *roll_time > 0.0 {
                sample( t0, *duration, step, |t| pk::turn_until_with_roll( so, vo, t, goal, bank, *roll_time))
            } else {
                sample( t0, *duration, step, |t| pk::turn_until( so, vo, t, goal, bank))
            };
            Ok( (p, v, *duration) )
        }
        Maneuver::GsAccel { gs_kn, accel, duration } => {
            let goal = kn_to_ms( *gs_kn);
            let (p,v) = sample( t0, *duration, step, |t| pk::gs_accel_until( so, vo, t, goal, *accel));
            Ok( (p, v, *duration) )
        }
        Maneuver::VsAccel { vs_fpm, accel, duration } => {
            let goal = fpm_to_ms( *vs_fpm);
            let (p,v) = sample( t0, *duration, step, |t| pk::vs_accel_until( so, vo, t, goal, *accel));
            Ok( (p, v, *duration) )
        }
        Maneuver::LevelOut { alt_ft, climb_rate_fpm, accel } => {
            let (target, climb_rate) = (ft_to_m( *alt_ft), fpm_to_ms( *climb_rate_fpm));
            let (_, _, t_end) = pk::vs_level_out_final( so, vo, climb_rate, target, *accel)?;
            let mut t = step;
            while t < t_end {
                let (p,v) = pk::vs_level_out( so, vo, t, climb_rate, target, *accel, true)?;
                print_state( t0 + t, &p, &v);
                t += step;
            }
            let (p,v) = pk::vs_level_out( so, vo, t_end, climb_rate, target, *accel, true)?;
            print_state( t0 + t_end, &p, &v);
            Ok( (p, v, t_end) )
        }
        Maneuver::DirectTo { lat, lon, bank } => {
            let wp = Position::Geodesic( LatLonAlt::from_angles( *lat, *lon, so.alt()));
            let r = turn_radius( vo.gs(), bank.radians());
            let (eot, veot, t_turn, dir) = pk::direct_to_point( so, vo, &wp, r)?;
            sample( t0, t_turn, step, |t| pk::turn( so, vo, t, r, dir > 0));
            let t_linear = eot.distance_h( &wp) / veot.gs().max( f64::EPSILON);
            let (p,v) = sample( t0 + t_turn, t_linear, step, |t| pk::linear( &eot, &veot, t));
            Ok( (p, v, t_turn + t_linear) )
        }
    }
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    if !(ARGS.step > 0.0) { return Err( anyhow!("time step has to be positive: {}", ARGS.step)) }

    let scenario: Scenario = load_config( &ARGS.scenario)?;
    if let Some(tol) = scenario.tolerances {
        set_tolerances( tol)?;
    }
    info!("running scenario '{}' with {} maneuvers", scenario.name, scenario.maneuvers.len());

    let mut p = Position::Geodesic( LatLonAlt::from_angles( scenario.lat, scenario.lon, ft_to_m( scenario.alt_ft)));
    let mut v = Velocity::from_trk_gs_vs( scenario.trk.radians(), kn_to_ms( scenario.gs_kn), fpm_to_ms( scenario.vs_fpm));
    let mut t = 0.0;
    print_state( t, &p, &v);

    for m in &scenario.maneuvers {
        println!("-- {:?}", m);
        match run_maneuver( m, &p, &v, ARGS.step, t) {
            Ok((np,nv,dt)) => {
                p = np;
                v = nv;
                t += dt;
            }
            Err(e) => {
                warn!("maneuver {:?} failed: {}", m, e);
                println!("   skipped: {}", e);
            }
        }
    }
    Ok(())
}
