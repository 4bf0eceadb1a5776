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

//! spherical earth geometry and aircraft trajectory kinematics.
//!
//! Maneuvers (turns, ground speed and vertical speed accelerations, level-outs, direct-to) are computed in a
//! flat euclidean frame ([`kinematics`]). Geodesic positions are handled by projecting into a local
//! azimuthal-equidistant frame, integrating there and projecting back ([`projected_kinematics`]).
//! All angles are radians, all distances meters and all speeds m/s. Tracks are clockwise from true north.

pub mod errors;
pub mod great_circle;
pub mod lat_lon_alt;
pub mod velocity;
pub mod vect_funs;
pub mod state_vector;
pub mod position;

pub mod turn;
pub mod direct_to;
pub mod gs_accel;
pub mod vs_accel;
pub mod level_out;
pub mod kinematics;

pub mod projection;
pub mod projected_kinematics;

pub use errors::{OdinKinematicsError, Result};
pub use lat_lon_alt::LatLonAlt;
pub use velocity::Velocity;
pub use state_vector::StateVector;
pub use position::Position;
pub use level_out::LevelOutTimes;
pub use projection::AziEquiProjection;
